//! POST /api/v1/auth/verify-otp and /api/v1/auth/resend-otp

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{AccountDto, EmailRequest, VerifyOtpRequest};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Confirm the emailed one-time code and mark the account verified.
pub async fn verify_otp<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<VerifyOtpRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let account = state
        .auth_service
        .verify_otp(&request.email, &request.otp)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({ "account": AccountDto::from(&account) }),
        "Account verified.",
    )))
}

/// Issue a fresh one-time code, invalidating the previous one.
pub async fn resend_otp<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<EmailRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    state.auth_service.resend_otp(&request.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({}),
        "Verification code sent.",
    )))
}
