//! POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::{NotificationDispatcher, RegisterRequest};
use nb_shared::types::response::ApiResponse;

use crate::dto::{AccountDto, RegisterRequestDto};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Create an unverified account and email it a one-time code.
pub async fn register<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<RegisterRequestDto>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let request = request.into_inner();
    let account = state
        .auth_service
        .register(RegisterRequest {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        json!({ "account": AccountDto::from(&account) }),
        "Account created. Check your email for the verification code.",
    )))
}
