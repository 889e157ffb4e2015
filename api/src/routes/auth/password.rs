//! Password flows: forgot, reset and change.

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{ChangePasswordRequest, EmailRequest, ResetPasswordRequest, SessionResponse};
use crate::handlers::ApiResult;
use crate::middleware::AuthedActor;
use crate::state::AppState;

use super::refresh_cookie;

/// POST /api/v1/auth/password/forgot
///
/// Email a single-use reset link to the account.
pub async fn forgot_password<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<EmailRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    state.auth_service.forgot_password(&request.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({}),
        "Password reset email sent.",
    )))
}

/// POST /api/v1/auth/password/reset
///
/// Consume the reset token and set a new password. All existing
/// sessions are revoked; the user logs in again.
pub async fn reset_password<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<ResetPasswordRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    state
        .auth_service
        .reset_password(&request.token, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({}),
        "Password updated. Please log in with your new password.",
    )))
}

/// POST /api/v1/auth/password/change
///
/// Requires the current password; rotates the session so other devices
/// are signed out.
pub async fn change_password<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
    request: web::Json<ChangePasswordRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let (account, pair) = state
        .auth_service
        .change_password(actor.0.account_id, &request.old_password, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            &pair.refresh_token,
            state.refresh_ttl_seconds,
            state.environment,
        ))
        .json(ApiResponse::with_message(
            SessionResponse::new(&account, &pair),
            "Password updated.",
        )))
}
