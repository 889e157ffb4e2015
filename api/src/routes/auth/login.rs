//! POST /api/v1/auth/login

use actix_web::{web, HttpRequest, HttpResponse};

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{LoginRequest, SessionResponse};
use crate::handlers::ApiResult;
use crate::middleware::client_event;
use crate::state::AppState;

use super::refresh_cookie;

/// Verify credentials and open a session.
///
/// The access token is returned in the body; the refresh token only in
/// the HTTP-only cookie.
pub async fn login<A, B, P, N>(
    req: HttpRequest,
    state: web::Data<AppState<A, B, P, N>>,
    request: web::Json<LoginRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let (account, pair) = state
        .auth_service
        .login(&request.email, &request.password, client_event(&req))
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            &pair.refresh_token,
            state.refresh_ttl_seconds,
            state.environment,
        ))
        .json(ApiResponse::new(SessionResponse::new(&account, &pair))))
}
