//! POST /api/v1/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use nb_core::errors::AuthenticationError;
use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{RefreshRequest, SessionResponse};
use crate::handlers::{ApiError, ApiResult};
use crate::state::AppState;

use super::{refresh_cookie, REFRESH_COOKIE};

/// Rotate the refresh token and mint a new access token.
///
/// The token comes from the HTTP-only cookie; a JSON body field is
/// accepted as a fallback for non-browser clients.
pub async fn refresh<A, B, P, N>(
    req: HttpRequest,
    state: web::Data<AppState<A, B, P, N>>,
    request: Option<web::Json<RefreshRequest>>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let raw_token = req
        .cookie(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| request.and_then(|r| r.into_inner().refresh_token))
        .ok_or(ApiError(AuthenticationError::MissingCredentials.into()))?;

    let (account, pair) = state.auth_service.refresh(&raw_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            &pair.refresh_token,
            state.refresh_ttl_seconds,
            state.environment,
        ))
        .json(ApiResponse::new(SessionResponse::new(&account, &pair))))
}
