//! POST /api/v1/auth/logout

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::handlers::ApiResult;
use crate::middleware::AuthedActor;
use crate::state::AppState;

use super::clear_refresh_cookie;

/// Revoke the stored refresh digest and expire the cookie.
pub async fn logout<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    state.auth_service.logout(actor.0.account_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(clear_refresh_cookie(state.environment))
        .json(ApiResponse::with_message(json!({}), "Logged out.")))
}
