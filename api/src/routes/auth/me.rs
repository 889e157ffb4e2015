//! GET /api/v1/auth/me

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::AccountDto;
use crate::handlers::ApiResult;
use crate::middleware::AuthedActor;
use crate::state::AppState;

/// Return the authenticated account.
pub async fn me<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let account = state.auth_service.get_account(actor.0.account_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        json!({ "account": AccountDto::from(&account) }),
    )))
}
