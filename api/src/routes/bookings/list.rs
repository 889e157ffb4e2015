//! GET /api/v1/bookings (admin) and /api/v1/bookings/mine

use actix_web::{web, HttpResponse};
use serde_json::json;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::BookingDto;
use crate::handlers::ApiResult;
use crate::middleware::AuthedActor;
use crate::state::AppState;

/// Bookings belonging to the authenticated account.
pub async fn list_my_bookings<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let bookings = state.booking_service.list_for_account(actor.0).await?;
    let bookings: Vec<BookingDto> = bookings.iter().map(BookingDto::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::new(json!({ "bookings": bookings }))))
}

/// Every booking in the system; admin only.
pub async fn list_all_bookings<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let bookings = state.booking_service.list_all(actor.0).await?;
    let bookings: Vec<BookingDto> = bookings.iter().map(BookingDto::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::new(json!({ "bookings": bookings }))))
}
