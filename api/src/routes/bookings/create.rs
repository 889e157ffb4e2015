//! POST /api/v1/bookings

use actix_web::{web, HttpResponse};

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{BookingDto, CreateBookingRequestDto};
use crate::handlers::ApiResult;
use crate::middleware::MaybeActor;
use crate::state::AppState;

/// Book a slot on a property.
///
/// Anonymous guests may book with contact details; an authenticated
/// caller has the booking attached to their account.
pub async fn create_booking<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: MaybeActor,
    request: web::Json<CreateBookingRequestDto>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let booking = state
        .booking_service
        .create_booking(actor.0, request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(BookingDto::from(&booking))))
}
