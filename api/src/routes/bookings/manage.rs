//! PATCH /api/v1/bookings/{id}/status and /{id}/payment

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use nb_core::domain::entities::booking::{BookingStatus, PaymentStatus};
use nb_core::errors::ValidationError;
use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::types::response::ApiResponse;

use crate::dto::{BookingDto, UpdatePaymentRequest, UpdateStatusRequest};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::AuthedActor;
use crate::state::AppState;

/// Move a booking along its lifecycle (approve, reject, cancel, complete).
pub async fn update_status<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
    path: web::Path<Uuid>,
    request: web::Json<UpdateStatusRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let next = BookingStatus::parse(&request.status).ok_or(ApiError(
        ValidationError::InvalidFormat {
            field: "status".to_string(),
        }
        .into(),
    ))?;

    let booking = state
        .booking_service
        .update_status(actor.0, path.into_inner(), next)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(BookingDto::from(&booking))))
}

/// Advance a booking's payment state.
pub async fn update_payment<A, B, P, N>(
    state: web::Data<AppState<A, B, P, N>>,
    actor: AuthedActor,
    path: web::Path<Uuid>,
    request: web::Json<UpdatePaymentRequest>,
) -> ApiResult
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let next = PaymentStatus::parse(&request.payment_status).ok_or(ApiError(
        ValidationError::InvalidFormat {
            field: "paymentStatus".to_string(),
        }
        .into(),
    ))?;

    let booking = state
        .booking_service
        .set_payment_status(actor.0, path.into_inner(), next)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(BookingDto::from(&booking))))
}
