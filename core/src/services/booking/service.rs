//! Booking service implementation

use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus, GuestContact, PaymentStatus};
use crate::domain::entities::property::Property;
use crate::domain::value_objects::{Actor, TimeSlot};
use crate::errors::{AuthorizationError, ConflictError, DomainResult, NotFoundError};
use crate::repositories::{BookingRepository, PropertyRepository};

/// Request to create a booking.
///
/// `property_ref` accepts either the property UUID or its public code.
/// Guest contact fields are used when no actor is present.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub property_ref: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: Option<f64>,
    pub notes: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
}

/// Service for the booking lifecycle
pub struct BookingService<B, P>
where
    B: BookingRepository,
    P: PropertyRepository,
{
    booking_repository: Arc<B>,
    property_repository: Arc<P>,
}

impl<B, P> BookingService<B, P>
where
    B: BookingRepository,
    P: PropertyRepository,
{
    pub fn new(booking_repository: Arc<B>, property_repository: Arc<P>) -> Self {
        Self {
            booking_repository,
            property_repository,
        }
    }

    /// Resolve a property reference: UUID first, then public code
    async fn resolve_property(&self, reference: &str) -> DomainResult<Property> {
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(property) = self.property_repository.find_by_id(id).await? {
                return Ok(property);
            }
        }
        self.property_repository
            .find_by_public_code(reference)
            .await?
            .ok_or_else(|| NotFoundError::Property.into())
    }

    /// Create a booking for the given slot.
    ///
    /// Order of checks: slot validity (end > start, parseable times)
    /// before anything else, then property resolution, then the atomic
    /// conflict-checked insert. On conflict nothing is persisted.
    pub async fn create_booking(
        &self,
        actor: Option<Actor>,
        request: CreateBookingRequest,
    ) -> DomainResult<Booking> {
        let slot = TimeSlot::parse(&request.start_time, &request.end_time)?;
        let property = self.resolve_property(&request.property_ref).await?;

        let booking = Booking::new(
            property.id,
            actor.map(|a| a.account_id),
            GuestContact {
                name: request.guest_name,
                email: request.guest_email,
                phone: request.guest_phone,
            },
            request.date,
            slot,
            request.total_price,
            request.notes,
        );

        let booking = self.booking_repository.insert_if_slot_free(booking).await?;
        info!(
            booking_id = %booking.id,
            property_id = %property.id,
            date = %booking.date,
            "booking created"
        );
        Ok(booking)
    }

    /// Only an Admin or the property's lister may mutate a booking
    async fn authorize_manager(&self, actor: Actor, booking: &Booking) -> DomainResult<()> {
        if actor.is_admin() {
            return Ok(());
        }
        let property = self
            .property_repository
            .find_by_id(booking.property_id)
            .await?
            .ok_or(NotFoundError::Property)?;
        if property.lister_id == actor.account_id {
            Ok(())
        } else {
            Err(AuthorizationError::NotBookingManager.into())
        }
    }

    /// Transition the booking status.
    ///
    /// Authorization is checked before the transition; an illegal edge
    /// fails with a conflict and mutates nothing.
    pub async fn update_status(
        &self,
        actor: Actor,
        booking_id: Uuid,
        next: BookingStatus,
    ) -> DomainResult<Booking> {
        let mut booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(NotFoundError::Booking)?;

        self.authorize_manager(actor, &booking).await?;

        let from = booking.status;
        if !booking.transition_status(next) {
            return Err(ConflictError::InvalidStatusTransition {
                from: from.as_str().to_string(),
                to: next.as_str().to_string(),
            }
            .into());
        }

        let booking = self.booking_repository.update(booking).await?;
        info!(
            booking_id = %booking.id,
            from = from.as_str(),
            to = next.as_str(),
            "booking status changed"
        );
        Ok(booking)
    }

    /// Transition the payment status (independent axis, forward only)
    pub async fn set_payment_status(
        &self,
        actor: Actor,
        booking_id: Uuid,
        next: PaymentStatus,
    ) -> DomainResult<Booking> {
        let mut booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(NotFoundError::Booking)?;

        self.authorize_manager(actor, &booking).await?;

        let from = booking.payment_status;
        if !booking.transition_payment(next) {
            return Err(ConflictError::InvalidPaymentTransition {
                from: from.as_str().to_string(),
                to: next.as_str().to_string(),
            }
            .into());
        }

        self.booking_repository.update(booking).await
    }

    /// Bookings made by the calling account, newest first
    pub async fn list_for_account(&self, actor: Actor) -> DomainResult<Vec<Booking>> {
        self.booking_repository.list_by_account(actor.account_id).await
    }

    /// All bookings; Admin only
    pub async fn list_all(&self, actor: Actor) -> DomainResult<Vec<Booking>> {
        if !actor.is_admin() {
            return Err(AuthorizationError::AdminOnly.into());
        }
        self.booking_repository.list_all().await
    }
}
