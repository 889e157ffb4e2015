//! End-to-end tests for the booking service against the mock repositories.

use std::sync::Arc;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::booking::{BookingStatus, PaymentStatus};
use crate::domain::entities::property::Property;
use crate::domain::value_objects::Actor;
use crate::errors::{
    AuthorizationError, ConflictError, DomainError, NotFoundError, ValidationError,
};
use crate::repositories::{MockBookingRepository, MockPropertyRepository, PropertyRepository};

use super::super::service::{BookingService, CreateBookingRequest};

type TestService = BookingService<MockBookingRepository, MockPropertyRepository>;

struct Fixture {
    service: TestService,
    property: Property,
    lister: Actor,
    admin: Actor,
    stranger: Actor,
}

async fn fixture() -> Fixture {
    let booking_repo = Arc::new(MockBookingRepository::new());
    let property_repo = Arc::new(MockPropertyRepository::new());

    let lister_id = Uuid::new_v4();
    let property = property_repo
        .create(Property::new(
            "Harbor View Flat".to_string(),
            300.0,
            "Harborside".to_string(),
            lister_id,
        ))
        .await
        .unwrap();

    Fixture {
        service: BookingService::new(booking_repo, property_repo),
        property,
        lister: Actor::new(lister_id, Role::Agent),
        admin: Actor::new(Uuid::new_v4(), Role::Admin),
        stranger: Actor::new(Uuid::new_v4(), Role::User),
    }
}

fn request(property_ref: &str, start: &str, end: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        property_ref: property_ref.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        total_price: Some(300.0),
        notes: None,
        guest_name: Some("Guest".to_string()),
        guest_email: Some("guest@example.com".to_string()),
        guest_phone: None,
    }
}

#[tokio::test]
async fn test_booking_scenario_from_overlap_to_boundary_touch() {
    let fx = fixture().await;
    let property_id = fx.property.id.to_string();

    // 10:00-11:00 succeeds
    fx.service
        .create_booking(None, request(&property_id, "10:00", "11:00"))
        .await
        .unwrap();

    // 10:30-11:30 overlaps and is rejected
    let overlap = fx
        .service
        .create_booking(None, request(&property_id, "10:30", "11:30"))
        .await;
    assert!(matches!(
        overlap,
        Err(DomainError::Conflict(ConflictError::SlotUnavailable))
    ));

    // 11:00-12:00 touches the boundary and succeeds
    fx.service
        .create_booking(None, request(&property_id, "11:00", "12:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_slot_rejected_before_conflict_check() {
    let fx = fixture().await;
    // Invalid slot on a property reference that does not even exist:
    // the validation error wins, proving the slot is checked first
    let result = fx
        .service
        .create_booking(None, request("no-such-property", "11:00", "10:00"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::InvalidTimeSlot))
    ));
}

#[tokio::test]
async fn test_unknown_property_is_not_found() {
    let fx = fixture().await;
    let result = fx
        .service
        .create_booking(None, request(&Uuid::new_v4().to_string(), "10:00", "11:00"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound(NotFoundError::Property))
    ));
}

#[tokio::test]
async fn test_booking_by_public_code_and_actor_attachment() {
    let fx = fixture().await;
    let booking = fx
        .service
        .create_booking(
            Some(fx.stranger),
            request(&fx.property.public_code, "09:00", "10:00"),
        )
        .await
        .unwrap();
    assert_eq!(booking.account_id, Some(fx.stranger.account_id));
    assert_eq!(booking.property_id, fx.property.id);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
}

#[tokio::test]
async fn test_stranger_cannot_approve_admin_can() {
    let fx = fixture().await;
    let booking = fx
        .service
        .create_booking(None, request(&fx.property.id.to_string(), "10:00", "11:00"))
        .await
        .unwrap();

    // A plain user who is neither admin nor the lister is refused
    let refused = fx
        .service
        .update_status(fx.stranger, booking.id, BookingStatus::Approved)
        .await;
    assert!(matches!(
        refused,
        Err(DomainError::Authorization(AuthorizationError::NotBookingManager))
    ));

    // The same action by an Admin succeeds: Pending -> Approved
    let approved = fx
        .service
        .update_status(fx.admin, booking.id, BookingStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_lister_can_manage_own_property_bookings() {
    let fx = fixture().await;
    let booking = fx
        .service
        .create_booking(None, request(&fx.property.id.to_string(), "10:00", "11:00"))
        .await
        .unwrap();

    let approved = fx
        .service
        .update_status(fx.lister, booking.id, BookingStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let completed = fx
        .service
        .update_status(fx.lister, booking.id, BookingStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_illegal_transition_is_conflict_and_mutates_nothing() {
    let fx = fixture().await;
    let booking = fx
        .service
        .create_booking(None, request(&fx.property.id.to_string(), "10:00", "11:00"))
        .await
        .unwrap();

    let result = fx
        .service
        .update_status(fx.admin, booking.id, BookingStatus::Completed)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Conflict(ConflictError::InvalidStatusTransition { .. }))
    ));

    // Still Pending
    let listed = fx.service.list_all(fx.admin).await.unwrap();
    assert_eq!(listed[0].status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_payment_axis_authorized_and_forward_only() {
    let fx = fixture().await;
    let booking = fx
        .service
        .create_booking(None, request(&fx.property.id.to_string(), "10:00", "11:00"))
        .await
        .unwrap();

    let refused = fx
        .service
        .set_payment_status(fx.stranger, booking.id, PaymentStatus::Paid)
        .await;
    assert!(matches!(refused, Err(DomainError::Authorization(_))));

    let paid = fx
        .service
        .set_payment_status(fx.lister, booking.id, PaymentStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let backwards = fx
        .service
        .set_payment_status(fx.admin, booking.id, PaymentStatus::Unpaid)
        .await;
    assert!(matches!(
        backwards,
        Err(DomainError::Conflict(ConflictError::InvalidPaymentTransition { .. }))
    ));
}

#[tokio::test]
async fn test_cancelled_slot_can_be_rebooked() {
    let fx = fixture().await;
    let property_id = fx.property.id.to_string();
    let booking = fx
        .service
        .create_booking(None, request(&property_id, "10:00", "11:00"))
        .await
        .unwrap();

    fx.service
        .update_status(fx.admin, booking.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    fx.service
        .create_booking(None, request(&property_id, "10:00", "11:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_listing_scopes() {
    let fx = fixture().await;
    let property_id = fx.property.id.to_string();

    fx.service
        .create_booking(Some(fx.stranger), request(&property_id, "09:00", "10:00"))
        .await
        .unwrap();
    fx.service
        .create_booking(None, request(&property_id, "10:00", "11:00"))
        .await
        .unwrap();

    let mine = fx.service.list_for_account(fx.stranger).await.unwrap();
    assert_eq!(mine.len(), 1);

    let all = fx.service.list_all(fx.admin).await.unwrap();
    assert_eq!(all.len(), 2);

    let refused = fx.service.list_all(fx.stranger).await;
    assert!(matches!(
        refused,
        Err(DomainError::Authorization(AuthorizationError::AdminOnly))
    ));
}
