//! Booking endpoint DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nb_core::domain::entities::booking::Booking;
use nb_core::services::CreateBookingRequest;

/// Body for POST /bookings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestDto {
    /// Property UUID or public code (e.g. `NB-4F7A2C`)
    pub property: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: Option<f64>,
    pub notes: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
}

impl From<CreateBookingRequestDto> for CreateBookingRequest {
    fn from(dto: CreateBookingRequestDto) -> Self {
        Self {
            property_ref: dto.property,
            date: dto.date,
            start_time: dto.start_time,
            end_time: dto.end_time,
            total_price: dto.total_price,
            notes: dto.notes,
            guest_name: dto.guest_name,
            guest_email: dto.guest_email,
            guest_phone: dto.guest_phone,
        }
    }
}

/// Body for PATCH /bookings/{id}/status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body for PATCH /bookings/{id}/payment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub payment_status: String,
}

/// Booking representation in responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub property_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingDto {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            property_id: booking.property_id,
            account_id: booking.account_id,
            guest_name: booking.guest.name.clone(),
            guest_email: booking.guest.email.clone(),
            date: booking.date,
            start_time: booking.slot.start_string(),
            end_time: booking.slot.end_string(),
            status: booking.status.as_str().to_string(),
            payment_status: booking.payment_status.as_str().to_string(),
            total_price: booking.total_price,
            notes: booking.notes.clone(),
            created_at: booking.created_at,
        }
    }
}
