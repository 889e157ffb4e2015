//! Booking entity and its status state machines.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::TimeSlot;

/// Booking status
///
/// `Pending` is the only initial state. `Rejected`, `Cancelled` and
/// `Completed` are terminal. Transitions happen only through explicit
/// action by an authorized actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Whether a booking in this status still holds its slot.
    ///
    /// Cancelled and Rejected bookings release the slot; everything else
    /// participates in conflict detection.
    pub fn holds_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::Rejected)
    }

    /// Whether this status permits no further status changes
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed
        )
    }

    /// Legal state-machine edges
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Approved, Completed)
                | (Approved, Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Option<BookingStatus> {
        match value {
            "Pending" => Some(BookingStatus::Pending),
            "Approved" => Some(BookingStatus::Approved),
            "Rejected" => Some(BookingStatus::Rejected),
            "Cancelled" => Some(BookingStatus::Cancelled),
            "Completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

/// Payment status, an axis independent of the booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Payment moves forward only: Unpaid → Paid → Refunded
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Unpaid, PaymentStatus::Paid)
                | (PaymentStatus::Paid, PaymentStatus::Refunded)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    pub fn parse(value: &str) -> Option<PaymentStatus> {
        match value {
            "Unpaid" => Some(PaymentStatus::Unpaid),
            "Paid" => Some(PaymentStatus::Paid),
            "Refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// Contact details for guest bookings made without an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Booking entity
///
/// Weakly references a Property (required) and optionally an Account;
/// guest bookings carry contact details instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,

    /// The property being booked
    pub property_id: Uuid,

    /// Booking account, if the caller was authenticated
    pub account_id: Option<Uuid>,

    /// Guest contact details (name/email/phone)
    pub guest: GuestContact,

    /// Calendar day of the booking; slots never span midnight
    pub date: NaiveDate,

    /// Reserved time interval
    pub slot: TimeSlot,

    pub status: BookingStatus,

    pub payment_status: PaymentStatus,

    pub total_price: Option<f64>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new booking in the initial Pending/Unpaid state
    pub fn new(
        property_id: Uuid,
        account_id: Option<Uuid>,
        guest: GuestContact,
        date: NaiveDate,
        slot: TimeSlot,
        total_price: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            account_id,
            guest,
            date,
            slot,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            total_price,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a status transition without authorization checks.
    ///
    /// Returns `false` and leaves the booking untouched when the edge is
    /// not part of the state machine. Authorization lives in the booking
    /// service.
    pub fn transition_status(&mut self, next: BookingStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        self.updated_at = Utc::now();
        true
    }

    /// Applies a payment transition; same contract as `transition_status`.
    ///
    /// Payment stays settable on terminal bookings (a Completed booking
    /// can still be marked Paid or Refunded).
    pub fn transition_payment(&mut self, next: PaymentStatus) -> bool {
        if !self.payment_status.can_transition_to(next) {
            return false;
        }
        self.payment_status = next;
        self.updated_at = Utc::now();
        true
    }
}
