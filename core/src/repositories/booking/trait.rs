//! Booking repository trait defining the interface for booking persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

/// Repository trait for Booking entity persistence operations
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert the booking only if its slot is free.
    ///
    /// Conflict detection and insert form a single atomic unit: among
    /// existing bookings for the same property and date whose status
    /// still holds the slot (not Cancelled/Rejected), a conflict exists
    /// if any interval `[s, e)` satisfies `s < new_end && e > new_start`.
    /// Two concurrent calls for overlapping slots must never both
    /// succeed; implementations close the race with their own guard
    /// (property-row lock in MySQL, the map lock in the mock).
    ///
    /// # Returns
    /// * `Ok(Booking)` - The persisted booking
    /// * `Err(DomainError::Conflict)` - Slot unavailable, nothing persisted
    async fn insert_if_slot_free(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Find a booking by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// Persist updated booking state
    async fn update(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// List bookings made by the given account, newest first
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    /// List all bookings, newest first
    async fn list_all(&self) -> Result<Vec<Booking>, DomainError>;
}
