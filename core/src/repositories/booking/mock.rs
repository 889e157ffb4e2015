//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::{ConflictError, DomainError, NotFoundError};

use super::trait_::BookingRepository;

/// Mock booking repository for testing
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn insert_if_slot_free(&self, booking: Booking) -> Result<Booking, DomainError> {
        // Conflict check and insert happen under one write lock, matching
        // the transaction guarantee of the MySQL implementation.
        let mut bookings = self.bookings.write().await;

        let conflict = bookings.values().any(|existing| {
            existing.property_id == booking.property_id
                && existing.date == booking.date
                && existing.status.holds_slot()
                && existing.slot.overlaps(&booking.slot)
        });
        if conflict {
            return Err(ConflictError::SlotUnavailable.into());
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        if !bookings.contains_key(&booking.id) {
            return Err(NotFoundError::Booking.into());
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.account_id == Some(account_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}
