//! MySQL implementation of the BookingRepository trait.
//!
//! The conflict-checked insert runs in a transaction that first locks
//! the property row. Every insert for the same property serializes on
//! that lock, so the overlap check and the insert form one atomic unit
//! and two overlapping bookings can never both commit.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use nb_core::domain::entities::booking::{Booking, BookingStatus, GuestContact, PaymentStatus};
use nb_core::domain::value_objects::TimeSlot;
use nb_core::errors::{ConflictError, DomainError, NotFoundError};
use nb_core::repositories::BookingRepository;

use crate::database::datastore_error;

const BOOKING_COLUMNS: &str = r#"
    id, property_id, account_id,
    guest_name, guest_email, guest_phone,
    booking_date, start_time, end_time,
    status, payment_status, total_price, notes,
    created_at, updated_at
"#;

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &sqlx::mysql::MySqlRow) -> Result<Booking, DomainError> {
        let id: String = row.try_get("id").map_err(datastore_error)?;
        let property_id: String = row.try_get("property_id").map_err(datastore_error)?;
        let account_id: Option<String> = row.try_get("account_id").map_err(datastore_error)?;
        let status: String = row.try_get("status").map_err(datastore_error)?;
        let payment_status: String = row.try_get("payment_status").map_err(datastore_error)?;
        let start: NaiveTime = row.try_get("start_time").map_err(datastore_error)?;
        let end: NaiveTime = row.try_get("end_time").map_err(datastore_error)?;

        Ok(Booking {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid booking id: {e}")))?,
            property_id: Uuid::parse_str(&property_id)
                .map_err(|e| DomainError::internal(format!("invalid property id: {e}")))?,
            account_id: account_id
                .map(|s| Uuid::parse_str(&s))
                .transpose()
                .map_err(|e| DomainError::internal(format!("invalid account id: {e}")))?,
            guest: GuestContact {
                name: row.try_get("guest_name").map_err(datastore_error)?,
                email: row.try_get("guest_email").map_err(datastore_error)?,
                phone: row.try_get("guest_phone").map_err(datastore_error)?,
            },
            date: row.try_get("booking_date").map_err(datastore_error)?,
            slot: TimeSlot::new(start, end)
                .map_err(|_| DomainError::internal("stored slot has end <= start"))?,
            status: BookingStatus::parse(&status)
                .ok_or_else(|| DomainError::internal(format!("unknown status: {status}")))?,
            payment_status: PaymentStatus::parse(&payment_status).ok_or_else(|| {
                DomainError::internal(format!("unknown payment status: {payment_status}"))
            })?,
            total_price: row.try_get("total_price").map_err(datastore_error)?,
            notes: row.try_get("notes").map_err(datastore_error)?,
            created_at: row.try_get("created_at").map_err(datastore_error)?,
            updated_at: row.try_get("updated_at").map_err(datastore_error)?,
        })
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn insert_if_slot_free(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut tx = self.pool.begin().await.map_err(datastore_error)?;

        // Lock the property row: all inserts for this property serialize here
        let property = sqlx::query("SELECT id FROM properties WHERE id = ? FOR UPDATE")
            .bind(booking.property_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(datastore_error)?;
        if property.is_none() {
            return Err(NotFoundError::Property.into());
        }

        // Half-open overlap among bookings that still hold their slot
        let conflict_row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE property_id = ?
                  AND booking_date = ?
                  AND status NOT IN ('Cancelled', 'Rejected')
                  AND start_time < ?
                  AND end_time > ?
            ) AS conflict
            "#,
        )
        .bind(booking.property_id.to_string())
        .bind(booking.date)
        .bind(booking.slot.end)
        .bind(booking.slot.start)
        .fetch_one(&mut *tx)
        .await
        .map_err(datastore_error)?;

        let conflict: i8 = conflict_row.try_get("conflict").map_err(datastore_error)?;
        if conflict == 1 {
            return Err(ConflictError::SlotUnavailable.into());
        }

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, property_id, account_id,
                guest_name, guest_email, guest_phone,
                booking_date, start_time, end_time,
                status, payment_status, total_price, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id.to_string())
        .bind(booking.property_id.to_string())
        .bind(booking.account_id.map(|id| id.to_string()))
        .bind(&booking.guest.name)
        .bind(&booking.guest.email)
        .bind(&booking.guest.phone)
        .bind(booking.date)
        .bind(booking.slot.start)
        .bind(booking.slot.end)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(booking.total_price)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(datastore_error)?;

        tx.commit().await.map_err(datastore_error)?;
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_booking(&r)).transpose()
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = ?,
                payment_status = ?,
                total_price = ?,
                notes = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(booking.total_price)
        .bind(&booking.notes)
        .bind(booking.updated_at)
        .bind(booking.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(datastore_error)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::Booking.into());
        }
        Ok(booking)
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE account_id = ? ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(datastore_error)?;
        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(datastore_error)?;
        rows.iter().map(Self::row_to_booking).collect()
    }
}
