//! Repository interfaces for data persistence.
//!
//! Traits define the contract between the domain and the storage layer;
//! each comes with an in-memory mock used by the service tests. The
//! concrete MySQL implementations live in the `nb_infra` crate.

pub mod account;
pub mod booking;
pub mod property;

pub use account::{AccountRepository, MockAccountRepository};
pub use booking::{BookingRepository, MockBookingRepository};
pub use property::{MockPropertyRepository, PropertyRepository};
