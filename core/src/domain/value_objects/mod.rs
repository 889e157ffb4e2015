//! Value objects shared across entities and services.

pub mod actor;
pub mod credential;
pub mod time_slot;

pub use actor::Actor;
pub use credential::{sha256_hex, HashedSecret};
pub use time_slot::TimeSlot;
