//! Booking route handlers.

pub mod create;
pub mod list;
pub mod manage;
