//! Booking creation with slot-conflict checking, plus the status and
//! payment state machines with actor authorization.

mod service;

#[cfg(test)]
mod tests;

pub use service::{BookingService, CreateBookingRequest};
