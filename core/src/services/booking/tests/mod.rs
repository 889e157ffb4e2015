//! Booking service tests

mod service_tests;
