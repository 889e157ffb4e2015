//! Domain entities for the NestBook system.

pub mod account;
pub mod booking;
pub mod property;
pub mod token;
