//! # NestBook Shared
//!
//! Cross-cutting types shared by every layer of the NestBook backend:
//! configuration structs, the API response envelope, and small validation
//! helpers.

pub mod config;
pub mod types;
pub mod utils;
