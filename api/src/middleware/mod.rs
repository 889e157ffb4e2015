//! Request middleware: JWT extraction and CORS.

pub mod auth;
pub mod cors;

pub use auth::{client_event, AuthedActor, MaybeActor};
