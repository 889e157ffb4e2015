//! Request handling support: the domain-error to HTTP mapping.

pub mod error;

pub use error::{ApiError, ApiResult};
