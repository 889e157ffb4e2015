//! Property repository trait.
//!
//! Listing management is out of scope; the core only resolves properties
//! for booking creation and ownership checks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::property::Property;
use crate::errors::DomainError;

/// Repository trait for Property lookups
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find a property by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError>;

    /// Find a property by its human-readable public code (e.g. `NB-4F7A2C`)
    async fn find_by_public_code(&self, code: &str) -> Result<Option<Property>, DomainError>;

    /// Create a new property
    async fn create(&self, property: Property) -> Result<Property, DomainError>;
}
