//! Mock implementation of PropertyRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::property::Property;
use crate::errors::DomainError;

use super::trait_::PropertyRepository;

/// Mock property repository for testing
pub struct MockPropertyRepository {
    properties: Arc<RwLock<HashMap<Uuid, Property>>>,
}

impl MockPropertyRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            properties: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MockPropertyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        let properties = self.properties.read().await;
        Ok(properties.get(&id).cloned())
    }

    async fn find_by_public_code(&self, code: &str) -> Result<Option<Property>, DomainError> {
        let properties = self.properties.read().await;
        Ok(properties.values().find(|p| p.public_code == code).cloned())
    }

    async fn create(&self, property: Property) -> Result<Property, DomainError> {
        let mut properties = self.properties.write().await;
        properties.insert(property.id, property.clone());
        Ok(property)
    }
}
