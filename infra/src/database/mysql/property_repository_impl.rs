//! MySQL implementation of the PropertyRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use nb_core::domain::entities::property::Property;
use nb_core::errors::DomainError;
use nb_core::repositories::PropertyRepository;

use crate::database::datastore_error;

const PROPERTY_COLUMNS: &str = r#"
    id, public_code, slug, title, price, location, lister_id,
    created_at, updated_at
"#;

/// MySQL implementation of PropertyRepository
pub struct MySqlPropertyRepository {
    pool: MySqlPool,
}

impl MySqlPropertyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: &sqlx::mysql::MySqlRow) -> Result<Property, DomainError> {
        let id: String = row.try_get("id").map_err(datastore_error)?;
        let lister_id: String = row.try_get("lister_id").map_err(datastore_error)?;

        Ok(Property {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid property id: {e}")))?,
            public_code: row.try_get("public_code").map_err(datastore_error)?,
            slug: row.try_get("slug").map_err(datastore_error)?,
            title: row.try_get("title").map_err(datastore_error)?,
            price: row.try_get("price").map_err(datastore_error)?,
            location: row.try_get("location").map_err(datastore_error)?,
            lister_id: Uuid::parse_str(&lister_id)
                .map_err(|e| DomainError::internal(format!("invalid lister id: {e}")))?,
            created_at: row.try_get("created_at").map_err(datastore_error)?,
            updated_at: row.try_get("updated_at").map_err(datastore_error)?,
        })
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        let query = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_property(&r)).transpose()
    }

    async fn find_by_public_code(&self, code: &str) -> Result<Option<Property>, DomainError> {
        let query =
            format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE public_code = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_property(&r)).transpose()
    }

    async fn create(&self, property: Property) -> Result<Property, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO properties (
                id, public_code, slug, title, price, location, lister_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(property.id.to_string())
        .bind(&property.public_code)
        .bind(&property.slug)
        .bind(&property.title)
        .bind(property.price)
        .bind(&property.location)
        .bind(property.lister_id.to_string())
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await
        .map_err(datastore_error)?;

        Ok(property)
    }
}
