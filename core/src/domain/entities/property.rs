//! Property reference entity.
//!
//! Full listing management is out of scope for this core; bookings need
//! the property's identity and the ownership check needs its lister.
//! The slug and public code are derived explicitly at construction time
//! rather than through persistence hooks.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nb_shared::utils::slugify;

/// Property entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,

    /// Human-readable identifier shown to customers (e.g. `NB-4F7A2C`)
    pub public_code: String,

    /// URL slug derived from the title
    pub slug: String,

    pub title: String,

    pub price: f64,

    pub location: String,

    /// The Agent account that listed this property
    pub lister_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Creates a new property, deriving slug and public code from the title
    pub fn new(title: String, price: f64, location: String, lister_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            public_code: derive_public_code(),
            slug: slugify(&title),
            title,
            price,
            location,
            lister_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a short human-readable property code
fn derive_public_code() -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEF";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("NB-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_property_derives_slug_and_code() {
        let property = Property::new(
            "Sunny Loft, River View".to_string(),
            420.0,
            "Riverside".to_string(),
            Uuid::new_v4(),
        );
        assert_eq!(property.slug, "sunny-loft-river-view");
        assert!(property.public_code.starts_with("NB-"));
        assert_eq!(property.public_code.len(), 9);
    }
}
