//! The Product entity and the typed inputs the handlers pass to persistence.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored product.
///
/// Bookkeeping timestamps live in the table but are never projected into this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    /// The Product ID
    #[schema(example = 1)]
    pub id: i64,
    /// The Product name
    #[schema(example = "Tablet Samsung S9")]
    pub name: String,
    /// The Product price
    #[schema(example = 800.0)]
    pub price: f64,
    /// The Product availability
    #[schema(example = true)]
    pub availability: bool,
}

/// Fields accepted when creating a product. Availability is always defaulted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Full set of mutable fields written by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl ProductChanges {
    /// Changes that keep everything except availability, which is flipped.
    pub fn toggled_availability(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            availability: !product.availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_availability_only_flips_availability() {
        let product = Product {
            id: 7,
            name: "Monitor".to_string(),
            price: 300.0,
            availability: true,
        };
        let changes = ProductChanges::toggled_availability(&product);
        assert_eq!(changes.name, "Monitor");
        assert_eq!(changes.price, 300.0);
        assert!(!changes.availability);
    }

    #[test]
    fn product_serializes_without_timestamps() {
        let product = Product {
            id: 1,
            name: "Mouse".to_string(),
            price: 50.0,
            availability: true,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Mouse", "price": 50.0, "availability": true })
        );
    }
}
