use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single catalog entry. The `id` is caller-assigned and unique across the
/// catalog; timestamps are stamped by the service, never taken from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub brand: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "unix_epoch")]
    pub updated_at: DateTime<Utc>,
}

// Client payloads may omit timestamps; the service overwrites them anyway.
fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Product {
    /// Check every field rule in one pass so the caller sees all violations
    /// at once, in a fixed order. Pure: no I/O, no mutation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut failures = Vec::new();

        if self.id < 0 {
            failures.push("Id should not be less than 0".to_string());
        }
        if self.brand.is_empty() {
            failures.push("Brand should not be empty".to_string());
        }
        if self.category.is_empty() {
            failures.push("Category should not be empty".to_string());
        }
        if self.quantity < 0 {
            failures.push("Quantity should not be less than 0".to_string());
        }
        if self.price < 0.0 {
            failures.push("Price should not be less than 0".to_string());
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> Product {
        Product {
            id: 1,
            brand: "A".to_string(),
            category: "A".to_string(),
            quantity: 1,
            price: 10.0,
            created_at: unix_epoch(),
            updated_at: unix_epoch(),
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(valid_product().validate().is_ok());
    }

    #[test]
    fn reports_all_violations_in_rule_order() {
        let product = Product {
            id: -3,
            brand: "C".to_string(),
            category: String::new(),
            quantity: -1,
            price: 20.0,
            ..valid_product()
        };

        let failures = product.validate().unwrap_err();
        assert_eq!(
            failures,
            vec![
                "Id should not be less than 0",
                "Category should not be empty",
                "Quantity should not be less than 0",
            ]
        );
    }

    #[test]
    fn reports_every_rule_when_all_fields_are_invalid() {
        let product = Product {
            id: -1,
            brand: String::new(),
            category: String::new(),
            quantity: -1,
            price: -0.5,
            ..valid_product()
        };

        let failures = product.validate().unwrap_err();
        assert_eq!(failures.len(), 5);
        assert_eq!(failures[0], "Id should not be less than 0");
        assert_eq!(failures[4], "Price should not be less than 0");
    }

    #[test]
    fn zero_quantity_and_price_are_allowed() {
        let product = Product {
            quantity: 0,
            price: 0.0,
            ..valid_product()
        };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn serializes_timestamps_in_camel_case() {
        let json = serde_json::to_value(valid_product()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn deserializes_payload_without_timestamps() {
        let product: Product = serde_json::from_str(
            r#"{"id": 3, "brand": "C", "category": "C", "quantity": 3, "price": 30.0}"#,
        )
        .unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.created_at, unix_epoch());
    }
}
