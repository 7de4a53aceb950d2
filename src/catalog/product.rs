//! Internal product types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brand used whenever none is known.
pub const DEFAULT_BRAND: &str = "Unknown";

/// The canonical product record served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub price: Decimal,
    pub stock: i32,
    /// Image URI.
    pub image: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Inbound body for creating a local product.
///
/// Missing fields fall back to empty/zero so validation can report them.
/// `id` and `createdAt` are not part of the input; if a client sends them
/// they are ignored like any other unknown field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: 3,
            name: "Tablet".into(),
            brand: "Acme".into(),
            price: Decimal::new(29999, 2),
            stock: 5,
            image: "t.jpg".into(),
            category: "Electronics".into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["price"], 299.99);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_input_defaults_missing_fields() {
        let input: ProductInput =
            serde_json::from_str(r#"{"id": 99, "name": "Tablet", "createdAt": "whenever"}"#).unwrap();
        assert_eq!(input.name, "Tablet");
        assert_eq!(input.brand, "");
        assert_eq!(input.price, Decimal::ZERO);
        assert_eq!(input.stock, 0);
    }
}
