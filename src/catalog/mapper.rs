//! Upstream → internal schema mapping.
//!
//! The catalog API never supplies brand or stock, so every mapped product
//! gets [`DEFAULT_BRAND`] and a stock of 0. Both the listing and the
//! single-item paths stamp `createdAt` with the caller-supplied request time.

use chrono::{DateTime, Utc};

use crate::catalog::product::{Product, DEFAULT_BRAND};
use crate::upstream::ExternalProduct;

/// Map one upstream record.
pub fn map_product(external: ExternalProduct, created_at: DateTime<Utc>) -> Product {
    Product {
        id: external.id,
        name: external.title,
        brand: DEFAULT_BRAND.to_string(),
        price: external.price,
        stock: 0,
        image: external.image,
        category: external.category,
        created_at,
    }
}

/// Map a listing, preserving upstream order. All items share one timestamp.
pub fn map_products(external: Vec<ExternalProduct>, created_at: DateTime<Utc>) -> Vec<Product> {
    external
        .into_iter()
        .map(|p| map_product(p, created_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::Rating;
    use rust_decimal::Decimal;

    fn external(id: i64, title: &str) -> ExternalProduct {
        ExternalProduct {
            id,
            title: title.to_string(),
            price: Decimal::new(1995, 2),
            description: "ignored".to_string(),
            category: "jewelery".to_string(),
            image: format!("https://img.example/{id}.jpg"),
            rating: Rating {
                rate: Decimal::new(46, 1),
                count: 400,
            },
        }
    }

    #[test]
    fn test_map_copies_and_defaults() {
        let now = Utc::now();
        let product = map_product(external(5, "Ring"), now);

        assert_eq!(product.id, 5);
        assert_eq!(product.name, "Ring");
        assert_eq!(product.brand, "Unknown");
        assert_eq!(product.price, Decimal::new(1995, 2));
        assert_eq!(product.stock, 0);
        assert_eq!(product.image, "https://img.example/5.jpg");
        assert_eq!(product.category, "jewelery");
        assert_eq!(product.created_at, now);
    }

    #[test]
    fn test_map_products_keeps_order() {
        let now = Utc::now();
        let products = map_products(vec![external(3, "c"), external(1, "a"), external(2, "b")], now);
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(products.iter().all(|p| p.created_at == now));
    }
}
