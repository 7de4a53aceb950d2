//! In-memory store for locally created products.
//!
//! Ids are assigned as `max + 1` (or 1 when empty). Id assignment and the
//! insert happen under the same lock, so concurrent creates never collide.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::catalog::product::{Product, ProductInput, DEFAULT_BRAND};
use crate::observability::metrics;

/// Insertion-ordered product list guarded by a single mutex.
#[derive(Debug, Default)]
pub struct LocalProductStore {
    products: Mutex<Vec<Product>>,
}

impl LocalProductStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the two demo products (ids 1 and 2).
    pub fn seeded() -> Self {
        let now = Utc::now();
        let demo = |id: i64, name: &str, brand: &str, price: i64, stock: i32, image: &str| Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            price: Decimal::from(price),
            stock,
            image: image.to_string(),
            category: "Electronics".to_string(),
            created_at: now,
        };

        Self::with_products(vec![
            demo(1, "Laptop", "Dell", 1200, 10, "laptop.jpg"),
            demo(2, "Phone", "Samsung", 800, 15, "phone.jpg"),
        ])
    }

    /// A store starting from the given products, kept in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        metrics::record_local_products(products.len());
        Self {
            products: Mutex::new(products),
        }
    }

    // Every operation leaves the list consistent before releasing the guard,
    // so a poisoned lock still holds valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All products in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.lock().clone()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Store a new product and return it with its assigned id and timestamp.
    pub fn create(&self, input: ProductInput) -> Product {
        let mut products = self.lock();
        let id = products.iter().map(|p| p.id).max().map_or(1, |max| max + 1);

        let brand = if input.brand.trim().is_empty() {
            DEFAULT_BRAND.to_string()
        } else {
            input.brand
        };

        let product = Product {
            id,
            name: input.name,
            brand,
            price: input.price,
            stock: input.stock,
            image: input.image,
            category: input.category,
            created_at: Utc::now(),
        };
        products.push(product.clone());
        metrics::record_local_products(products.len());

        tracing::info!(id, name = %product.name, "Local product created");
        product
    }

    /// Remove the product with `id`. Returns whether one was found.
    pub fn delete(&self, id: i64) -> bool {
        let mut products = self.lock();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                metrics::record_local_products(products.len());
                tracing::info!(id, "Local product deleted");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
