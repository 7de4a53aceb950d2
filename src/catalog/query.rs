//! Filtering and pagination over mapped products.
//!
//! # Rules
//! - search text (non-blank) matches `name` or `category`, case-sensitive substring
//! - category (non-blank) must equal the product category exactly
//! - both filters are ANDed
//! - `total` counts matches before pagination; order is never changed

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::product::Product;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    /// Number of items matching the filters, across all pages.
    pub total: usize,
}

/// A validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    search: Option<String>,
    category: Option<String>,
    page: usize,
    page_size: usize,
}

impl ProductQuery {
    /// Build a query, rejecting non-positive pagination.
    ///
    /// Blank filters are dropped. A present search text is kept untrimmed.
    pub fn new(
        search: Option<String>,
        category: Option<String>,
        page: i64,
        page_size: i64,
    ) -> CatalogResult<Self> {
        let invalid = || CatalogError::InvalidArgument("page and pageSize must be greater than 0.".into());
        if page <= 0 || page_size <= 0 {
            return Err(invalid());
        }

        Ok(Self {
            search: search.filter(|s| !s.trim().is_empty()),
            category: category.filter(|c| !c.trim().is_empty()),
            page: usize::try_from(page).map_err(|_| invalid())?,
            page_size: usize::try_from(page_size).map_err(|_| invalid())?,
        })
    }

    /// Whether a product passes both filters.
    pub fn matches(&self, product: &Product) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |text| {
            product.name.contains(text) || product.category.contains(text)
        });
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |category| product.category == category);
        search_ok && category_ok
    }

    /// Filter, count, then slice out the requested page.
    pub fn apply(&self, products: Vec<Product>) -> PagedResponse<Product> {
        let filtered: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        let total = filtered.len();
        let offset = (self.page - 1).saturating_mul(self.page_size);

        let items = filtered
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();

        PagedResponse {
            items,
            page: self.page,
            page_size: self.page_size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: "Unknown".to_string(),
            price: Decimal::from(10),
            stock: 0,
            image: String::new(),
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Laptop", "Electronics"),
            product(2, "Shirt", "clothing"),
            product(3, "Phone", "Electronics"),
            product(4, "Ring", "jewelery"),
            product(5, "Monitor", "Electronics"),
        ]
    }

    fn ids(page: &PagedResponse<Product>) -> Vec<i64> {
        page.items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_rejects_non_positive_pagination() {
        for (page, size) in [(0, 10), (1, 0), (-1, 5), (3, -2)] {
            let err = ProductQuery::new(None, None, page, size).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(_)));
            assert_eq!(err.to_string(), "page and pageSize must be greater than 0.");
        }
    }

    #[test]
    fn test_category_filter_with_pagination() {
        let query = ProductQuery::new(None, Some("Electronics".into()), 1, 1).unwrap();
        let page = query.apply(catalog());
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page), vec![1]);

        let query = ProductQuery::new(None, Some("Electronics".into()), 3, 1).unwrap();
        let page = query.apply(catalog());
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page), vec![5]);
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let query = ProductQuery::new(Some("on".into()), None, 1, 10).unwrap();
        // "Phone", "Monitor" by name; "Electronics" by category.
        assert_eq!(ids(&query.apply(catalog())), vec![1, 3, 5]);

        let query = ProductQuery::new(Some("thing".into()), None, 1, 10).unwrap();
        assert_eq!(ids(&query.apply(catalog())), vec![2]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let query = ProductQuery::new(Some("laptop".into()), None, 1, 10).unwrap();
        assert_eq!(query.apply(catalog()).total, 0);

        let query = ProductQuery::new(None, Some("electronics".into()), 1, 10).unwrap();
        assert_eq!(query.apply(catalog()).total, 0);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let query = ProductQuery::new(Some("Ph".into()), Some("Electronics".into()), 1, 10).unwrap();
        assert_eq!(ids(&query.apply(catalog())), vec![3]);

        let query = ProductQuery::new(Some("Shirt".into()), Some("Electronics".into()), 1, 10).unwrap();
        assert_eq!(query.apply(catalog()).total, 0);
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let query = ProductQuery::new(Some("   ".into()), Some("".into()), 1, 10).unwrap();
        assert_eq!(query.apply(catalog()).total, 5);
    }

    #[test]
    fn test_search_text_is_not_trimmed() {
        let query = ProductQuery::new(Some(" Phone".into()), None, 1, 10).unwrap();
        assert_eq!(query.apply(catalog()).total, 0);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let query = ProductQuery::new(None, None, 4, 2).unwrap();
        let page = query.apply(catalog());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 4);
        assert_eq!(page.page_size, 2);
    }

    #[test]
    fn test_page_size_bounds_every_page() {
        for size in 1..=6 {
            for page_no in 1..=6 {
                let query = ProductQuery::new(None, None, page_no, size).unwrap();
                let page = query.apply(catalog());
                assert!(page.items.len() <= size as usize);
                assert_eq!(page.total, 5);
            }
        }
    }

    #[test]
    fn test_paged_response_json_shape() {
        let query = ProductQuery::new(None, None, 2, 2).unwrap();
        let json = serde_json::to_value(query.apply(catalog())).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["total"], 5);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }
}
