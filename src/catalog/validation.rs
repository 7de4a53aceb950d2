//! Field rules for inbound create requests.
//!
//! Every rule is evaluated; violations are reported together, in field order.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::product::ProductInput;

/// Field names in the order their messages are reported.
const FIELD_ORDER: [&str; 6] = ["name", "brand", "price", "stock", "image", "category"];

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Validate for ProductInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.add("name", violation("required", "The field 'Name' is required."));
        }
        if is_blank(&self.brand) {
            errors.add("brand", violation("required", "The field 'Brand' is required."));
        }
        if self.price <= Decimal::ZERO {
            errors.add(
                "price",
                violation("range", "The field 'Price' must be greater than 0."),
            );
        }
        if self.stock < 0 {
            errors.add(
                "stock",
                violation("range", "The field 'Stock' cannot be negative."),
            );
        }
        if is_blank(&self.image) {
            errors.add("image", violation("required", "The field 'Image' is required."));
        }
        if is_blank(&self.category) {
            errors.add(
                "category",
                violation("required", "The field 'Category' is required."),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Flatten validator output into messages, in declaration order.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errors| errors.iter())
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        })
        .collect()
}

/// Validate a create request, collecting every violated rule.
pub fn validate_input(input: &ProductInput) -> CatalogResult<()> {
    input
        .validate()
        .map_err(|errors| CatalogError::ValidationFailed(messages(&errors)))
}
