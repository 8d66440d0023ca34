//! # Validation Module
//!
//! Boundary validation for product data entering the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View (TypeScript)                                            │
//! │  └── Disables "add to cart" when stock is 0                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog boundary (CatalogProduct → ProductSnapshot)          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules + coercion                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartEngine::add_item                                         │
//! │  └── THIS MODULE again (snapshots can be built by hand)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_id, validate_stock_limit};
//!
//! assert!(validate_product_id("p1").is_ok());
//! assert!(validate_stock_limit(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{DiscountRate, Money};
use crate::types::{CartLine, ProductSnapshot};
use crate::{MAX_DISCOUNT_BPS, MAX_STOCK_LIMIT, MAX_TITLE_LENGTH, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id: must contain something other than whitespace.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_TITLE_LENGTH`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - At most [`MAX_UNIT_PRICE_CENTS`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock limit.
///
/// ## Rules
/// - Zero is allowed; such a product can never be added
/// - At most [`MAX_STOCK_LIMIT`]
pub fn validate_stock_limit(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    if stock > MAX_STOCK_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK_LIMIT,
        });
    }

    Ok(())
}

/// Validates a discount rate (0% to 100%).
pub fn validate_discount(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > MAX_DISCOUNT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a line quantity against its stock limit.
///
/// ## Rules
/// - `1 <= quantity <= stock_limit`
pub fn validate_line_quantity(quantity: i64, stock_limit: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > stock_limit {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: stock_limit,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a product snapshot.
pub fn validate_product(product: &ProductSnapshot) -> ValidationResult<()> {
    validate_product_id(product.id.as_str())?;
    validate_title(&product.title)?;
    validate_price(product.unit_price)?;
    validate_stock_limit(product.stock_limit)?;
    validate_discount(product.discount)?;
    Ok(())
}

/// Validates a line read back from storage.
///
/// Titles are not checked here: a stored line keeps whatever title it was
/// added with.
pub fn validate_line(line: &CartLine) -> ValidationResult<()> {
    validate_product_id(line.id.as_str())?;
    validate_price(line.unit_price)?;
    validate_stock_limit(line.stock_limit)?;
    validate_discount(line.discount)?;
    validate_line_quantity(line.quantity, line.stock_limit)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
