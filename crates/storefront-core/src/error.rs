//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CartError        - Rejected cart mutations                        │
//! │  ├── ValidationError  - Product boundary failures                      │
//! │  └── StoreError       - Snapshot load/save failures                    │
//! │                                                                         │
//! │  App errors (apps/storefront)                                          │
//! │  └── ApiError         - What the views see (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CartError` never escapes [`CartEngine`](crate::CartEngine) as an `Err`; the
//! engine turns it into a notification and a
//! [`MutationOutcome::Rejected`](crate::MutationOutcome) value.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart mutation is rejected.
///
/// Every variant leaves the cart exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The resulting quantity would exceed the line's stock limit.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Mug x3 (stock 5)
    ///      │
    ///      ▼
    /// Add Mug x3 → 6 requested
    ///      │
    ///      ▼
    /// StockExceeded { available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// View shows: "Only 5 of Mug available in stock"
    /// ```
    #[error("Only {available} of {title} available in stock (requested {requested})")]
    StockExceeded {
        product_id: String,
        title: String,
        available: i64,
        requested: i64,
    },

    /// A new product would take the cart past its line limit.
    #[error("Cart cannot have more than {max} products")]
    CartFull { max: usize },

    /// The product handed to `add_item` failed boundary validation.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ValidationError),
}

impl CartError {
    /// Message shown to the shopper when this rejection happens.
    pub fn user_message(&self) -> String {
        match self {
            CartError::StockExceeded {
                title, available, ..
            } => format!("Only {} of {} available in stock", available, title),
            CartError::CartFull { max } => {
                format!("Cart cannot have more than {} products", max)
            }
            CartError::InvalidProduct(e) => format!("Cannot add product: {}", e),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for data crossing the catalog → cart boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors raised by [`CartStore`](crate::CartStore) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored snapshot is not an ordered list of cart lines.
    ///
    /// ## When This Occurs
    /// - Someone hand-edited the snapshot file
    /// - The payload is an object or string instead of an array
    /// - A record is missing required fields
    #[error("Corrupt cart snapshot: {0}")]
    Corrupt(String),

    /// Reading or writing the underlying medium failed.
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// The cart could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
