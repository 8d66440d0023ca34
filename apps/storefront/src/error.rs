//! # Error Types
//!
//! `ApiError` is what a command answers with when it fails; `AppError` covers
//! startup (config, storage location, stdio).
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  View                        Rust Backend                               │
//! │  ────                        ────────────                               │
//! │                                                                         │
//! │  {"command":"add_to_cart", ...}                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Malformed JSON? ──── serde_json::Error ────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Bad catalog data? ── ValidationError ────────► ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Engine (rejections become notifications, not errors)           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CartResponse ─────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"code":"VALIDATION_ERROR","message":"Cannot add product: ..."}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CartError, StoreError, ValidationError};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from a command.
///
/// Stock rejections never show up here: the engine reports them as
/// notifications on an otherwise normal `CartResponse`.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Cannot add product: title is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Catalog data failed boundary validation
    ValidationError,

    /// Request line was not a valid command
    BadRequest,

    /// The reply could not be produced
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Uses the same wording the engine puts in its rejection notifications.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(CartError::InvalidProduct(err).user_message())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid request: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Failures that stop the app before or outside command handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file unreadable or semantically invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file is not valid TOML.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Cart storage could not be located.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// stdin/stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not even an error reply could be encoded.
    #[error("Failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience type alias for startup results.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_shopper_message() {
        let err: ApiError = ValidationError::Negative {
            field: "price".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cannot add product: price must not be negative");
    }

    #[test]
    fn test_json_error_is_bad_request() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(err.message.starts_with("Invalid request: "));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_value(ApiError::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "nope");

        let json = serde_json::to_value(ApiError::internal("boom")).unwrap();
        assert_eq!(json["code"], "INTERNAL");
    }

    #[test]
    fn test_store_error_surfaces_at_startup() {
        let err: AppError = StoreError::Io("no data dir".to_string()).into();
        assert_eq!(err.to_string(), "Storage I/O failed: no data dir");
    }
}
