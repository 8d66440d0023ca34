//! # Snapshot Codec
//!
//! The persisted cart is a JSON array of [`CartLine`] records:
//!
//! ```json
//! [
//!   { "id": "p1", "title": "Mug", "unitPriceCents": 1000, "thumbnailUrl": "",
//!     "stockLimit": 5, "discountBps": 0, "quantity": 3,
//!     "addedAt": "2026-01-05T10:00:00Z" }
//! ]
//! ```
//!
//! Decoding is structural only. Invariant checks happen in
//! [`Cart::restore`](crate::Cart::restore).

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::types::CartLine;

/// Serializes lines into the snapshot format.
pub fn encode(lines: &[CartLine]) -> StoreResult<String> {
    Ok(serde_json::to_string(lines)?)
}

/// Parses a snapshot.
///
/// ## Errors
/// `StoreError::Corrupt` when the text is not JSON, not an array, or an
/// element is not line-shaped.
pub fn decode(raw: &str) -> StoreResult<Vec<CartLine>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| StoreError::Corrupt(format!("not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(StoreError::Corrupt(format!(
                "expected an array of cart lines, found {}",
                kind_of(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<CartLine>(item)
                .map_err(|e| StoreError::Corrupt(format!("line {}: {}", index, e)))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cart, DiscountRate, Money, ProductSnapshot};

    #[test]
    fn test_encode_then_decode_preserves_lines() {
        let mut cart = Cart::new();
        let lamp = ProductSnapshot::new("p2", "Lamp", Money::from_cents(5000), 4)
            .with_discount(DiscountRate::from_bps(2000))
            .with_thumbnail("https://cdn/lamp.png");
        cart.add_item(&lamp, 2).unwrap();

        let raw = encode(cart.lines()).unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(decode(&raw).unwrap(), cart.lines());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode(r#"{"not": "an array"}"#).unwrap_err();
        assert_eq!(
            err,
            StoreError::Corrupt("expected an array of cart lines, found an object".to_string())
        );
        assert!(matches!(decode("\"{not an array}\""), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("{not an array}"), Err(StoreError::Corrupt(_))));
        assert!(matches!(decode(""), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_decode_rejects_misshapen_line() {
        let err = decode(r#"[{"id": "p1", "title": "Mug"}]"#).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(ref msg) if msg.starts_with("line 0")));
    }

    #[test]
    fn test_decode_fills_optional_fields() {
        let lines = decode(
            r#"[{"id": "p1", "title": "Mug", "unitPriceCents": 1000,
                 "stockLimit": 5, "quantity": 2}]"#,
        )
        .unwrap();
        assert_eq!(lines[0].discount, DiscountRate::zero());
        assert_eq!(lines[0].thumbnail_url, "");
    }

    #[test]
    fn test_empty_array_is_empty_cart() {
        assert!(decode("[]").unwrap().is_empty());
    }
}
