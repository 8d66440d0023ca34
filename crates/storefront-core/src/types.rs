//! # Domain Types
//!
//! Value types that cross the catalog → cart → checkout boundaries.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │──►│ ProductSnapshot │──►│    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  upstream JSON  │   │  validated      │   │  snapshot +     │       │
//! │  │  price: f64     │   │  unit_price     │   │  quantity       │       │
//! │  │  stock          │   │  stock_limit    │   │  added_at       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │        TryFrom               add_item              persisted            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line freezes title, price, stock limit and discount at the moment it is
//! first added. Later catalog changes are not re-synced into the cart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{DiscountRate, Money};
use crate::validation;
use crate::MAX_STOCK_LIMIT;

// =============================================================================
// Product Id
// =============================================================================

/// Unique product identifier; also the key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// The product data `add_item` needs, captured at add-time.
///
/// Built from a [`CatalogProduct`] via `TryFrom` or directly with
/// [`ProductSnapshot::new`]. The engine validates it again before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    #[serde(rename = "unitPriceCents")]
    pub unit_price: Money,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Maximum quantity that may be held in the cart.
    pub stock_limit: i64,
    #[serde(default, rename = "discountBps")]
    pub discount: DiscountRate,
}

impl ProductSnapshot {
    /// Creates a snapshot with no thumbnail and no discount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Money, ProductSnapshot, DiscountRate};
    ///
    /// let p = ProductSnapshot::new("p2", "Lamp", Money::from_cents(5000), 4)
    ///     .with_discount(DiscountRate::from_percentage(20.0));
    /// assert_eq!(p.discount.bps(), 2000);
    /// ```
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        unit_price: Money,
        stock_limit: i64,
    ) -> Self {
        ProductSnapshot {
            id: id.into(),
            title: title.into(),
            unit_price,
            thumbnail_url: String::new(),
            stock_limit,
            discount: DiscountRate::zero(),
        }
    }

    pub fn with_discount(mut self, discount: DiscountRate) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A product record as the catalog service returns it.
///
/// ```json
/// { "id": 1, "title": "Essence Mascara", "price": 9.99,
///   "thumbnail": "https://…/thumbnail.png", "stock": 5,
///   "discountPercentage": 7.17 }
/// ```
///
/// Extra fields (description, rating, brand, …) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    pub stock: i64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
}

/// Catalog ids are numbers in some backends and strings in others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

impl TryFrom<CatalogProduct> for ProductSnapshot {
    type Error = ValidationError;

    /// Validates and coerces upstream data into a snapshot.
    ///
    /// ## Rules
    /// - id and title are trimmed and must be non-empty
    /// - price must be finite and non-negative
    /// - stock must be non-negative; stock above `MAX_STOCK_LIMIT` is clamped
    /// - a missing discount is 0%; out-of-range discounts are clamped
    fn try_from(product: CatalogProduct) -> Result<Self, Self::Error> {
        let id = product.id.trim().to_string();
        validation::validate_product_id(&id)?;

        let title = product.title.trim().to_string();
        validation::validate_title(&title)?;

        let unit_price =
            Money::from_decimal(product.price).ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a finite number".to_string(),
            })?;
        validation::validate_price(unit_price)?;

        let stock_limit = product.stock.min(MAX_STOCK_LIMIT);
        validation::validate_stock_limit(stock_limit)?;

        let discount = match product.discount_percentage {
            None => DiscountRate::zero(),
            Some(pct) if pct.is_finite() => DiscountRate::from_percentage(pct),
            Some(_) => {
                return Err(ValidationError::InvalidFormat {
                    field: "discountPercentage".to_string(),
                    reason: "must be a finite number".to_string(),
                })
            }
        };

        Ok(ProductSnapshot {
            id: ProductId::new(id),
            title,
            unit_price,
            thumbnail_url: product.thumbnail,
            stock_limit,
            discount,
        })
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct product held in the cart.
///
/// ## Invariant
/// `1 <= quantity <= stock_limit`. Only [`Cart`](crate::Cart) constructs and
/// mutates lines, so the invariant holds for every line a caller can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,
    /// Title at time of adding (frozen).
    pub title: String,
    /// Price at time of adding (frozen).
    #[serde(rename = "unitPriceCents")]
    pub unit_price: Money,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Stock at time of adding (frozen).
    pub stock_limit: i64,
    #[serde(default, rename = "discountBps")]
    pub discount: DiscountRate,
    pub quantity: i64,
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line from a product snapshot. Callers check the quantity.
    pub(crate) fn from_snapshot(product: &ProductSnapshot, quantity: i64) -> Self {
        CartLine {
            id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.unit_price,
            thumbnail_url: product.thumbnail_url.clone(),
            stock_limit: product.stock_limit,
            discount: product.discount,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Discount taken off this line's total.
    #[inline]
    pub fn line_discount(&self) -> Money {
        self.line_total().discount_amount(self.discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> CatalogProduct {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_catalog_numeric_id_is_stringified() {
        let p = catalog(r#"{"id": 42, "title": "Mascara", "price": 9.99, "stock": 5}"#);
        assert_eq!(p.id, "42");
        assert_eq!(p.thumbnail, "");
        assert_eq!(p.discount_percentage, None);
    }

    #[test]
    fn test_catalog_extra_fields_ignored() {
        let p = catalog(
            r#"{"id": "p1", "title": "Lamp", "price": 50, "stock": 3,
                "discountPercentage": 20, "brand": "Acme", "rating": 4.5}"#,
        );
        let snapshot = ProductSnapshot::try_from(p).unwrap();
        assert_eq!(snapshot.unit_price.cents(), 5000);
        assert_eq!(snapshot.discount.bps(), 2000);
    }

    #[test]
    fn test_catalog_conversion_trims_and_converts() {
        let p = CatalogProduct {
            id: "  p1 ".to_string(),
            title: " Mascara ".to_string(),
            price: 9.99,
            thumbnail: "https://cdn/p1.png".to_string(),
            stock: 5,
            discount_percentage: Some(7.17),
        };
        let snapshot = ProductSnapshot::try_from(p).unwrap();
        assert_eq!(snapshot.id.as_str(), "p1");
        assert_eq!(snapshot.title, "Mascara");
        assert_eq!(snapshot.unit_price.cents(), 999);
        assert_eq!(snapshot.discount.bps(), 717);
        assert_eq!(snapshot.thumbnail_url, "https://cdn/p1.png");
    }

    #[test]
    fn test_catalog_discount_is_clamped() {
        let mut p = catalog(r#"{"id": 1, "title": "A", "price": 1, "stock": 1}"#);
        p.discount_percentage = Some(140.0);
        assert_eq!(ProductSnapshot::try_from(p.clone()).unwrap().discount.bps(), 10000);
        p.discount_percentage = Some(-5.0);
        assert_eq!(ProductSnapshot::try_from(p).unwrap().discount.bps(), 0);
    }

    #[test]
    fn test_catalog_stock_and_price_caps() {
        let mut p = catalog(r#"{"id": 1, "title": "A", "price": 1, "stock": 5000000}"#);
        assert_eq!(
            ProductSnapshot::try_from(p.clone()).unwrap().stock_limit,
            MAX_STOCK_LIMIT
        );

        p.price = 1e12;
        assert!(matches!(
            ProductSnapshot::try_from(p),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_bad_input() {
        let base = catalog(r#"{"id": 1, "title": "A", "price": 1, "stock": 1}"#);

        let mut p = base.clone();
        p.id = "   ".to_string();
        assert!(matches!(
            ProductSnapshot::try_from(p),
            Err(ValidationError::Required { .. })
        ));

        let mut p = base.clone();
        p.price = -1.0;
        assert!(ProductSnapshot::try_from(p).is_err());

        let mut p = base.clone();
        p.price = f64::NAN;
        assert!(matches!(
            ProductSnapshot::try_from(p),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mut p = base.clone();
        p.stock = -2;
        assert!(ProductSnapshot::try_from(p).is_err());

        let mut p = base;
        p.discount_percentage = Some(f64::INFINITY);
        assert!(ProductSnapshot::try_from(p).is_err());
    }

    #[test]
    fn test_line_totals() {
        let product = ProductSnapshot::new("p2", "Lamp", Money::from_cents(5000), 10)
            .with_discount(DiscountRate::from_bps(2000));
        let line = CartLine::from_snapshot(&product, 2);
        assert_eq!(line.line_total().cents(), 10000);
        assert_eq!(line.line_discount().cents(), 2000);
    }

    #[test]
    fn test_line_serializes_camel_case() {
        let product = ProductSnapshot::new("p1", "Mug", Money::from_cents(1000), 5);
        let line = CartLine::from_snapshot(&product, 1);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["unitPriceCents"], 1000);
        assert_eq!(json["stockLimit"], 5);
        assert_eq!(json["discountBps"], 0);
        assert!(json.get("addedAt").is_some());
    }
}
