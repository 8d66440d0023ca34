//! # Cart
//!
//! The cart value: an ordered set of lines keyed by product id, with
//! stock-bound mutations and derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  View Action              Cart Method             Line Change           │
//! │  ───────────              ───────────             ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_item() ──────────► push / qty += n      │
//! │                                                                         │
//! │  Click +/- ──────────────► update_quantity() ───► qty = n / remove     │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► remove(i)            │
//! │                                                                         │
//! │  Click clear ────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Render ─────────────────► subtotal() etc. ─────► (read only)          │
//! │                                                                         │
//! │  Every method leaves 1 <= quantity <= stock_limit on every line.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Cart` knows nothing about storage or notifications; that is the job of
//! [`CartEngine`](crate::CartEngine).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::notification::Notification;
use crate::types::{CartLine, ProductId, ProductSnapshot};
use crate::validation;
use crate::MAX_CART_LINES;

// =============================================================================
// Cart Change
// =============================================================================

/// What an accepted cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was created or an existing line's quantity increased.
    Added {
        product_id: ProductId,
        title: String,
        quantity: i64,
    },
    /// A line's quantity was replaced.
    Updated {
        product_id: ProductId,
        title: String,
        quantity: i64,
    },
    /// A line was deleted.
    Removed { product_id: ProductId, title: String },
    /// Every line was deleted.
    Cleared,
    /// Nothing happened (non-positive add, unknown product id).
    Unchanged,
}

impl CartChange {
    /// Whether the cart differs from before the call.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, CartChange::Unchanged)
    }

    /// The confirmation shown to the shopper, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            CartChange::Added {
                title, quantity, ..
            } => Some(Notification::success(format!(
                "Added {} to cart (quantity {})",
                title, quantity
            ))),
            CartChange::Updated {
                title, quantity, ..
            } => Some(Notification::success(format!(
                "Updated {} quantity to {}",
                title, quantity
            ))),
            CartChange::Removed { title, .. } => {
                Some(Notification::info(format!("{} removed from cart", title)))
            }
            CartChange::Cleared => Some(Notification::info("Cart cleared")),
            CartChange::Unchanged => None,
        }
    }
}

// =============================================================================
// Dropped Line
// =============================================================================

/// A stored line that [`Cart::restore`] refused to bring back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    pub product_id: ProductId,
    pub reason: String,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same product increases quantity)
/// - `1 <= quantity <= stock_limit` for every line
/// - Totals are computed on demand, never stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from stored lines, dropping any that break the
    /// invariants.
    ///
    /// ## Reconciliation
    /// - Lines failing [`validation::validate_line`] are dropped
    /// - For duplicate ids the first occurrence wins
    /// - Lines past [`MAX_CART_LINES`] are dropped
    /// - Order of the surviving lines is kept
    pub fn restore(lines: Vec<CartLine>) -> (Cart, Vec<DroppedLine>) {
        let mut cart = Cart::new();
        let mut dropped = Vec::new();

        for line in lines {
            if let Err(e) = validation::validate_line(&line) {
                dropped.push(DroppedLine {
                    product_id: line.id,
                    reason: e.to_string(),
                });
                continue;
            }

            if cart.position(line.id.as_str()).is_some() {
                dropped.push(DroppedLine {
                    product_id: line.id,
                    reason: "duplicate product id".to_string(),
                });
                continue;
            }

            if cart.lines.len() >= MAX_CART_LINES {
                dropped.push(DroppedLine {
                    product_id: line.id,
                    reason: format!("cart already holds {} products", MAX_CART_LINES),
                });
                continue;
            }

            cart.lines.push(line);
        }

        (cart, dropped)
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id.as_str() == product_id)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.id.as_str() == product_id)
    }

    /// Adds a product or increases the quantity of its existing line.
    ///
    /// ## Behavior
    /// - `quantity < 1`: ignored, returns `Unchanged`
    /// - Product not in cart: new line, if `quantity <= stock_limit`
    /// - Product in cart: `existing + quantity`, checked against the stock
    ///   limit captured when the line was created
    ///
    /// ## Returns
    /// - `Ok(CartChange::Added { .. })` with the resulting quantity
    /// - `Err(CartError::StockExceeded)` with the cart untouched
    /// - `Err(CartError::CartFull)` when a new line would exceed [`MAX_CART_LINES`]
    /// - `Err(CartError::InvalidProduct)` if the snapshot fails validation
    pub fn add_item(&mut self, product: &ProductSnapshot, quantity: i64) -> CartResult<CartChange> {
        if quantity < 1 {
            return Ok(CartChange::Unchanged);
        }

        validation::validate_product(product)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.id.as_str() == product.id.as_str())
        {
            let new_qty = match line.quantity.checked_add(quantity) {
                Some(qty) if qty <= line.stock_limit => qty,
                requested => {
                    return Err(CartError::StockExceeded {
                        product_id: line.id.to_string(),
                        title: line.title.clone(),
                        available: line.stock_limit,
                        requested: requested.unwrap_or(i64::MAX),
                    })
                }
            };
            line.quantity = new_qty;
            return Ok(CartChange::Added {
                product_id: line.id.clone(),
                title: line.title.clone(),
                quantity: new_qty,
            });
        }

        if quantity > product.stock_limit {
            return Err(CartError::StockExceeded {
                product_id: product.id.to_string(),
                title: product.title.clone(),
                available: product.stock_limit,
                requested: quantity,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CartError::CartFull {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_snapshot(product, quantity));
        Ok(CartChange::Added {
            product_id: product.id.clone(),
            title: product.title.clone(),
            quantity,
        })
    }

    /// Removes the line for a product. Unknown ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> CartChange {
        match self.position(product_id) {
            Some(index) => {
                let line = self.lines.remove(index);
                CartChange::Removed {
                    product_id: line.id,
                    title: line.title,
                }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Replaces the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity < 1`: same as [`Cart::remove_item`]
    /// - Unknown id: `Unchanged`
    /// - `quantity > stock_limit`: `StockExceeded`, cart untouched
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<CartChange> {
        if quantity < 1 {
            return Ok(self.remove_item(product_id));
        }

        let Some(index) = self.position(product_id) else {
            return Ok(CartChange::Unchanged);
        };
        let line = &mut self.lines[index];

        if quantity > line.stock_limit {
            return Err(CartError::StockExceeded {
                product_id: line.id.to_string(),
                title: line.title.clone(),
                available: line.stock_limit,
                requested: quantity,
            });
        }

        line.quantity = quantity;
        Ok(CartChange::Updated {
            product_id: line.id.clone(),
            title: line.title.clone(),
            quantity,
        })
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();
        CartChange::Cleared
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ per-line discount, each rounded to the cent.
    pub fn discount_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_discount).sum()
    }

    /// subtotal − discount total.
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_total()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All derived values in one struct.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for views and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    #[serde(rename = "subtotalCents")]
    pub subtotal: Money,
    #[serde(rename = "discountCents")]
    pub discount: Money,
    #[serde(rename = "totalCents")]
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let discount = cart.discount_total();
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
