//! # storefront-core: Cart Engine for the Storefront
//!
//! This crate holds the shopping cart state engine used by the storefront
//! pages (catalog, product detail, cart view, checkout). Everything here is
//! synchronous and free of direct I/O; persistence goes through the
//! [`CartStore`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront Views (SPA)                       │   │
//! │  │    Catalog ──► Product Detail ──► Cart View ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  engine   │  │   │
//! │  │   │ CartLine  │  │   Money   │  │   Cart    │  │ CartEngine│  │   │
//! │  │   │ Product   │  │ Discount  │  │  totals   │  │  notify   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                       │        │   │
//! │  │                                      CartStore trait ◄┘        │   │
//! │  └───────────────────────────────────────────┬─────────────────────┘   │
//! │                                              │                          │
//! │  ┌───────────────────────────────────────────▼─────────────────────┐   │
//! │  │            storefront-store (JSON file snapshot)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product snapshots, catalog input, cart lines
//! - [`money`] - Money and discount rates with integer arithmetic
//! - [`cart`] - The `Cart` value: stock-bound mutations and derived totals
//! - [`engine`] - `CartEngine`: owns the cart, persists and notifies
//! - [`store`] - The persistence port and an in-memory implementation
//! - [`snapshot`] - JSON encoding of the persisted line list
//! - [`notification`] - User-facing notifications and sinks
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartEngine, MemoryCartStore, NotificationLog, ProductSnapshot, Money};
//!
//! let mut engine = CartEngine::open(MemoryCartStore::new(), NotificationLog::new());
//!
//! let mug = ProductSnapshot::new("p1", "Mug", Money::from_cents(1000), 5);
//! engine.add_item(&mug, 3);
//!
//! assert_eq!(engine.subtotal().cents(), 3000);
//! assert_eq!(engine.item_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod engine;
pub mod error;
pub mod money;
pub mod notification;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartTotals};
pub use engine::{CartEngine, MutationOutcome};
pub use error::{CartError, CartResult, StoreError, StoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use notification::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use store::{CartStore, MemoryCartStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for a discount rate in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

/// Maximum length of a product title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Largest accepted unit price, in cents ($100,000,000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 10_000_000_000;

/// Largest stock limit a line can carry. Catalog stock above this is clamped.
pub const MAX_STOCK_LIMIT: i64 = 1_000_000;

/// Maximum number of distinct products in one cart.
///
/// Together with the price and stock caps this keeps every cart total below
/// `10^18` cents, so money arithmetic cannot overflow.
pub const MAX_CART_LINES: usize = 100;
