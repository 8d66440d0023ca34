//! # Cart Commands
//!
//! Handlers behind the storefront's cart views.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │ (reads items/totals)   │
//! │  │  Cart    │     │          │     │          │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                                                │
//! │       │           add_to_cart                                           │
//! │       │           update_cart_item                                      │
//! │       │           remove_from_cart                                      │
//! │       │                │                                                │
//! │       └─── clear_cart ─┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock rejections are not command errors: the cart comes back unchanged
//! with an error-level notification explaining why.

use serde::Serialize;
use storefront_core::{CartLine, CartStore, CartTotals, CatalogProduct, Notification, ProductSnapshot};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{AppConfig, CartState, SharedEngine};

/// Cart contents, totals and the notifications raised by this command.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    /// `totals.total` rendered with the configured currency
    pub formatted_total: String,
    pub notifications: Vec<Notification>,
}

impl CartResponse {
    fn build<S: CartStore>(
        engine: &SharedEngine<S>,
        config: &AppConfig,
        notifications: Vec<Notification>,
    ) -> Self {
        let totals = engine.totals();
        CartResponse {
            items: engine.lines().to_vec(),
            formatted_total: config.format_currency(totals.total.cents()),
            totals,
            notifications,
        }
    }
}

/// Runs `f` against the engine and answers with the resulting cart.
fn respond<S, F>(cart: &CartState<S>, config: &AppConfig, f: F) -> CartResponse
where
    S: CartStore,
    F: FnOnce(&mut SharedEngine<S>),
{
    cart.with_engine_mut(|engine| {
        f(engine);
        CartResponse::build(engine, config, cart.take_notifications())
    })
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart Page                                                             │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  CART                                              3 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Mug                     x2              $20.00               │    │
/// │  │  Lamp (-20%)             x1              $50.00               │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                $70.00               │    │
/// │  │  Discount                               -$10.00               │    │
/// │  │  ──────────────────────────────────────────────────          │    │
/// │  │  TOTAL                                   $60.00               │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  {"command":"get_cart"} → { items: [...], totals: {...}, ... }          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart<S: CartStore>(cart: &CartState<S>, config: &AppConfig) -> CartResponse {
    debug!("get_cart command");
    respond(cart, config, |_| {})
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - Catalog data is validated and frozen into a snapshot first
/// - Already in cart: quantity increases, bounded by the captured stock limit
/// - `quantity` defaults to 1
///
/// ## Errors
/// `VALIDATION_ERROR` when the catalog record cannot become a snapshot
/// (blank id or title, negative or non-finite price, negative stock).
pub fn add_to_cart<S: CartStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product: CatalogProduct,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product.id, quantity, "add_to_cart command");

    let snapshot = ProductSnapshot::try_from(product)?;

    Ok(respond(cart, config, |engine| {
        engine.add_item(&snapshot, quantity);
    }))
}

/// Sets the quantity of a line. Zero or less removes it.
pub fn update_cart_item<S: CartStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");

    respond(cart, config, |engine| {
        engine.update_quantity(product_id, quantity);
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart<S: CartStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    respond(cart, config, |engine| {
        engine.remove_item(product_id);
    })
}

/// Empties the cart.
pub fn clear_cart<S: CartStore>(cart: &CartState<S>, config: &AppConfig) -> CartResponse {
    debug!("clear_cart command");

    respond(cart, config, |engine| {
        engine.clear();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{MemoryCartStore, NotificationLevel};

    fn catalog(id: &str, title: &str, price: f64, stock: i64) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            title: title.to_string(),
            price,
            thumbnail: String::new(),
            stock,
            discount_percentage: None,
        }
    }

    fn setup() -> (CartState<MemoryCartStore>, AppConfig) {
        (CartState::open(MemoryCartStore::new()), AppConfig::default())
    }

    #[test]
    fn test_add_to_cart_defaults_to_one() {
        let (cart, config) = setup();

        let response = add_to_cart(&cart, &config, catalog("1", "Mug", 10.0, 5), None).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 1);
        assert_eq!(response.totals.total.cents(), 1000);
        assert_eq!(response.formatted_total, "$10.00");
        assert_eq!(response.notifications.len(), 1);
        assert_eq!(response.notifications[0].level, NotificationLevel::Success);
    }

    #[test]
    fn test_add_over_stock_returns_unchanged_cart_with_error_notice() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, catalog("1", "Mug", 10.0, 5), Some(3)).unwrap();

        let response = add_to_cart(&cart, &config, catalog("1", "Mug", 10.0, 5), Some(3)).unwrap();

        assert_eq!(response.items[0].quantity, 3);
        assert_eq!(response.notifications.len(), 1);
        assert!(response.notifications[0].is_error());
        assert_eq!(
            response.notifications[0].message,
            "Only 5 of Mug available in stock"
        );
    }

    #[test]
    fn test_add_invalid_catalog_product_is_validation_error() {
        let (cart, config) = setup();

        let err = add_to_cart(&cart, &config, catalog("1", "Mug", f64::NAN, 5), None).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&cart, &config).items.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, catalog("1", "Mug", 10.0, 5), Some(2)).unwrap();

        let response = update_cart_item(&cart, &config, "1", 0);

        assert!(response.items.is_empty());
        assert_eq!(response.notifications[0].message, "Mug removed from cart");
    }

    #[test]
    fn test_remove_unknown_is_silent() {
        let (cart, config) = setup();

        let response = remove_from_cart(&cart, &config, "missing");

        assert!(response.items.is_empty());
        assert!(response.notifications.is_empty());
    }

    #[test]
    fn test_discount_shows_in_totals() {
        let (cart, config) = setup();
        let mut lamp = catalog("2", "Lamp", 50.0, 4);
        lamp.discount_percentage = Some(20.0);

        let response = add_to_cart(&cart, &config, lamp, Some(2)).unwrap();

        assert_eq!(response.totals.subtotal.cents(), 10000);
        assert_eq!(response.totals.discount.cents(), 2000);
        assert_eq!(response.formatted_total, "$80.00");
    }

    #[test]
    fn test_clear_cart_persists_and_notifies() {
        let store = MemoryCartStore::new();
        let cart = CartState::open(store.clone());
        let config = AppConfig::default();
        add_to_cart(&cart, &config, catalog("1", "Mug", 10.0, 5), None).unwrap();

        let response = clear_cart(&cart, &config);

        assert!(response.items.is_empty());
        assert_eq!(response.notifications[0].message, "Cart cleared");
        assert_eq!(store.raw().as_deref(), Some("[]"));
    }
}
