//! # Cart Engine
//!
//! Owns the authoritative [`Cart`], persists every accepted change through a
//! [`CartStore`] and reports every outcome through a [`Notifier`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Engine Lifecycle                                  │
//! │                                                                         │
//! │  CartEngine::new(store, notifier)                                      │
//! │       │   empty cart, not hydrated: accepted changes are NOT saved      │
//! │       ▼                                                                 │
//! │  hydrate()                                                              │
//! │       ├── Ok(Some(lines)) ──► Cart::restore (drops invalid lines)       │
//! │       ├── Ok(None) ─────────► keep current cart                         │
//! │       └── Err(..) ──────────► warn!, start from an empty cart           │
//! │       ▼                                                                 │
//! │  add_item / update_quantity / remove_item / clear                       │
//! │       ├── accepted ──► save(lines) + success notification              │
//! │       ├── rejected ──► error notification, cart untouched              │
//! │       └── no-op ─────► nothing                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CartEngine::open` does `new` + `hydrate` in one step.

use tracing::{debug, info, warn};

use crate::cart::{Cart, CartChange, CartTotals};
use crate::error::{CartError, StoreError};
use crate::money::Money;
use crate::notification::{Notification, Notifier};
use crate::store::CartStore;
use crate::types::{CartLine, ProductSnapshot};

// =============================================================================
// Mutation Outcome
// =============================================================================

/// Result of a cart mutation.
///
/// Rejections are ordinary values: the engine has already told the shopper
/// and left the cart as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied(CartChange),
    Rejected(CartError),
}

impl MutationOutcome {
    /// True when the cart changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(change) if !change.is_unchanged())
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, MutationOutcome::Rejected(_))
    }
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The shopping cart state engine.
///
/// ## Ownership
/// The engine is the single writer of its cart. Views get `&[CartLine]` and
/// derived totals; they never touch the cart directly.
#[derive(Debug)]
pub struct CartEngine<S, N> {
    cart: Cart,
    store: S,
    notifier: N,
    hydrated: bool,
}

impl<S: CartStore, N: Notifier> CartEngine<S, N> {
    /// Creates an engine with an empty cart that has not read its store yet.
    pub fn new(store: S, notifier: N) -> Self {
        CartEngine {
            cart: Cart::new(),
            store,
            notifier,
            hydrated: false,
        }
    }

    /// Creates an engine and immediately restores the saved cart.
    pub fn open(store: S, notifier: N) -> Self {
        let mut engine = Self::new(store, notifier);
        engine.hydrate();
        engine
    }

    /// Loads the saved snapshot into the engine.
    ///
    /// Never fails: a corrupt or unreadable snapshot is logged and the engine
    /// starts from an empty cart. Calling it again is a no-op.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        match self.store.load() {
            Ok(Some(lines)) => {
                let (cart, dropped) = Cart::restore(lines);
                for line in &dropped {
                    warn!(
                        product_id = %line.product_id,
                        reason = %line.reason,
                        "Dropping invalid line from saved cart"
                    );
                }
                info!(
                    lines = cart.line_count(),
                    items = cart.item_count(),
                    "Restored saved cart"
                );
                self.cart = cart;
            }
            Ok(None) => debug!("No saved cart found"),
            Err(StoreError::Corrupt(reason)) => {
                warn!(%reason, "Discarding corrupt saved cart; starting empty");
                self.cart = Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to load saved cart; starting empty");
                self.cart = Cart::new();
            }
        }

        self.hydrated = true;
    }

    /// Whether [`CartEngine::hydrate`] has run.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// ## User Workflow
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  Shopper clicks "Add to cart" (qty 2) on a product page                 │
    /// │                    │                                                    │
    /// │                    ▼                                                    │
    /// │  add_item(&snapshot, 2)                                                 │
    /// │     ├── qty < 1           → ignored                                     │
    /// │     ├── invalid snapshot  → "Cannot add product: …"                     │
    /// │     ├── over stock        → "Only N of X available in stock"            │
    /// │     └── accepted          → save + "Added X to cart (quantity N)"       │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn add_item(&mut self, product: &ProductSnapshot, quantity: i64) -> MutationOutcome {
        debug!(product_id = %product.id, quantity, "add_item");
        let result = self.cart.add_item(product, quantity);
        self.settle(result)
    }

    /// Removes a product's line. Unknown ids are silently ignored.
    pub fn remove_item(&mut self, product_id: &str) -> MutationOutcome {
        debug!(product_id, "remove_item");
        let change = self.cart.remove_item(product_id);
        self.settle(Ok(change))
    }

    /// Sets a line's quantity; values below 1 remove the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> MutationOutcome {
        debug!(product_id, quantity, "update_quantity");
        let result = self.cart.update_quantity(product_id, quantity);
        self.settle(result)
    }

    /// Empties the cart. Always saves and confirms, even when already empty.
    pub fn clear(&mut self) -> MutationOutcome {
        debug!("clear");
        let change = self.cart.clear();
        self.settle(Ok(change))
    }

    /// Persists and notifies according to what a mutation did.
    fn settle(&mut self, result: Result<CartChange, CartError>) -> MutationOutcome {
        match result {
            Ok(change) => {
                if !change.is_unchanged() {
                    self.persist();
                }
                if let Some(notification) = change.notification() {
                    self.notifier.notify(notification);
                }
                MutationOutcome::Applied(change)
            }
            Err(err) => {
                info!(error = %err, "Cart mutation rejected");
                self.notifier.notify(Notification::error(err.user_message()));
                MutationOutcome::Rejected(err)
            }
        }
    }

    /// Writes the current lines to the store, unless hydration is pending.
    ///
    /// Failures are logged only; callers never wait on storage.
    fn persist(&self) {
        if !self.hydrated {
            debug!("Skipping cart save until the saved cart has been loaded");
            return;
        }

        if let Err(e) = self.store.save(self.cart.lines()) {
            warn!(error = %e, "Failed to save cart");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.cart.line(product_id)
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn discount_total(&self) -> Money {
        self.cart.discount_total()
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationLevel, NotificationLog};
    use crate::store::MemoryCartStore;

    fn mug() -> ProductSnapshot {
        ProductSnapshot::new("p1", "Mug", Money::from_cents(1000), 5)
    }

    fn engine() -> CartEngine<MemoryCartStore, NotificationLog> {
        CartEngine::open(MemoryCartStore::new(), NotificationLog::new())
    }

    #[test]
    fn test_accepted_add_saves_and_notifies() {
        let mut engine = engine();

        let outcome = engine.add_item(&mug(), 3);

        assert!(outcome.is_applied());
        assert!(engine.store().raw().is_some());
        let saved = engine.store().load().unwrap().unwrap();
        assert_eq!(saved[0].quantity, 3);
        assert_eq!(
            engine.notifier().last(),
            Some(Notification::success("Added Mug to cart (quantity 3)"))
        );
    }

    #[test]
    fn test_rejected_add_notifies_without_saving() {
        let mut engine = engine();
        engine.add_item(&mug(), 3);
        let before = engine.store().raw();

        let outcome = engine.add_item(&mug(), 3);

        assert!(outcome.is_rejected());
        assert_eq!(engine.store().raw(), before);
        assert_eq!(engine.line("p1").map(|l| l.quantity), Some(3));
        assert_eq!(
            engine.notifier().last(),
            Some(Notification::error("Only 5 of Mug available in stock"))
        );
    }

    #[test]
    fn test_noops_are_silent() {
        let mut engine = engine();

        assert!(!engine.add_item(&mug(), 0).is_applied());
        assert!(!engine.remove_item("ghost").is_applied());
        assert!(!engine.update_quantity("ghost", 2).is_applied());

        assert!(engine.notifier().entries().is_empty());
        assert!(engine.store().raw().is_none());
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let mut engine = engine();
        engine.add_item(&mug(), 1);

        assert!(engine.remove_item("p1").is_applied());
        let after_first = engine.store().raw();
        assert!(!engine.remove_item("p1").is_applied());

        assert_eq!(engine.store().raw(), after_first);
        assert_eq!(
            engine.notifier().last(),
            Some(Notification::info("Mug removed from cart"))
        );
    }

    #[test]
    fn test_update_quantity_messages() {
        let mut engine = engine();
        engine.add_item(&mug(), 1);

        engine.update_quantity("p1", 4);
        assert_eq!(
            engine.notifier().last(),
            Some(Notification::success("Updated Mug quantity to 4"))
        );

        assert!(engine.update_quantity("p1", 9).is_rejected());
        assert_eq!(engine.item_count(), 4);
    }

    #[test]
    fn test_clear_always_saves_and_confirms() {
        let mut engine = engine();

        assert!(engine.clear().is_applied());
        assert_eq!(engine.store().raw().as_deref(), Some("[]"));
        assert_eq!(engine.notifier().last(), Some(Notification::info("Cart cleared")));
    }

    #[test]
    fn test_invalid_product_is_rejected() {
        let mut engine = engine();
        let bad = ProductSnapshot::new("p9", "  ", Money::from_cents(100), 3);

        let outcome = engine.add_item(&bad, 1);

        assert!(matches!(outcome, MutationOutcome::Rejected(CartError::InvalidProduct(_))));
        let last = engine.notifier().last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert_eq!(last.message, "Cannot add product: title is required");
    }

    #[test]
    fn test_mutations_before_hydration_are_not_saved() {
        let store = MemoryCartStore::new();
        store.save(&[]).unwrap();
        let mut engine = CartEngine::new(store.clone(), NotificationLog::new());

        engine.add_item(&mug(), 2);
        assert_eq!(store.raw().as_deref(), Some("[]"));

        engine.hydrate();
        assert!(engine.is_hydrated());
        engine.add_item(&mug(), 1);
        assert_eq!(store.load().unwrap().unwrap()[0].quantity, 1);
    }

    #[test]
    fn test_hydrate_restores_saved_cart() {
        let store = MemoryCartStore::new();
        {
            let mut first = CartEngine::open(store.clone(), NotificationLog::new());
            first.add_item(&mug(), 2);
        }

        let second = CartEngine::open(store, NotificationLog::new());
        assert_eq!(second.item_count(), 2);
        assert_eq!(second.subtotal().cents(), 2000);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let engine = CartEngine::open(
            MemoryCartStore::with_raw("{not an array}"),
            NotificationLog::new(),
        );
        assert!(engine.cart().is_empty());
        assert!(engine.is_hydrated());
        assert!(engine.notifier().entries().is_empty());
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let store = MemoryCartStore::new();
        let mut engine = CartEngine::open(store.clone(), NotificationLog::new());
        engine.add_item(&mug(), 2);

        store.save(&[]).unwrap();
        engine.hydrate();
        assert_eq!(engine.item_count(), 2);
    }
}
