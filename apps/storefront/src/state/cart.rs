//! # Cart State
//!
//! Shares one [`CartEngine`] between commands.
//!
//! ## Thread Safety
//! The engine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command reads or mutates the same cart
//! 2. Mutations must apply one at a time, in dispatch order
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action              Command                 Engine Call           │
//! │  ───────────              ───────                 ───────────           │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► add_item()           │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► update_quantity()    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► remove_item()        │
//! │                                                                         │
//! │  Empty Cart ─────────────► clear_cart() ────────► clear()              │
//! │                                                                         │
//! │  Open Cart Page ─────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  Every call drains the notifications it produced so the view can show  │
//! │  them next to the updated cart.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::{CartEngine, CartStore, Notification, NotificationLog};
use storefront_store::FileCartStore;

/// Engine type held by [`CartState`].
pub type SharedEngine<S> = CartEngine<S, NotificationLog>;

/// Shared cart engine plus the notifications it has emitted.
///
/// ## Why Not RwLock?
/// Nearly every command mutates the cart, and each call is short.
#[derive(Debug)]
pub struct CartState<S: CartStore = FileCartStore> {
    engine: Arc<Mutex<SharedEngine<S>>>,
    notifications: NotificationLog,
}

impl<S: CartStore> CartState<S> {
    /// Opens the engine over `store`, hydrating from its snapshot.
    pub fn open(store: S) -> Self {
        let notifications = NotificationLog::new();
        let engine = CartEngine::open(store, notifications.clone());

        CartState {
            engine: Arc::new(Mutex::new(engine)),
            notifications,
        }
    }

    /// Executes a function with read access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_engine(|engine| engine.totals());
    /// ```
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SharedEngine<S>) -> R,
    {
        let engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&engine)
    }

    /// Executes a function with write access to the engine.
    ///
    /// A poisoned lock is recovered: the engine never leaves a half-applied
    /// mutation behind, so the inner value is still consistent.
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SharedEngine<S>) -> R,
    {
        let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    /// Takes every notification emitted since the last call.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

impl<S: CartStore> Clone for CartState<S> {
    fn clone(&self) -> Self {
        CartState {
            engine: Arc::clone(&self.engine),
            notifications: self.notifications.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{MemoryCartStore, Money, NotificationLevel, ProductSnapshot};

    fn mug() -> ProductSnapshot {
        ProductSnapshot::new("p1", "Mug", Money::from_cents(1000), 5)
    }

    #[test]
    fn test_clones_share_engine() {
        let state = CartState::open(MemoryCartStore::new());
        let other = state.clone();

        other.with_engine_mut(|engine| engine.add_item(&mug(), 2));

        assert_eq!(state.with_engine(|engine| engine.item_count()), 2);
    }

    #[test]
    fn test_notifications_are_drained_once() {
        let state = CartState::open(MemoryCartStore::new());
        state.with_engine_mut(|engine| engine.add_item(&mug(), 1));

        let first = state.take_notifications();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].level, NotificationLevel::Success);
        assert!(state.take_notifications().is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let state = CartState::open(MemoryCartStore::new());
        state.with_engine_mut(|engine| engine.add_item(&mug(), 1));

        let poisoner = state.clone();
        let result = std::thread::spawn(move || {
            poisoner.with_engine_mut(|_| panic!("command panicked"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(state.with_engine(|engine| engine.item_count()), 1);
    }
}
