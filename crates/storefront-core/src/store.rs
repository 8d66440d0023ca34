//! # Persistence Port
//!
//! The cart engine's only I/O boundary.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore                                          │
//! │                                                                         │
//! │  load()  ──► Ok(Some(lines))   snapshot found and decoded               │
//! │          ──► Ok(None)          nothing saved yet                        │
//! │          ──► Err(Corrupt)      not an ordered list of lines             │
//! │          ──► Err(Io)           medium unavailable                       │
//! │                                                                         │
//! │  save(lines) ──► overwrite the snapshot (caller does not wait on it)    │
//! │                  an emptied cart is saved as `[]`                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations:
//! - [`MemoryCartStore`] (this module) for tests and ephemeral sessions
//! - `FileCartStore` in the `storefront-store` crate for durable storage

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreResult;
use crate::snapshot;
use crate::types::CartLine;

/// Durable storage for the cart snapshot.
pub trait CartStore {
    /// Returns the last saved lines, `None` if nothing was saved.
    fn load(&self) -> StoreResult<Option<Vec<CartLine>>>;

    /// Overwrites the saved snapshot.
    fn save(&self, lines: &[CartLine]) -> StoreResult<()>;
}

/// Keeps the encoded snapshot in memory.
///
/// The slot holds the same text a durable store would write, so encoding
/// and corrupt-data handling behave identically. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `raw` as its snapshot text.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CartStore, MemoryCartStore, StoreError};
    ///
    /// let store = MemoryCartStore::with_raw("{not an array}");
    /// assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    /// ```
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryCartStore {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The snapshot text as last written.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> StoreResult<Option<Vec<CartLine>>> {
        match self.raw() {
            Some(raw) => snapshot::decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, lines: &[CartLine]) -> StoreResult<()> {
        let raw = snapshot::encode(lines)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cart, Money, ProductSnapshot};

    #[test]
    fn test_empty_store_loads_none() {
        assert_eq!(MemoryCartStore::new().load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_item(&ProductSnapshot::new("p1", "Mug", Money::from_cents(1000), 5), 3)
            .unwrap();

        store.save(cart.lines()).unwrap();
        let loaded = store.clone().load().unwrap().unwrap();
        assert_eq!(loaded, cart.lines());
    }

    #[test]
    fn test_empty_cart_saves_empty_list() {
        let store = MemoryCartStore::with_raw("[{\"stale\":true}]");
        store.save(&[]).unwrap();
        assert_eq!(store.raw().as_deref(), Some("[]"));
        assert_eq!(store.load().unwrap(), Some(Vec::new()));
    }
}
