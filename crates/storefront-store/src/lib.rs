//! # storefront-store: Cart Snapshot Storage
//!
//! Keeps the shopper's cart across restarts by writing the snapshot produced
//! by `storefront_core::snapshot` to a JSON file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence                                 │
//! │                                                                         │
//! │  CartEngine (storefront-core)                                          │
//! │       │ CartStore::load / save                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐          ┌─────────────────────┐           │   │
//! │  │   │  StoreConfig  │ ───────► │   FileCartStore     │           │   │
//! │  │   │  (path)       │          │   (atomic writes)   │           │   │
//! │  │   └───────────────┘          └─────────────────────┘           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/shop/cart.json                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::{CartEngine, TracingNotifier};
//! use storefront_store::{FileCartStore, StoreConfig};
//!
//! let store = FileCartStore::new(StoreConfig::from_env()?);
//! let engine = CartEngine::open(store, TracingNotifier);
//! ```

pub mod config;
pub mod file;

pub use config::StoreConfig;
pub use file::FileCartStore;
