//! # State Module
//!
//! Long-lived values the command layer works against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────┐                    │
//! │  │       CartState          │  │    AppConfig     │                    │
//! │  │                          │  │                  │                    │
//! │  │  Arc<Mutex<CartEngine>>  │  │  cart_path       │                    │
//! │  │  NotificationLog         │  │  currency_*      │                    │
//! │  │                          │  │  log_filter      │                    │
//! │  └──────────────────────────┘  └──────────────────┘                    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • AppConfig: Read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartState, SharedEngine};
pub use config::{AppConfig, CONFIG_FILE_NAME};
