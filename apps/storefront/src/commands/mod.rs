//! # Commands Module
//!
//! Every command the storefront views can send.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Request, dispatch)
//! └── cart.rs     ◄─── Cart manipulation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View                                                                   │
//! │  ────                                                                   │
//! │  {"command":"update_cart_item","productId":"1","quantity":3}            │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdin)                           │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  handle_line()                                                          │
//! │    ├── serde_json::from_str::<Request>()  ◄── BAD_REQUEST on failure    │
//! │    └── dispatch()                                                       │
//! │          └── cart::update_cart_item(&state, &config, "1", 3)            │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdout)                          │
//! │         ▼                                                               │
//! │  View receives: CartResponse | ApiError                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

use serde::Deserialize;
use storefront_core::{string_or_number, CartStore, CatalogProduct};

use crate::error::ApiError;
use crate::state::{AppConfig, CartState};

pub use cart::CartResponse;

/// A request line, tagged by `command`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    GetCart,
    AddToCart {
        product: CatalogProduct,
        #[serde(default)]
        quantity: Option<i64>,
    },
    UpdateCartItem {
        #[serde(rename = "productId", deserialize_with = "string_or_number")]
        product_id: String,
        quantity: i64,
    },
    RemoveFromCart {
        #[serde(rename = "productId", deserialize_with = "string_or_number")]
        product_id: String,
    },
    ClearCart,
}

/// Routes a parsed request to its handler.
pub fn dispatch<S: CartStore>(
    state: &CartState<S>,
    config: &AppConfig,
    request: Request,
) -> Result<CartResponse, ApiError> {
    match request {
        Request::GetCart => Ok(cart::get_cart(state, config)),
        Request::AddToCart { product, quantity } => {
            cart::add_to_cart(state, config, product, quantity)
        }
        Request::UpdateCartItem {
            product_id,
            quantity,
        } => Ok(cart::update_cart_item(state, config, &product_id, quantity)),
        Request::RemoveFromCart { product_id } => {
            Ok(cart::remove_from_cart(state, config, &product_id))
        }
        Request::ClearCart => Ok(cart::clear_cart(state, config)),
    }
}

/// Parses one request line, runs it and encodes the reply.
///
/// Command failures become an encoded [`ApiError`]; the outer `Err` only
/// appears when even that cannot be written.
pub fn handle_line<S: CartStore>(
    state: &CartState<S>,
    config: &AppConfig,
    line: &str,
) -> serde_json::Result<String> {
    let reply = serde_json::from_str::<Request>(line)
        .map_err(ApiError::from)
        .and_then(|request| dispatch(state, config, request));

    match reply {
        Ok(response) => serde_json::to_string(&response).or_else(|e| {
            tracing::error!("Failed to encode cart response: {}", e);
            serde_json::to_string(&ApiError::internal("Failed to encode reply"))
        }),
        Err(err) => serde_json::to_string(&err),
    }
}
