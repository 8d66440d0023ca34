//! # Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Cart                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     Storefront Views (SPA)                       │  │
//! │  │  • Product Listing       • Product Detail      • Cart Page       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                    │ stdin (JSON lines)   ▲ stdout (JSON lines)        │
//! │                    ▼                      │                            │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Reads the optional config path argument           │  │
//! │  │  lib.rs ─────► Config, logging, request loop                     │  │
//! │  │  commands/ ──► get_cart, add_to_cart, update_cart_item, ...      │  │
//! │  │  state/ ─────► CartState, AppConfig                              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     cart.json (snapshot)                         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! storefront [path/to/storefront.toml]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match storefront::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
