//! # App Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CART_PATH=/srv/shop/cart.json                            │
//! │     STOREFRONT_CURRENCY_SYMBOL=€                                        │
//! │     STOREFRONT_CURRENCY_DECIMALS=2                                      │
//! │     STOREFRONT_LOG=debug                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shop/storefront.toml (Linux)                              │
//! │     ~/Library/Application Support/com.storefront.shop/storefront.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! cart_path = "/srv/shop/cart.json"
//! currency_symbol = "$"
//! currency_decimals = 2
//! log_filter = "info,storefront=debug"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Largest supported number of currency decimals.
const MAX_CURRENCY_DECIMALS: u8 = 6;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the cart snapshot lives. `None` defers to `StoreConfig::resolve`.
    pub cart_path: Option<PathBuf>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// `tracing_subscriber::EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            cart_path: None,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            log_filter: "info,storefront=debug".to_string(),
        }
    }
}

impl AppConfig {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads configuration: defaults, then the TOML file, then environment.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config, falling back to defaults (plus environment) on failure.
    ///
    /// The failure is handed back instead of logged so the caller can report
    /// it once logging is up; the log filter itself comes from this config.
    pub fn load_with_fallback(config_path: Option<PathBuf>) -> (Self, Option<AppError>) {
        match Self::load(config_path) {
            Ok(config) => (config, None),
            Err(e) => {
                let mut config = Self::default();
                config.apply_env_overrides();
                if config.validate().is_err() {
                    config = Self::default();
                }
                (config, Some(e))
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(AppError::Config(format!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("STOREFRONT_CART_PATH") {
            debug!(path = %path, "Overriding cart path from environment");
            self.cart_path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = var("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = var("STOREFRONT_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid STOREFRONT_CURRENCY_DECIMALS"),
            }
        }

        if let Some(filter) = var("STOREFRONT_LOG") {
            self.log_filter = filter;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "shop")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Formats a cent amount as a currency string.
    ///
    /// Amounts are stored in cents; with more than two decimals the value is
    /// scaled up, with fewer it is truncated.
    ///
    /// ## Example
    /// ```rust
    /// use storefront::state::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// assert_eq!(config.format_currency(-50), "-$0.50");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        let whole = cents / 100;
        let frac = cents % 100;

        let amount = match self.currency_decimals {
            0 => whole.to_string(),
            1 => format!("{}.{}", whole, frac / 10),
            2 => format!("{}.{:02}", whole, frac),
            d => {
                let width = d as usize;
                format!("{}.{:0<width$}", whole, format!("{:02}", frac), width = width)
            }
        };

        format!("{}{}{}", sign, self.currency_symbol, amount)
    }
}
