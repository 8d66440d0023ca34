//! # Storage Configuration
//!
//! Where the cart snapshot lives.
//!
//! ## Path Resolution (first match wins)
//! 1. An explicit path (from the app config file)
//! 2. `STOREFRONT_CART_PATH` environment variable
//! 3. Platform data directory:
//!    - **macOS**: `~/Library/Application Support/com.storefront.shop/cart.json`
//!    - **Windows**: `%APPDATA%\storefront\shop\data\cart.json`
//!    - **Linux**: `~/.local/share/shop/cart.json`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use storefront_core::{StoreError, StoreResult};
use tracing::debug;

/// Environment variable overriding the snapshot path.
pub const CART_PATH_ENV: &str = "STOREFRONT_CART_PATH";

/// File name used inside the platform data directory.
pub const CART_FILE_NAME: &str = "cart.json";

/// Storage configuration.
///
/// ## Example
/// ```rust
/// use storefront_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/shop/cart.json");
/// assert!(config.path().ends_with("cart.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    path: PathBuf,
}

impl StoreConfig {
    /// Uses `path` as the snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Resolves the snapshot path from an explicit value, the environment, or
    /// the platform data directory.
    pub fn resolve(explicit: Option<PathBuf>) -> StoreResult<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Using configured cart path");
            return Ok(StoreConfig::new(path));
        }

        if let Ok(path) = std::env::var(CART_PATH_ENV) {
            debug!(%path, "Using cart path from environment");
            return Ok(StoreConfig::new(path));
        }

        Self::default_path()
            .map(StoreConfig::new)
            .ok_or_else(|| StoreError::Io("Could not determine app data directory".to_string()))
    }

    /// Shorthand for `resolve(None)`.
    pub fn from_env() -> StoreResult<Self> {
        Self::resolve(None)
    }

    /// Platform-specific default location.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "shop")
            .map(|dirs| dirs.data_dir().join(CART_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = StoreConfig::resolve(Some(PathBuf::from("/srv/carts/a.json"))).unwrap();
        assert_eq!(config.path(), Path::new("/srv/carts/a.json"));
    }

    #[test]
    fn test_default_path_uses_cart_file_name() {
        if let Some(path) = StoreConfig::default_path() {
            assert!(path.ends_with(CART_FILE_NAME));
        }
    }
}
