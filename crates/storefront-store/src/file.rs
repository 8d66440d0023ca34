//! # File Cart Store
//!
//! JSON snapshot on the local file system.
//!
//! ## Write Path
//! ```text
//! save(lines)
//!      │
//!      ▼
//! snapshot::encode ──► cart.json.tmp ──rename──► cart.json
//! ```
//!
//! The rename keeps a crash mid-write from leaving a half-written snapshot;
//! readers see either the old cart or the new one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use storefront_core::{snapshot, CartLine, CartStore, StoreResult};
use tracing::{debug, trace};

use crate::config::StoreConfig;

/// [`CartStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    config: StoreConfig,
}

impl FileCartStore {
    pub fn new(config: StoreConfig) -> Self {
        FileCartStore { config }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path()
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path().with_file_name(name)
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> StoreResult<Option<Vec<CartLine>>> {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path(), "No cart snapshot on disk");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            debug!(path = ?self.path(), "Cart snapshot is empty");
            return Ok(None);
        }

        snapshot::decode(&raw).map(Some)
    }

    fn save(&self, lines: &[CartLine]) -> StoreResult<()> {
        let raw = snapshot::encode(lines)?;

        if let Some(parent) = self.path().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, raw)?;
        fs::rename(&temp, self.path())?;

        trace!(path = ?self.path(), lines = lines.len(), "Cart snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_sits_next_to_snapshot() {
        let store = FileCartStore::new(StoreConfig::new("/data/shop/cart.json"));
        assert_eq!(store.temp_path(), PathBuf::from("/data/shop/cart.json.tmp"));
    }
}
