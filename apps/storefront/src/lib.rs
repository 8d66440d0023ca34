//! # Storefront Library
//!
//! Command layer standing between the storefront views and the cart engine.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & request loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Shared cart engine
//! │   └── config.rs   ◄─── App configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request parsing & dispatch
//! │   └── cart.rs     ◄─── Cart manipulation commands
//! └── error.rs        ◄─── ApiError / AppError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use storefront_core::CartStore;
use storefront_store::{FileCartStore, StoreConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use error::AppResult;
use state::{AppConfig, CartState};

/// Runs the storefront command loop until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env                     │
/// │     • logged through a temporary stderr subscriber at INFO              │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else the configured filter; written to stderr           │
/// │     • then report a config fallback, if one happened                    │
/// │                                                                         │
/// │  3. Resolve Cart Snapshot Path ───────────────────────────────────────► │
/// │     • config → STOREFRONT_CART_PATH → platform data dir                 │
/// │                                                                         │
/// │  4. Open Cart State ──────────────────────────────────────────────────► │
/// │     • Hydrate from the snapshot (corrupt data → empty cart)             │
/// │                                                                         │
/// │  5. Serve Requests ───────────────────────────────────────────────────► │
/// │     • one JSON request per stdin line, one reply per stdout line        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = prepare(config_path);

    info!("Starting storefront cart service");

    let store_config = StoreConfig::resolve(config.cart_path.clone())?;
    info!(path = ?store_config.path(), "Cart snapshot path determined");

    let cart = CartState::open(FileCartStore::new(store_config));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&cart, &config, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Answers each non-blank line of `input` with one line on `output`.
pub fn serve<S, R, W>(cart: &CartState<S>, config: &AppConfig, input: R, mut output: W) -> AppResult<()>
where
    S: CartStore,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = commands::handle_line(cart, config, &line)?;
        writeln!(output, "{}", reply)?;
        output.flush()?;
    }

    debug!("Request loop finished");
    Ok(())
}

/// Loads configuration and installs logging.
///
/// The log filter lives in the config, so loading runs under a bootstrap
/// subscriber and a fallback to defaults is reported once the real one is up.
fn prepare(config_path: Option<PathBuf>) -> AppConfig {
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(std::io::stderr)
        .finish();
    let (config, load_error) = tracing::subscriber::with_default(bootstrap, || {
        AppConfig::load_with_fallback(config_path)
    });

    init_tracing(&config.log_filter);

    if let Some(e) = load_error {
        warn!("Failed to load storefront config: {}. Using defaults.", e);
    }

    config
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Show trace for the engine only
/// - Default: the configured `log_filter`
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut guard = self
                .0
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
            guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<R>(f: impl FnOnce() -> R) -> (R, String) {
        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, sink.text())
    }

    fn bad_config() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(state::CONFIG_FILE_NAME);
        std::fs::write(&path, "currency_decimals = \"many\"").unwrap();
        (dir, path)
    }

    #[test]
    fn test_config_fallback_is_not_logged_during_load() {
        let (_dir, path) = bad_config();

        let ((_, error), logs) = capture(|| AppConfig::load_with_fallback(Some(path)));

        assert!(error.is_some());
        assert!(!logs.contains("Failed to load storefront config"));
    }

    #[test]
    fn test_config_fallback_is_logged_after_tracing_init() {
        let (_dir, path) = bad_config();

        let (config, logs) = capture(|| prepare(Some(path)));

        assert_eq!(config.currency_symbol, AppConfig::default().currency_symbol);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Failed to load storefront config"));
    }
}
