//! # Application State
//!
//! ```text
//! state/
//! ├── mod.rs      ◄─── AppState (storefront + config)
//! └── config.rs   ◄─── Configuration state
//! ```
//!
//! The dispatch loop owns one `AppState` and hands `&mut` borrows to each
//! command in turn, so no locking is needed here.

mod config;

pub use config::{ConfigState, STORE_FILE_NAME};

use std::sync::Arc;

use folio_core::clock::{Clock, SystemClock};
use folio_store::{JsonFileKv, MemoryKv, SharedKv, StoreResult, Storefront};
use tracing::{info, warn};

#[derive(Debug)]
pub struct AppState {
    pub storefront: Storefront,
    pub config: ConfigState,
}

impl AppState {
    /// Opens the key-value store the configuration points at.
    ///
    /// ## Backend Selection
    /// - `ephemeral` → in-memory
    /// - a resolvable store path → JSON file
    /// - neither → in-memory, with a warning
    pub fn open(config: ConfigState) -> StoreResult<Self> {
        let kv: SharedKv = if config.ephemeral {
            info!("Using in-memory store (ephemeral)");
            MemoryKv::shared()
        } else if let Some(path) = config.store_path() {
            info!(path = %path.display(), "Using JSON file store");
            Arc::new(JsonFileKv::open(path)?)
        } else {
            warn!("No data directory available, falling back to in-memory store");
            MemoryKv::shared()
        };

        Ok(Self::with_kv(config, kv, Arc::new(SystemClock)))
    }

    /// Builds state over an existing store and clock.
    pub fn with_kv(config: ConfigState, kv: SharedKv, clock: Arc<dyn Clock>) -> Self {
        AppState {
            storefront: Storefront::open(kv, clock),
            config,
        }
    }
}
