//! # Key-Value Port
//!
//! The persistence boundary: a string-keyed store of JSON strings, plus the
//! two adapters the storefront ships with.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Key-Value Persistence                             │
//! │                                                                         │
//! │  SessionStore   ReviewRepository   PurchaseRepository                   │
//! │       │                │                   │                            │
//! │       └────────────────┼───────────────────┘                            │
//! │                        ▼                                                │
//! │            SharedKv = Arc<dyn KeyValueStore>                            │
//! │                        │                                                │
//! │          ┌─────────────┴──────────────┐                                 │
//! │          ▼                            ▼                                 │
//! │     MemoryKv                     JsonFileKv                             │
//! │     (tests, ephemeral runs)      (one JSON object on disk)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Adapter Writes
//! Every `set`/`remove` rewrites the whole file: the new contents go to a
//! sibling `.tmp` file first, which is then renamed over the original. A
//! crash mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Port
// =============================================================================

/// A string-keyed store of serialized records.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Every key currently stored, in sorted order.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// The handle repositories share.
pub type SharedKv = Arc<dyn KeyValueStore>;

/// Reads and decodes a JSON record. A missing key is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> StoreResult<Option<T>> {
    match kv.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes and writes a JSON record.
pub fn write_json<T: Serialize + ?Sized>(kv: &dyn KeyValueStore, key: &str, value: &T) -> StoreResult<()> {
    kv.set(key, serde_json::to_string(value)?)
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// Keeps everything in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        MemoryKv::default()
    }

    /// Convenience constructor returning the shared handle.
    pub fn shared() -> SharedKv {
        Arc::new(MemoryKv::new())
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

// =============================================================================
// JSON File Adapter
// =============================================================================

/// Persists every entry as one JSON object in a single file.
///
/// The file is read once on open; after that the in-memory copy is the
/// source of truth and each mutation rewrites the file.
#[derive(Debug)]
pub struct JsonFileKv {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileKv {
    /// Opens (or prepares to create) the store at `path`.
    ///
    /// Parent directories are created as needed. A missing file is an
    /// empty store; an unreadable or malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened key-value file");

        Ok(JsonFileKv {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir()
            .join(format!("folio-kv-{}-{nanos}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_memory_kv_basic_ops() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("user").unwrap(), None);

        kv.set("user", "{}".to_string()).unwrap();
        kv.set("reviews_1", "[]".to_string()).unwrap();
        assert_eq!(kv.get("user").unwrap().as_deref(), Some("{}"));
        assert_eq!(kv.keys().unwrap(), vec!["reviews_1", "user"]);

        kv.remove("user").unwrap();
        kv.remove("user").unwrap();
        assert_eq!(kv.get("user").unwrap(), None);
    }

    #[test]
    fn test_json_helpers() {
        let kv = MemoryKv::new();
        write_json(&kv, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<i32>> = read_json(&kv, "numbers").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = read_json(&kv, "nothing").unwrap();
        assert_eq!(missing, None);

        kv.set("broken", "{not json".to_string()).unwrap();
        assert!(read_json::<Vec<i32>>(&kv, "broken").is_err());
    }

    #[test]
    fn test_json_file_kv_survives_reopen() {
        let path = scratch_path("store.json");

        {
            let kv = JsonFileKv::open(&path).unwrap();
            kv.set("user", r#"{"id":1}"#.to_string()).unwrap();
            kv.set("purchases_1", "[]".to_string()).unwrap();
            kv.remove("purchases_1").unwrap();
        }

        let kv = JsonFileKv::open(&path).unwrap();
        assert_eq!(kv.get("user").unwrap().as_deref(), Some(r#"{"id":1}"#));
        assert_eq!(kv.keys().unwrap(), vec!["user"]);
        assert!(!path.with_extension("json.tmp").exists());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_json_file_kv_rejects_garbage() {
        let path = scratch_path("garbage.json");
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, "not json at all").unwrap();

        assert!(JsonFileKv::open(&path).is_err());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
