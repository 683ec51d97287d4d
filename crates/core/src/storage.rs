//! Injected key-value storage capability.
//!
//! Durable local storage is a replica, never a source of truth during an
//! active session: the in-memory manager state is authoritative until the
//! next reload or login-triggered resync. Managers receive a store at
//! construction instead of reaching for ambient global state, so they stay
//! independently testable against [`MemoryStore`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

/// Well-known durable keys. All four are cleared together on logout.
pub mod keys {
    pub const CART: &str = "cart";
    pub const WISHLIST: &str = "wishlist";
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const USER: &str = "user";

    /// Session-scoped slot for the last-submitted search profile. Lives in a
    /// separate session-lifetime store, never in the durable one.
    pub const USER_PROFILE: &str = "user_profile";
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store: the test fake and the session-scoped (tab-lifetime)
/// store backing the profile slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Durable local store persisted as a single JSON object on disk.
///
/// Writes are best-effort: an I/O failure is logged and swallowed because
/// the in-memory copy stays authoritative and the durable mirror only has to
/// survive until the next successful write. A missing or corrupt file opens
/// as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries: Mutex::new(entries) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(
                    event_name = "storage.flush.serialize_failed",
                    error = %error,
                    "could not serialize local store"
                );
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if let Err(error) = std::fs::write(&self.path, serialized) {
            warn!(
                event_name = "storage.flush.write_failed",
                path = %self.path.display(),
                error = %error,
                "could not persist local store, keeping in-memory state"
            );
        }
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(error) => {
            warn!(
                event_name = "storage.open.read_failed",
                path = %path.display(),
                error = %error,
                "could not read local store, starting empty"
            );
            return HashMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(
                event_name = "storage.open.corrupt",
                path = %path.display(),
                error = %error,
                "local store is corrupt, starting empty"
            );
            HashMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.flush(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
            self.flush(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStore, KeyValueStore, MemoryStore};

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::default();
        assert_eq!(store.get("cart"), None);

        store.set("cart", "[]");
        assert_eq!(store.get("cart").as_deref(), Some("[]"));

        store.remove("cart");
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path);
        store.set("wishlist", "[{\"accessory_id\":\"ACC-1\"}]");
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("wishlist").as_deref(), Some("[{\"accessory_id\":\"ACC-1\"}]"));
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all").expect("write");

        let store = FileStore::open(&path);
        assert_eq!(store.get("cart"), None);
    }
}
