//! Secret store backends — where the serialized vault actually lives.
//!
//! The vault persists as one opaque blob under a single well-known key
//! in the operating system's secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! `SecretStore` is the seam between the vault core and the platform:
//! the production backend is [`KeyringStore`]; tests (and anything
//! else that wants a throwaway vault) use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::errors::{PassVaultError, Result};

/// The secret-store key holding the entire serialized vault.
pub const DATA_KEY: &str = "data";

/// The secret-store key holding the master-password gate secret.
pub const AUTH_KEY: &str = "auth";

/// Default service name used in the OS keyring.
pub const SERVICE_NAME: &str = "passvault";

/// An opaque key-value blob store.
///
/// Lookup misses are `Ok(None)`, not errors.  Writes are assumed to
/// either succeed or surface a backend error; no verification re-read
/// is performed by callers.
pub trait SecretStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// The keys currently present in the store.
    fn keys(&self) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// OS keyring backend
// ---------------------------------------------------------------------------

/// Secret store backed by the OS keyring via the `keyring` crate.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Create a store using the given keyring service name.
    ///
    /// The service name namespaces all entries, so pointing two
    /// processes at different service names gives them independent
    /// vaults (used to keep dev/test vaults away from the real one).
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key).map_err(|e| {
            PassVaultError::SecretStore(format!("failed to create keyring entry: {e}"))
        })
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(PassVaultError::SecretStore(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value).map_err(|e| {
            PassVaultError::SecretStore(format!("failed to write to keyring: {e}"))
        })
    }

    /// The OS keyring API cannot enumerate entries, and the app only
    /// ever uses two well-known keys, so this probes that fixed set.
    fn keys(&self) -> Result<Vec<String>> {
        let mut present = Vec::new();
        for key in [DATA_KEY, AUTH_KEY] {
            if self.get(key)?.is_some() {
                present.push(key.to_string());
            }
        }
        Ok(present)
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// In-memory secret store for tests and throwaway vaults.
///
/// Cloning yields a handle onto the same underlying map, so a test can
/// keep one handle while the vault owns another and inspect what was
/// persisted.  Not `Sync` — the whole core is single-threaded by
/// design.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("data").unwrap(), None);

        store.set("data", "{}").unwrap();
        assert_eq!(store.get("data").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.keys().unwrap(), vec!["data".to_string()]);
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("auth", "s3cret").unwrap();
        assert_eq!(handle.get("auth").unwrap().as_deref(), Some("s3cret"));
    }
}
