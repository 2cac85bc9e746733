//! The vault service — the façade the UI layer talks to.
//!
//! Owns validity checking before mutation and the load/bootstrap path.
//! Everything else delegates to [`VaultStore`].  Validation failures
//! are `Ok(false)`, never errors: the caller is expected to prompt the
//! user to correct input, not to handle a fault.

use crate::errors::Result;

use super::record::{Collection, Credential};
use super::store::{Vault, VaultStore};

/// Mediates between the UI layer and the vault store.
///
/// Constructed once at startup with an explicit store (no ambient
/// globals) and passed to whatever consumes the vault.
pub struct VaultService {
    store: VaultStore,
}

impl VaultService {
    pub fn new(store: VaultStore) -> Self {
        Self { store }
    }

    /// Load the persisted vault, bootstrapping an empty one on first
    /// run.
    pub fn load(&mut self) -> Result<()> {
        self.store.reload()
    }

    /// Read-only access to the loaded vault.
    pub fn vault(&self) -> &Vault {
        self.store.vault()
    }

    /// Add or update a credential.
    ///
    /// Returns `Ok(false)` without mutating when `data` fails the
    /// validity invariant (see [`Credential::is_valid`]); otherwise
    /// upserts, persists, and returns `Ok(true)`.
    pub fn set_credential(&mut self, data: Credential) -> Result<bool> {
        if !data.is_valid() {
            return Ok(false);
        }
        self.store.upsert_credential(data)?;
        Ok(true)
    }

    /// Remove a credential.  Absence is not an error.
    pub fn remove_credential(&mut self, data: &Credential) -> Result<()> {
        self.store.remove_credential(data)
    }

    /// Create a collection.
    ///
    /// Returns `Ok(false)` when the trimmed name is empty; otherwise
    /// delegates to the store's collection upsert (which is a no-op if
    /// the name is already taken) and returns `Ok(true)`.
    pub fn set_collection(&mut self, data: Collection) -> Result<bool> {
        if data.name.trim().is_empty() {
            return Ok(false);
        }
        self.store.upsert_collection(data)?;
        Ok(true)
    }

    /// Remove a collection and its credentials.
    pub fn remove_collection(&mut self, data: &Collection) -> Result<()> {
        self.store.remove_collection(data)
    }
}
