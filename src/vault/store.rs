//! The vault store — sole authority for credential and collection data.
//!
//! A [`Vault`] holds two parallel indexes: the collection map (the
//! durable source of truth) and a flat credential list (a materialized
//! read cache).  Every credential appears exactly once in each, with
//! identical field values, after every operation.  All mutation goes
//! through methods on this module so the two indexes can never drift;
//! the flat list is rebuilt from the collections on hydrate and is
//! never serialized.
//!
//! [`VaultStore`] couples a `Vault` with a [`SecretStore`] backend:
//! every mutating operation re-serializes the vault and writes it
//! through to the backend before returning.  There is no separate
//! flush step and no batching.

use std::collections::BTreeMap;

use tracing::warn;
use uuid::Uuid;

use crate::errors::Result;
use crate::secret_store::{SecretStore, DATA_KEY};

use super::format;
use super::record::{Collection, Credential};

const NO_CREDENTIALS: &[Credential] = &[];

/// The complete in-memory data model: all collections plus the flat
/// credential index.
#[derive(Debug, Default)]
pub struct Vault {
    /// Collection name -> collection.  Durable source of truth.
    /// A `BTreeMap` so iteration (and thus the serialized form and the
    /// rebuilt flat index) is ordered by collection name.
    collections: BTreeMap<String, Collection>,

    /// Flat list of every credential across all collections.  Derived;
    /// kept in lockstep with `collections` by the mutators below.
    credentials: Vec<Credential>,
}

impl Vault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize a persisted blob.
    ///
    /// Fails soft: malformed input is logged and yields an empty,
    /// usable vault rather than an error.  The flat index is rebuilt
    /// by flattening the collections in map order (sorted by name)
    /// with per-collection insertion order preserved.
    pub fn hydrate(blob: &str) -> Self {
        let collections = match format::decode(blob) {
            Ok(collections) => collections,
            Err(e) => {
                warn!(error = %e, "malformed vault blob, starting with an empty vault");
                BTreeMap::new()
            }
        };

        let credentials = collections
            .values()
            .flat_map(|c| c.credentials.iter().cloned())
            .collect();

        Self {
            collections,
            credentials,
        }
    }

    /// Encode the vault to its persisted form.
    ///
    /// Only the collection map is encoded; the flat index is never
    /// serialized.  Output is canonical (see `vault::format`).
    pub fn serialize(&self) -> Result<String> {
        format::encode(&self.collections)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Read-only view of all collections, keyed by name.
    pub fn collections(&self) -> &BTreeMap<String, Collection> {
        &self.collections
    }

    /// The credentials of the named collection, or every credential
    /// when `collection` is empty.  An unknown name yields an empty
    /// slice — absence is emptiness, not failure.
    pub fn credentials(&self, collection: &str) -> &[Credential] {
        if collection.is_empty() {
            &self.credentials
        } else {
            self.collections
                .get(collection)
                .map(|c| c.credentials.as_slice())
                .unwrap_or(NO_CREDENTIALS)
        }
    }

    /// Look up a credential by id in the flat index.
    pub fn credential(&self, id: Uuid) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Total number of credentials in the vault.
    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    // ------------------------------------------------------------------
    // Mutation (in-memory; persistence lives on `VaultStore`)
    // ------------------------------------------------------------------

    /// Add or update a credential, matched by id.
    ///
    /// A same-collection update replaces the record in place in both
    /// indexes (list position is display order and must not change).
    /// A collection change removes the record from its old collection
    /// and re-inserts it into the new one, creating that collection if
    /// needed.  No validation happens here; the store accepts any
    /// well-formed credential value.
    fn upsert_credential(&mut self, data: Credential) {
        match self.credentials.iter().position(|c| c.id == data.id) {
            Some(idx) => {
                let old_collection = self.credentials[idx].collection.clone();
                if old_collection == data.collection {
                    self.replace_in_collection(&data);
                    self.credentials[idx] = data;
                } else {
                    if let Some(coll) = self.collections.get_mut(&old_collection) {
                        coll.credentials.retain(|c| c.id != data.id);
                    }
                    self.credentials.remove(idx);
                    self.insert_fresh(data);
                }
            }
            None => self.insert_fresh(data),
        }
    }

    /// Remove a credential by id from both indexes.  No-op if absent.
    fn remove_credential(&mut self, data: &Credential) {
        let stored_collection = self
            .credential(data.id)
            .map(|c| c.collection.clone())
            .unwrap_or_else(|| data.collection.clone());

        self.credentials.retain(|c| c.id != data.id);
        if let Some(coll) = self.collections.get_mut(&stored_collection) {
            coll.credentials.retain(|c| c.id != data.id);
        }
    }

    /// Insert a collection if no collection with that name exists.
    ///
    /// If one already exists this is a no-op: the existing collection
    /// is neither overwritten nor merged.  That asymmetry with
    /// credential upsert is deliberate and matches the UI's "create
    /// collection" action, which never edits in place.
    fn upsert_collection(&mut self, data: Collection) {
        if self.collections.contains_key(&data.name) {
            return;
        }
        // Any credentials the new collection carries enter the flat
        // index too, keeping the cross-index invariant.
        self.credentials.extend(data.credentials.iter().cloned());
        self.collections.insert(data.name.clone(), data);
    }

    /// Remove a collection and its credentials.
    ///
    /// Cascades: the removed collection's credentials are dropped from
    /// the flat index as well, so no orphaned records survive that a
    /// collection lookup could never reach.
    fn remove_collection(&mut self, data: &Collection) {
        if let Some(removed) = self.collections.remove(&data.name) {
            let ids: Vec<Uuid> = removed.credentials.iter().map(|c| c.id).collect();
            self.credentials.retain(|c| !ids.contains(&c.id));
        }
    }

    /// Append a credential not currently in the vault, creating its
    /// collection on first reference.
    fn insert_fresh(&mut self, data: Credential) {
        self.credentials.push(data.clone());
        self.collections
            .entry(data.collection.clone())
            .or_insert_with(|| Collection::new(data.collection.clone()))
            .credentials
            .push(data);
    }

    /// Replace a credential in its collection's sequence at the same
    /// position, re-inserting it if the sequence lost it.
    fn replace_in_collection(&mut self, data: &Credential) {
        let coll = self
            .collections
            .entry(data.collection.clone())
            .or_insert_with(|| Collection::new(data.collection.clone()));
        match coll.credentials.iter().position(|c| c.id == data.id) {
            Some(pos) => coll.credentials[pos] = data.clone(),
            None => coll.credentials.push(data.clone()),
        }
    }
}

/// A vault coupled to its persistence backend.
///
/// One instance per process, constructed at startup and handed to the
/// service façade.  All operations are synchronous and run to
/// completion on the calling thread; `&mut self` on every mutator is
/// what serializes access.
pub struct VaultStore {
    backend: Box<dyn SecretStore>,
    vault: Vault,
}

impl VaultStore {
    /// Create a store over the given backend with an empty vault.
    /// Call [`reload`](Self::reload) to pull in persisted state.
    pub fn new(backend: Box<dyn SecretStore>) -> Self {
        Self {
            backend,
            vault: Vault::new(),
        }
    }

    /// Replace the in-memory vault with the persisted one.
    ///
    /// First run bootstraps the store: if nothing is stored under the
    /// data key yet, an empty serialized vault is written there before
    /// hydrating from it.
    pub fn reload(&mut self) -> Result<()> {
        let blob = match self.backend.get(DATA_KEY)? {
            Some(blob) => blob,
            None => {
                let empty = Vault::new().serialize()?;
                self.backend.set(DATA_KEY, &empty)?;
                empty
            }
        };
        self.vault = Vault::hydrate(&blob);
        Ok(())
    }

    /// Read-only access to the in-memory vault.
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Add or update a credential and write the vault through to the
    /// backend.  Succeeds unconditionally once the write completes;
    /// validation is the service layer's job.
    pub fn upsert_credential(&mut self, data: Credential) -> Result<()> {
        self.vault.upsert_credential(data);
        self.persist()
    }

    /// Remove a credential (no-op if absent) and persist.
    pub fn remove_credential(&mut self, data: &Credential) -> Result<()> {
        self.vault.remove_credential(data);
        self.persist()
    }

    /// Insert a collection unless the name is taken (see
    /// [`Vault::upsert_collection`]) and persist regardless.
    pub fn upsert_collection(&mut self, data: Collection) -> Result<()> {
        self.vault.upsert_collection(data);
        self.persist()
    }

    /// Remove a collection and its credentials, and persist.
    pub fn remove_collection(&mut self, data: &Collection) -> Result<()> {
        self.vault.remove_collection(data);
        self.persist()
    }

    /// Write the freshly serialized vault under the data key.  The
    /// backend is trusted to succeed or report; no verification read.
    fn persist(&mut self) -> Result<()> {
        let blob = self.vault.serialize()?;
        self.backend.set(DATA_KEY, &blob)
    }
}
