//! Integration tests for the vault store: dual-index consistency,
//! upsert/remove semantics, and the persisted wire form.

use passvault::secret_store::{MemoryStore, SecretStore, DATA_KEY};
use passvault::vault::{AutofillKind, Collection, Credential, Vault, VaultStore};

/// Helper: a valid credential in the given collection.
fn credential(name: &str, collection: &str) -> Credential {
    Credential {
        display_name: name.to_string(),
        username: "user".to_string(),
        email: format!("{name}@example.com"),
        website: format!("{name}.example.com"),
        password: "pw".to_string(),
        password_confirm: "pw".to_string(),
        autofill: AutofillKind::Username,
        collection: collection.to_string(),
        ..Credential::new()
    }
}

/// Helper: a fresh store over an in-memory backend, plus a handle onto
/// that backend so tests can inspect what was persisted.
fn store() -> (MemoryStore, VaultStore) {
    let backend = MemoryStore::new();
    let handle = backend.clone();
    (handle, VaultStore::new(Box::new(backend)))
}

/// Every credential in the flat index appears exactly once in its
/// collection with identical field values, and vice versa.
fn assert_indexes_consistent(vault: &Vault) {
    let flat = vault.credentials("");
    for c in flat {
        let coll = vault
            .collections()
            .get(&c.collection)
            .unwrap_or_else(|| panic!("collection '{}' missing for '{}'", c.collection, c.display_name));
        assert_eq!(
            coll.credentials.iter().filter(|x| x.id == c.id).count(),
            1,
            "credential '{}' not exactly once in its collection",
            c.display_name
        );
        let stored = coll.credentials.iter().find(|x| x.id == c.id).unwrap();
        assert_eq!(stored, c, "indexes disagree on '{}'", c.display_name);
    }
    for coll in vault.collections().values() {
        for c in &coll.credentials {
            assert_eq!(
                flat.iter().filter(|x| x.id == c.id).count(),
                1,
                "credential '{}' not exactly once in the flat index",
                c.display_name
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Upsert: insert path
// ---------------------------------------------------------------------------

#[test]
fn upsert_inserts_into_both_indexes() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();

    assert_eq!(store.vault().credentials("Work").len(), 1);
    assert_eq!(store.vault().credentials("").len(), 1);
    assert_indexes_consistent(store.vault());
}

#[test]
fn upsert_creates_the_target_collection_on_demand() {
    let (_handle, mut store) = store();
    assert!(store.vault().collections().is_empty());

    store.upsert_credential(credential("gmail", "Work")).unwrap();
    assert!(store.vault().collections().contains_key("Work"));
}

#[test]
fn upsert_persists_in_the_same_call() {
    let (handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();

    let blob = handle.get(DATA_KEY).unwrap().expect("blob written");
    assert!(blob.contains("\"displayname\":\"gmail\""));
}

// ---------------------------------------------------------------------------
// Upsert: update paths
// ---------------------------------------------------------------------------

#[test]
fn same_collection_update_replaces_in_place() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("a", "Work")).unwrap();
    let mut b = credential("b", "Work");
    store.upsert_credential(b.clone()).unwrap();
    store.upsert_credential(credential("c", "Work")).unwrap();

    b.website = "b.example.org".to_string();
    store.upsert_credential(b.clone()).unwrap();

    // Position preserved in both indexes, no duplicate created.
    let names: Vec<_> = store
        .vault()
        .credentials("Work")
        .iter()
        .map(|c| c.display_name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(store.vault().credentials("").len(), 3);
    assert_eq!(store.vault().credential(b.id).unwrap().website, "b.example.org");
    assert_indexes_consistent(store.vault());
}

#[test]
fn upsert_is_idempotent_bytewise() {
    let (handle, mut store) = store();
    let c = credential("gmail", "Work");

    store.upsert_credential(c.clone()).unwrap();
    let first = handle.get(DATA_KEY).unwrap().unwrap();

    store.upsert_credential(c).unwrap();
    let second = handle.get(DATA_KEY).unwrap().unwrap();

    assert_eq!(first, second);
}

#[test]
fn collection_change_moves_the_credential() {
    let (_handle, mut store) = store();
    let mut c = credential("gmail", "A");
    store.upsert_credential(c.clone()).unwrap();

    c.collection = "B".to_string();
    store.upsert_credential(c.clone()).unwrap();

    // Gone from A, present in B, B created on demand, A still exists.
    assert!(store.vault().credentials("A").is_empty());
    assert_eq!(store.vault().credentials("B").len(), 1);
    assert!(store.vault().collections().contains_key("A"));
    assert_eq!(store.vault().credentials("").len(), 1);
    assert_indexes_consistent(store.vault());
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn unknown_collection_is_empty_not_an_error() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();

    assert!(store.vault().credentials("Nope").is_empty());
}

#[test]
fn credential_lookup_by_id() {
    let (_handle, mut store) = store();
    let c = credential("gmail", "Work");
    store.upsert_credential(c.clone()).unwrap();

    assert_eq!(store.vault().credential(c.id).unwrap().display_name, "gmail");
    assert!(store.vault().credential(uuid::Uuid::new_v4()).is_none());
}

// ---------------------------------------------------------------------------
// Remove credential
// ---------------------------------------------------------------------------

#[test]
fn remove_credential_empties_both_indexes_but_keeps_the_collection() {
    let (_handle, mut store) = store();
    let c = credential("gmail", "Work");
    store.upsert_credential(c.clone()).unwrap();

    store.remove_credential(&c).unwrap();

    assert!(store.vault().credentials("Work").is_empty());
    assert!(store.vault().credentials("").is_empty());
    // The collection itself is never auto-deleted.
    assert!(store.vault().collections().contains_key("Work"));
    assert_indexes_consistent(store.vault());
}

#[test]
fn remove_absent_credential_is_a_no_op() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();

    store.remove_credential(&credential("other", "Work")).unwrap();
    assert_eq!(store.vault().credentials("").len(), 1);
}

// ---------------------------------------------------------------------------
// Collection upsert / remove
// ---------------------------------------------------------------------------

#[test]
fn collection_upsert_never_overwrites_an_existing_one() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();

    // Upserting a "Work" collection carrying other credentials is a
    // no-op: no overwrite, no merge.
    let mut imposter = Collection::new("Work");
    imposter.credentials.push(credential("smuggled", "Work"));
    store.upsert_collection(imposter).unwrap();

    assert_eq!(store.vault().credentials("Work").len(), 1);
    assert_eq!(store.vault().credentials("Work")[0].display_name, "gmail");
    assert_indexes_consistent(store.vault());
}

#[test]
fn collection_upsert_with_credentials_feeds_the_flat_index() {
    let (_handle, mut store) = store();
    let mut coll = Collection::new("Import");
    coll.credentials.push(credential("a", "Import"));
    coll.credentials.push(credential("b", "Import"));

    store.upsert_collection(coll).unwrap();

    assert_eq!(store.vault().credentials("").len(), 2);
    assert_indexes_consistent(store.vault());
}

#[test]
fn remove_collection_cascades_into_the_flat_index() {
    let (_handle, mut store) = store();
    store.upsert_credential(credential("a1", "A")).unwrap();
    store.upsert_credential(credential("a2", "A")).unwrap();
    store.upsert_credential(credential("b1", "B")).unwrap();

    let a = store.vault().collections().get("A").cloned().unwrap();
    store.remove_collection(&a).unwrap();

    assert!(!store.vault().collections().contains_key("A"));
    let remaining: Vec<_> = store
        .vault()
        .credentials("")
        .iter()
        .map(|c| c.display_name.as_str())
        .collect();
    assert_eq!(remaining, ["b1"]);
    assert_indexes_consistent(store.vault());
}

// ---------------------------------------------------------------------------
// Serialization round-trip and hydrate
// ---------------------------------------------------------------------------

#[test]
fn hydrate_of_serialized_vault_is_structurally_equal() {
    let (handle, mut store) = store();
    store.upsert_credential(credential("gmail", "Work")).unwrap();
    store.upsert_credential(credential("bank", "Money")).unwrap();
    store.upsert_credential(credential("forum", "")).unwrap();

    let blob = handle.get(DATA_KEY).unwrap().unwrap();
    let hydrated = Vault::hydrate(&blob);

    let original = store.vault();
    assert_eq!(
        hydrated.collections().keys().collect::<Vec<_>>(),
        original.collections().keys().collect::<Vec<_>>()
    );
    for (name, coll) in original.collections() {
        let h = &hydrated.collections()[name];
        assert_eq!(h.credentials.len(), coll.credentials.len());
        for (a, b) in h.credentials.iter().zip(&coll.credentials) {
            // Ids are regenerated on hydrate; everything else survives.
            assert_eq!(a.display_name, b.display_name);
            assert_eq!(a.username, b.username);
            assert_eq!(a.email, b.email);
            assert_eq!(a.website, b.website);
            assert_eq!(a.password, b.password);
            assert_eq!(a.autofill, b.autofill);
            assert_eq!(a.collection, b.collection);
        }
    }
    assert_indexes_consistent(&hydrated);
}

#[test]
fn hydrate_rebuilds_the_flat_index_in_collection_name_order() {
    let (handle, mut store) = store();
    store.upsert_credential(credential("zed", "Zoo")).unwrap();
    store.upsert_credential(credential("abe", "Ark")).unwrap();
    store.upsert_credential(credential("ant", "Ark")).unwrap();

    let blob = handle.get(DATA_KEY).unwrap().unwrap();
    let hydrated = Vault::hydrate(&blob);

    let names: Vec<_> = hydrated
        .credentials("")
        .iter()
        .map(|c| c.display_name.as_str())
        .collect();
    // "Ark" sorts before "Zoo"; insertion order kept within each.
    assert_eq!(names, ["abe", "ant", "zed"]);
}

#[test]
fn hydrate_of_garbage_yields_an_empty_vault() {
    let vault = Vault::hydrate("definitely { not json");
    assert!(vault.collections().is_empty());
    assert_eq!(vault.credential_count(), 0);
}

// ---------------------------------------------------------------------------
// Consistency under a mixed operation sequence
// ---------------------------------------------------------------------------

#[test]
fn indexes_stay_consistent_through_a_mixed_sequence() {
    let (_handle, mut store) = store();

    let mut a = credential("a", "One");
    let b = credential("b", "One");
    let c = credential("c", "Two");

    store.upsert_credential(a.clone()).unwrap();
    assert_indexes_consistent(store.vault());
    store.upsert_credential(b.clone()).unwrap();
    assert_indexes_consistent(store.vault());
    store.upsert_credential(c.clone()).unwrap();
    assert_indexes_consistent(store.vault());

    a.collection = "Two".to_string();
    store.upsert_credential(a.clone()).unwrap();
    assert_indexes_consistent(store.vault());

    store.remove_credential(&b).unwrap();
    assert_indexes_consistent(store.vault());

    store.upsert_collection(Collection::new("Three")).unwrap();
    assert_indexes_consistent(store.vault());

    let two = store.vault().collections().get("Two").cloned().unwrap();
    store.remove_collection(&two).unwrap();
    assert_indexes_consistent(store.vault());

    assert!(store.vault().credentials("").is_empty());
}
