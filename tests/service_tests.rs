//! Integration tests for the vault service façade: validation gating,
//! load/bootstrap, and the end-to-end scenarios the UI relies on.

use passvault::secret_store::{MemoryStore, SecretStore, DATA_KEY};
use passvault::vault::{AutofillKind, Collection, Credential, VaultService, VaultStore};

/// Helper: a loaded service over a fresh in-memory backend, plus a
/// handle onto the backend.
fn service() -> (MemoryStore, VaultService) {
    let backend = MemoryStore::new();
    let handle = backend.clone();
    let mut service = VaultService::new(VaultStore::new(Box::new(backend)));
    service.load().expect("load empty vault");
    (handle, service)
}

fn gmail() -> Credential {
    Credential {
        display_name: "Gmail".to_string(),
        username: "bob".to_string(),
        email: "bob@x.com".to_string(),
        website: "gmail.com".to_string(),
        password: "p".to_string(),
        password_confirm: "p".to_string(),
        autofill: AutofillKind::Email,
        collection: "Work".to_string(),
        ..Credential::new()
    }
}

// ---------------------------------------------------------------------------
// Load and bootstrap
// ---------------------------------------------------------------------------

#[test]
fn first_load_bootstraps_an_empty_blob() {
    let backend = MemoryStore::new();
    let handle = backend.clone();
    assert_eq!(handle.get(DATA_KEY).unwrap(), None);

    let mut service = VaultService::new(VaultStore::new(Box::new(backend)));
    service.load().unwrap();

    // The empty vault was written under the data key before hydrating.
    assert_eq!(handle.get(DATA_KEY).unwrap().as_deref(), Some("{}"));
    assert!(service.vault().collections().is_empty());
}

#[test]
fn load_reads_an_existing_blob() {
    let backend = MemoryStore::new();
    backend
        .set(
            DATA_KEY,
            r#"{"Work":{"name":"Work","passwords":[
                {"displayname":"Gmail","username":"bob","email":"bob@x.com",
                 "website":"gmail.com","password":"p","description":"",
                 "autofill":"email","keychain":"Work"}]}}"#,
        )
        .unwrap();

    let mut service = VaultService::new(VaultStore::new(Box::new(backend)));
    service.load().unwrap();

    assert_eq!(service.vault().credentials("Work").len(), 1);
    assert_eq!(service.vault().credentials("")[0].display_name, "Gmail");
}

#[test]
fn load_survives_a_corrupt_blob() {
    let backend = MemoryStore::new();
    backend.set(DATA_KEY, "corrupted beyond repair").unwrap();

    let mut service = VaultService::new(VaultStore::new(Box::new(backend)));
    service.load().unwrap();

    // Deserialization failure is non-fatal: empty but usable.
    assert!(service.vault().collections().is_empty());
    assert!(service.set_credential(gmail()).unwrap());
}

// ---------------------------------------------------------------------------
// Validity gate
// ---------------------------------------------------------------------------

#[test]
fn mismatched_confirmation_is_rejected_without_mutation() {
    let (handle, mut service) = service();
    let before = handle.get(DATA_KEY).unwrap();

    let mut c = gmail();
    c.password_confirm = "different".to_string();
    let id = c.id;

    assert!(!service.set_credential(c).unwrap());
    assert!(service.vault().credential(id).is_none());
    // Nothing was persisted either.
    assert_eq!(handle.get(DATA_KEY).unwrap(), before);
}

#[test]
fn missing_autofill_field_is_rejected() {
    let (_handle, mut service) = service();

    let mut c = gmail();
    c.autofill = AutofillKind::Email;
    c.email = String::new();
    assert!(!service.set_credential(c).unwrap());

    let mut c = gmail();
    c.autofill = AutofillKind::None;
    assert!(!service.set_credential(c).unwrap());
}

#[test]
fn empty_collection_name_is_rejected() {
    let (_handle, mut service) = service();
    assert!(!service.set_collection(Collection::new("   ")).unwrap());
    assert!(service.vault().collections().is_empty());
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn create_collection_on_empty_vault() {
    let (_handle, mut service) = service();

    assert!(service.set_collection(Collection::new("Work")).unwrap());

    let collections = service.vault().collections();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections["Work"].name, "Work");
    assert!(collections["Work"].credentials.is_empty());
}

#[test]
fn add_then_remove_a_credential() {
    let (_handle, mut service) = service();
    let c = gmail();

    assert!(service.set_credential(c.clone()).unwrap());
    assert_eq!(service.vault().credentials("Work").len(), 1);
    assert_eq!(service.vault().credentials("").len(), 1);

    service.remove_credential(&c).unwrap();
    assert!(service.vault().credentials("Work").is_empty());
    assert!(service.vault().credentials("").is_empty());
    // The collection entry itself survives.
    assert!(service.vault().collections().contains_key("Work"));
}

#[test]
fn edits_are_visible_after_a_reload() {
    let (handle, mut service) = service();
    assert!(service.set_credential(gmail()).unwrap());

    // A second service over the same backend sees the write.
    let mut second = VaultService::new(VaultStore::new(Box::new(handle)));
    second.load().unwrap();
    assert_eq!(second.vault().credentials("Work").len(), 1);
    assert_eq!(second.vault().credentials("Work")[0].password, "p");
}
