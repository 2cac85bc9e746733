//! Wire format for the persisted vault blob.
//!
//! The whole vault is stored in the secret store as a single JSON
//! value keyed by collection name:
//!
//! ```text
//! { "<collection>": { "name": "...", "passwords": [Credential, ...] } }
//! ```
//!
//! Each credential serializes as `{ displayname, username, email,
//! website, password, description, autofill, keychain }`.  Two fields
//! are intentionally excluded from the wire form:
//!
//! - `id` — process-local; a fresh id is generated for every
//!   credential on decode.
//! - `password_confirm` — a transient form field; on decode it is set
//!   equal to the stored password so a loaded record re-validates.
//!
//! Only the collection map is ever encoded.  The flat credential index
//! is a derived cache and is always rebuilt from the collections on
//! hydrate (`vault::store`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PassVaultError, Result};

use super::record::{AutofillKind, Collection, Credential};

/// Persisted form of a credential (see module docs for the field set).
#[derive(Debug, Serialize, Deserialize)]
struct WireCredential {
    displayname: String,
    username: String,
    email: String,
    website: String,
    password: String,
    description: String,
    autofill: AutofillKind,
    keychain: String,
}

/// Persisted form of a collection.
#[derive(Debug, Serialize, Deserialize)]
struct WireCollection {
    name: String,
    passwords: Vec<WireCredential>,
}

impl From<&Credential> for WireCredential {
    fn from(c: &Credential) -> Self {
        Self {
            displayname: c.display_name.clone(),
            username: c.username.clone(),
            email: c.email.clone(),
            website: c.website.clone(),
            password: c.password.clone(),
            description: c.description.clone(),
            autofill: c.autofill,
            keychain: c.collection.clone(),
        }
    }
}

impl From<WireCredential> for Credential {
    fn from(w: WireCredential) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: w.displayname,
            username: w.username,
            email: w.email,
            website: w.website,
            password_confirm: w.password.clone(),
            password: w.password,
            description: w.description,
            autofill: w.autofill,
            collection: w.keychain,
        }
    }
}

/// Encode the collection map to its persisted JSON form.
///
/// The map is a `BTreeMap`, so the output is canonical: encoding the
/// same logical vault twice yields byte-identical blobs.
pub fn encode(collections: &BTreeMap<String, Collection>) -> Result<String> {
    let wire: BTreeMap<&str, WireCollection> = collections
        .iter()
        .map(|(name, coll)| {
            let passwords = coll.credentials.iter().map(WireCredential::from).collect();
            (
                name.as_str(),
                WireCollection {
                    name: coll.name.clone(),
                    passwords,
                },
            )
        })
        .collect();

    serde_json::to_string(&wire).map_err(|e| PassVaultError::Serialization(e.to_string()))
}

/// Decode a persisted JSON blob back into a collection map.
///
/// Strict: malformed input is an error here.  The soft-fail policy
/// (fall back to an empty vault) lives in `Vault::hydrate`, which is
/// the only caller that wants it.
pub fn decode(blob: &str) -> Result<BTreeMap<String, Collection>> {
    let wire: BTreeMap<String, WireCollection> =
        serde_json::from_str(blob).map_err(|e| PassVaultError::Serialization(e.to_string()))?;

    Ok(wire
        .into_iter()
        .map(|(key, coll)| {
            let credentials = coll.passwords.into_iter().map(Credential::from).collect();
            (
                key,
                Collection {
                    name: coll.name,
                    credentials,
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vault_encodes_to_empty_object() {
        let blob = encode(&BTreeMap::new()).unwrap();
        assert_eq!(blob, "{}");
    }

    #[test]
    fn wire_field_names_match_persisted_layout() {
        let mut collections = BTreeMap::new();
        let mut coll = Collection::new("Work");
        coll.credentials.push(Credential {
            display_name: "Gmail".into(),
            username: "bob".into(),
            email: "bob@x.com".into(),
            website: "gmail.com".into(),
            password: "p".into(),
            password_confirm: "p".into(),
            description: String::new(),
            autofill: AutofillKind::Email,
            collection: "Work".into(),
            ..Credential::new()
        });
        collections.insert("Work".to_string(), coll);

        let blob = encode(&collections).unwrap();
        assert!(blob.contains("\"displayname\":\"Gmail\""));
        assert!(blob.contains("\"autofill\":\"email\""));
        assert!(blob.contains("\"keychain\":\"Work\""));
        // Transient fields never hit the wire.
        assert!(!blob.contains("id"));
        assert!(!blob.contains("confirm"));
    }

    #[test]
    fn decode_regenerates_ids() {
        let blob = r#"{"Work":{"name":"Work","passwords":[
            {"displayname":"A","username":"u","email":"","website":"",
             "password":"p","description":"","autofill":"username","keychain":"Work"}]}}"#;

        let first = decode(blob).unwrap();
        let second = decode(blob).unwrap();
        let a = &first["Work"].credentials[0];
        let b = &second["Work"].credentials[0];
        assert_ne!(a.id, b.id);
        assert_eq!(a.display_name, b.display_name);
        // Confirmation mirrors the stored password after decode.
        assert_eq!(a.password_confirm, "p");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not json at all").is_err());
    }
}
