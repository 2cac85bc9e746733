//! Credential and Collection record types stored inside a vault.
//!
//! A `Credential` is one stored secret record with metadata; a
//! `Collection` is a named, user-defined group of credentials.  The
//! `id` and `password_confirm` fields are transient: `id` is generated
//! fresh per process and `password_confirm` only exists so the service
//! layer can check that a form was filled in consistently.  Neither is
//! ever persisted (see `vault::format`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which field a consuming UI should surface for autofill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutofillKind {
    /// Not chosen yet — a credential with this kind is not valid.
    #[default]
    None,
    Username,
    Email,
}

/// One stored secret record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Opaque unique identifier, generated at creation, immutable.
    /// Primary key for upsert/delete/lookup.
    pub id: Uuid,

    /// Human-readable label. Must be non-empty (after trimming) for
    /// the record to be valid.
    pub display_name: String,

    pub username: String,
    pub email: String,
    pub website: String,
    pub password: String,

    /// Transient form field, never persisted. Must match `password`
    /// for the record to be valid.
    pub password_confirm: String,

    pub description: String,

    /// Which field is surfaced for autofill.
    pub autofill: AutofillKind,

    /// Name of the collection this credential belongs to.  The empty
    /// string means "ungrouped".
    pub collection: String,
}

impl Credential {
    /// Create an empty credential with a fresh id, for form editing.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: String::new(),
            username: String::new(),
            email: String::new(),
            website: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            description: String::new(),
            autofill: AutofillKind::None,
            collection: String::new(),
        }
    }

    /// Whether this credential satisfies the validity invariant:
    /// display name non-empty after trimming, password non-empty and
    /// equal to its confirmation, an autofill kind chosen, and the
    /// field selected by that kind filled in.
    ///
    /// The vault store accepts any well-formed value; this check is
    /// the service layer's gate before persistence.
    pub fn is_valid(&self) -> bool {
        if self.display_name.trim().is_empty() {
            return false;
        }
        if self.password.is_empty() || self.password != self.password_confirm {
            return false;
        }
        match self.autofill {
            AutofillKind::None => false,
            AutofillKind::Username => !self.username.is_empty(),
            AutofillKind::Email => !self.email.is_empty(),
        }
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, user-defined group of credentials.
///
/// The `credentials` sequence is a secondary index maintained by the
/// vault store, not a separate source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Unique key within the vault, also the display name.
    pub name: String,

    /// Ordered credentials belonging to this collection.
    pub credentials: Vec<Credential>,
}

impl Collection {
    /// Create an empty collection with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credentials: Vec::new(),
        }
    }
}
