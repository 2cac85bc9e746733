//! Vault module — the credential data model and its consistency rules.
//!
//! This module provides:
//! - `Credential`, `Collection`, and `AutofillKind` types (`record`)
//! - The persisted JSON wire format (`format`)
//! - The dual-index `Vault` and write-through `VaultStore` (`store`)
//! - The validating `VaultService` façade consumed by the UI (`service`)

pub mod format;
pub mod record;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use record::{AutofillKind, Collection, Credential};
pub use service::VaultService;
pub use store::{Vault, VaultStore};
