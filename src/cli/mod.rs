//! CLI module — Clap argument parser, output helpers, and command
//! implementations.
//!
//! The CLI is the consuming "UI layer": it holds no vault logic of its
//! own.  Every command authenticates through the [`AuthGate`], builds a
//! [`VaultService`] over the OS secret store, loads the vault, performs
//! its operation, and renders the result.

pub mod commands;
pub mod output;

use clap::Parser;

use crate::auth::{AuthGate, BypassGate, MasterPasswordGate};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::secret_store::KeyringStore;
use crate::vault::record::Credential;
use crate::vault::store::VaultStore;
use crate::vault::VaultService;

/// PassVault CLI: local password manager backed by the OS secret store.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local password manager backed by the OS secret store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip the authentication gate (debug mode)
    #[arg(long, global = true)]
    pub bypass_auth: bool,

    /// Secret-store service name (overrides config; isolates vaults)
    #[arg(long, global = true)]
    pub service: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new credential (prompts for the password)
    Add {
        /// Display name for the credential
        name: String,

        /// Account username
        #[arg(short, long, default_value = "")]
        username: String,

        /// Account email address
        #[arg(short, long, default_value = "")]
        email: String,

        /// Website the credential belongs to
        #[arg(short, long, default_value = "")]
        website: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Collection to file the credential under (created on demand)
        #[arg(short, long, default_value = "")]
        collection: String,

        /// Field surfaced for autofill: username or email
        #[arg(short, long, default_value = "username")]
        autofill: String,
    },

    /// Show a credential by display name
    Get {
        /// Display name of the credential
        name: String,

        /// Print the password to stdout
        #[arg(long)]
        show: bool,

        /// Copy the password to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// Update an existing credential
    Edit {
        /// Display name of the credential to edit
        name: String,

        /// Move the credential to this collection
        #[arg(short, long)]
        collection: Option<String>,

        /// New account username
        #[arg(short, long)]
        username: Option<String>,

        /// New account email address
        #[arg(short, long)]
        email: Option<String>,

        /// New website
        #[arg(short, long)]
        website: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New autofill field: username or email
        #[arg(short, long)]
        autofill: Option<String>,

        /// Prompt for a new password
        #[arg(short, long)]
        password: bool,
    },

    /// List credentials (all, or one collection's)
    List {
        /// Collection to list; omit for all credentials
        #[arg(short, long, default_value = "")]
        collection: String,
    },

    /// Remove a credential by display name
    Remove {
        /// Display name of the credential
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage collections
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Collection subcommands.
#[derive(clap::Subcommand)]
pub enum CollectionAction {
    /// Create an empty collection
    Add {
        /// Collection name
        name: String,
    },

    /// Remove a collection and its credentials
    Remove {
        /// Collection name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all collections
    List,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The secret-store service name to use: CLI flag, then config, then
/// the built-in default.
pub fn service_name(cli: &Cli, settings: &Settings) -> String {
    cli.service
        .clone()
        .unwrap_or_else(|| settings.keyring_service.clone())
}

/// Build the authentication gate: bypass when the flag or setting says
/// so, master-password gate otherwise.
pub fn build_gate(cli: &Cli, settings: &Settings) -> Box<dyn AuthGate> {
    if cli.bypass_auth || settings.bypass_auth {
        Box::new(BypassGate)
    } else {
        let backend = KeyringStore::new(service_name(cli, settings));
        Box::new(MasterPasswordGate::new(Box::new(backend)))
    }
}

/// Authenticate, then build and load a vault service over the OS
/// secret store.  Every command goes through here.
pub fn unlock_vault(cli: &Cli, settings: &Settings) -> Result<VaultService> {
    let mut gate = build_gate(cli, settings);
    if !gate.attempt()? {
        return Err(PassVaultError::AuthDenied);
    }

    let backend = KeyringStore::new(service_name(cli, settings));
    let mut service = VaultService::new(VaultStore::new(Box::new(backend)));
    service.load()?;
    Ok(service)
}

/// Find a credential by display name in the flat index (first match).
pub fn find_by_name(service: &VaultService, name: &str) -> Result<Credential> {
    service
        .vault()
        .credentials("")
        .iter()
        .find(|c| c.display_name == name)
        .cloned()
        .ok_or_else(|| PassVaultError::CredentialNotFound(name.to_string()))
}

/// Parse an autofill kind argument (`username` or `email`).
pub fn parse_autofill(value: &str) -> Result<crate::vault::record::AutofillKind> {
    use crate::vault::record::AutofillKind;
    match value.to_ascii_lowercase().as_str() {
        "username" => Ok(AutofillKind::Username),
        "email" => Ok(AutofillKind::Email),
        other => Err(PassVaultError::CommandFailed(format!(
            "unknown autofill kind '{other}' — expected 'username' or 'email'"
        ))),
    }
}
