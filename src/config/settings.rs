use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// User-level configuration, loaded from
/// `<config_dir>/passvault/config.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Skip the authentication gate entirely (debug/bypass mode).
    #[serde(default)]
    pub bypass_auth: bool,

    /// Service name under which all secret-store entries live.
    /// Pointing this at another name gives an independent vault.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory for the audit database.  Defaults to the platform
    /// data dir (`<data_dir>/passvault`) when unset.
    #[serde(default)]
    pub audit_dir: Option<PathBuf>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_keyring_service() -> String {
    "passvault".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            bypass_auth: false,
            keyring_service: default_keyring_service(),
            audit_dir: None,
        }
    }
}

impl Settings {
    /// Name of the config file inside the passvault config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from the platform config directory.
    ///
    /// If the file does not exist, defaults are returned.  If the file
    /// exists but cannot be parsed, an error is returned.
    pub fn load() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => Self::load_from(&dir.join("passvault").join(Self::FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit path (also used by tests).
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Directory where the audit database lives.
    pub fn audit_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.audit_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("passvault")
    }
}

// ── Tests ────────────────────────────────────────────────────────────
