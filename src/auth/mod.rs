//! Authentication gate in front of the vault.
//!
//! The vault core only consumes a boolean "proceed" signal; where that
//! signal comes from is this module's business.  Two implementations:
//!
//! - [`BypassGate`] — always unlocked.  The debug/bypass mode, enabled
//!   with `--bypass-auth` or the `bypass_auth` setting.
//! - [`MasterPasswordGate`] — a master password kept in the secret
//!   store under its own key, prompted for interactively and compared
//!   in constant time.  First run enrolls the password.
//!
//! A platform biometric gate would be a third implementation of the
//! same trait; nothing in the core cares which one it gets.

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};
use crate::secret_store::{SecretStore, AUTH_KEY};

/// Minimum master password length, enforced at enrollment.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting (CI/scripting).
const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// A single-shot unlock capability plus a freshness check on the
/// backing credential store.
pub trait AuthGate {
    /// Try to unlock once.  `Ok(false)` is a denied attempt, not an
    /// error; `Err` means the gate itself failed.
    fn attempt(&mut self) -> Result<bool>;

    /// Whether the backing credential store's key set has changed
    /// since the last check.
    fn has_credential_store_changed(&mut self) -> bool;
}

// ---------------------------------------------------------------------------
// Bypass gate
// ---------------------------------------------------------------------------

/// Gate that always unlocks.  Debug/bypass mode only.
#[derive(Default)]
pub struct BypassGate;

impl AuthGate for BypassGate {
    fn attempt(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn has_credential_store_changed(&mut self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Master-password gate
// ---------------------------------------------------------------------------

/// Gate backed by a master password in the secret store.
pub struct MasterPasswordGate {
    backend: Box<dyn SecretStore>,
    key_snapshot: Vec<String>,
}

impl MasterPasswordGate {
    /// Create a gate over the given backend, snapshotting the store's
    /// current key set for the freshness check.
    pub fn new(backend: Box<dyn SecretStore>) -> Self {
        let key_snapshot = backend.keys().unwrap_or_default();
        Self {
            backend,
            key_snapshot,
        }
    }

    /// Read the candidate password: environment variable first
    /// (scripting), interactive prompt otherwise.
    fn read_password(prompt: &str) -> Result<Zeroizing<String>> {
        if let Ok(pw) = std::env::var(PASSWORD_ENV) {
            if !pw.is_empty() {
                return Ok(Zeroizing::new(pw));
            }
        }
        let pw = dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
        Ok(Zeroizing::new(pw))
    }

    /// Enroll a master password on first run (with confirmation and a
    /// minimum length) and store it under the auth key.
    fn enroll(&mut self) -> Result<()> {
        let pw = if let Ok(pw) = std::env::var(PASSWORD_ENV) {
            Zeroizing::new(pw)
        } else {
            let pw = dialoguer::Password::new()
                .with_prompt("Choose a master password")
                .with_confirmation("Confirm master password", "Passwords do not match")
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
            Zeroizing::new(pw)
        };

        if pw.len() < MIN_PASSWORD_LEN {
            return Err(PassVaultError::CommandFailed(format!(
                "master password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        self.backend.set(AUTH_KEY, &pw)
    }
}

impl AuthGate for MasterPasswordGate {
    fn attempt(&mut self) -> Result<bool> {
        let stored = match self.backend.get(AUTH_KEY)? {
            Some(stored) => Zeroizing::new(stored),
            None => {
                // First run: enrolling counts as an unlocked session.
                self.enroll()?;
                return Ok(true);
            }
        };

        let candidate = Self::read_password("Master password")?;
        Ok(candidate.as_bytes().ct_eq(stored.as_bytes()).into())
    }

    fn has_credential_store_changed(&mut self) -> bool {
        match self.backend.keys() {
            Ok(now) => {
                let changed = now != self.key_snapshot;
                self.key_snapshot = now;
                changed
            }
            // If the store cannot be inspected, report a change so the
            // caller re-authenticates rather than trusting stale state.
            Err(_) => true,
        }
    }
}
