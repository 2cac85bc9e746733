//! `passvault remove` — delete a credential.

use crate::cli::{find_by_name, output, unlock_vault, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, settings: &Settings, name: &str, force: bool) -> Result<()> {
    let mut service = unlock_vault(cli, settings)?;
    let credential = find_by_name(&service, name)?;

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove credential '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;
        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    service.remove_credential(&credential)?;

    #[cfg(feature = "audit-log")]
    crate::audit::record(settings, "remove", Some(name), None);

    output::success(&format!(
        "Credential '{name}' removed ({} remaining)",
        service.vault().credential_count()
    ));

    Ok(())
}
