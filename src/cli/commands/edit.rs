//! `passvault edit` — update an existing credential.
//!
//! Fields not named on the command line keep their stored values; the
//! credential keeps its id, so a same-collection edit replaces the
//! record in place and `--collection` moves it between collections.

use crate::cli::{find_by_name, output, parse_autofill, unlock_vault, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// Execute the `edit` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    name: &str,
    collection: Option<&str>,
    username: Option<&str>,
    email: Option<&str>,
    website: Option<&str>,
    description: Option<&str>,
    autofill: Option<&str>,
    prompt_password: bool,
) -> Result<()> {
    let mut service = unlock_vault(cli, settings)?;
    let mut credential = find_by_name(&service, name)?;

    if let Some(collection) = collection {
        credential.collection = collection.to_string();
    }
    if let Some(username) = username {
        credential.username = username.to_string();
    }
    if let Some(email) = email {
        credential.email = email.to_string();
    }
    if let Some(website) = website {
        credential.website = website.to_string();
    }
    if let Some(description) = description {
        credential.description = description.to_string();
    }
    if let Some(autofill) = autofill {
        credential.autofill = parse_autofill(autofill)?;
    }
    if prompt_password {
        let prompt = |label: &str| -> Result<String> {
            dialoguer::Password::new()
                .with_prompt(label)
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))
        };
        credential.password = prompt("New password")?;
        credential.password_confirm = prompt("Confirm new password")?;
    }

    let moved_to = collection.map(str::to_string);

    if !service.set_credential(credential)? {
        output::error("Credential rejected: check that the password and its confirmation match and that the autofill field is filled in.");
        return Err(PassVaultError::CommandFailed("invalid credential".into()));
    }

    #[cfg(feature = "audit-log")]
    crate::audit::record(settings, "update", Some(name), moved_to.as_deref());

    match moved_to {
        Some(target) if !target.is_empty() => {
            output::success(&format!("Credential '{name}' updated and moved to '{target}'"));
        }
        _ => output::success(&format!("Credential '{name}' updated")),
    }

    Ok(())
}
