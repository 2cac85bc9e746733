//! `passvault add` — store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::{output, parse_autofill, unlock_vault, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::record::Credential;

/// Prompt for the password and its confirmation.
///
/// Piped input (stdin not a terminal) reads a single line and uses it
/// for both fields; interactively, password and confirmation are two
/// separate prompts and the service's validity gate decides whether
/// they match.
fn read_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let pw = Zeroizing::new(buf.trim_end().to_string());
        return Ok((pw.clone(), pw));
    }

    let prompt = |label: &str| -> Result<Zeroizing<String>> {
        dialoguer::Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))
    };
    Ok((prompt("Password")?, prompt("Confirm password")?))
}

/// Execute the `add` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    name: &str,
    username: &str,
    email: &str,
    website: &str,
    description: &str,
    collection: &str,
    autofill: &str,
) -> Result<()> {
    let autofill = parse_autofill(autofill)?;
    let (password, password_confirm) = read_password()?;

    let mut service = unlock_vault(cli, settings)?;

    let credential = Credential {
        display_name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        website: website.to_string(),
        password: password.to_string(),
        password_confirm: password_confirm.to_string(),
        description: description.to_string(),
        autofill,
        collection: collection.to_string(),
        ..Credential::new()
    };

    if !service.set_credential(credential)? {
        output::error("Credential rejected: check that the password and its confirmation match and that the autofill field is filled in.");
        return Err(PassVaultError::CommandFailed("invalid credential".into()));
    }

    #[cfg(feature = "audit-log")]
    crate::audit::record(settings, "add", Some(name), Some(collection));

    let total = service.vault().credential_count();
    if collection.is_empty() {
        output::success(&format!("Credential '{name}' added ({total} total)"));
    } else {
        output::success(&format!(
            "Credential '{name}' added to '{collection}' ({total} total)"
        ));
    }
    output::tip("Show it: passvault get <NAME>");

    Ok(())
}
