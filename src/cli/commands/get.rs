//! `passvault get` — show one credential.

use console::style;

use crate::cli::{find_by_name, output, unlock_vault, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::record::AutofillKind;

/// Execute the `get` command.
pub fn execute(cli: &Cli, settings: &Settings, name: &str, show: bool, copy: bool) -> Result<()> {
    let service = unlock_vault(cli, settings)?;
    let credential = find_by_name(&service, name)?;

    let field = |label: &str, value: &str| {
        if !value.is_empty() {
            println!("{:>12}  {}", style(label).dim(), value);
        }
    };

    println!("{}", style(&credential.display_name).bold());
    field("username", &credential.username);
    field("email", &credential.email);
    field("website", &credential.website);
    field("collection", &credential.collection);
    field("description", &credential.description);
    let autofill = match credential.autofill {
        AutofillKind::None => "-",
        AutofillKind::Username => "username",
        AutofillKind::Email => "email",
    };
    field("autofill", autofill);

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PassVaultError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(credential.password.clone())
            .map_err(|e| PassVaultError::Clipboard(e.to_string()))?;
        output::success("Password copied to clipboard.");
    } else if show {
        field("password", &credential.password);
    } else {
        field("password", "********");
        output::tip("Reveal it with --show, or copy it with --copy.");
    }

    Ok(())
}
