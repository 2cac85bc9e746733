//! `passvault collection` — manage collections.

use crate::cli::{output, unlock_vault, Cli, CollectionAction};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::record::Collection;

/// Execute a `collection` subcommand.
pub fn execute(cli: &Cli, settings: &Settings, action: &CollectionAction) -> Result<()> {
    match action {
        CollectionAction::Add { name } => add(cli, settings, name),
        CollectionAction::Remove { name, force } => remove(cli, settings, name, *force),
        CollectionAction::List => list(cli, settings),
    }
}

fn add(cli: &Cli, settings: &Settings, name: &str) -> Result<()> {
    let mut service = unlock_vault(cli, settings)?;

    // Creating an existing collection is a no-op in the store, not an
    // overwrite; tell the user which of the two happened.
    let existed = service.vault().collections().contains_key(name);

    if !service.set_collection(Collection::new(name))? {
        output::error("Collection name cannot be empty.");
        return Err(PassVaultError::CommandFailed("invalid collection name".into()));
    }

    if existed {
        output::info(&format!("Collection '{name}' already exists — left unchanged."));
        return Ok(());
    }

    #[cfg(feature = "audit-log")]
    crate::audit::record(settings, "collection-add", Some(name), None);

    output::success(&format!("Collection '{name}' created"));
    Ok(())
}

fn remove(cli: &Cli, settings: &Settings, name: &str, force: bool) -> Result<()> {
    let mut service = unlock_vault(cli, settings)?;

    let Some(collection) = service.vault().collections().get(name).cloned() else {
        output::info(&format!("No collection named '{name}'."));
        return Ok(());
    };

    if !force {
        let count = collection.credentials.len();
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Remove collection '{name}' and its {count} credential(s)?"
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;
        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    service.remove_collection(&collection)?;

    #[cfg(feature = "audit-log")]
    crate::audit::record(
        settings,
        "collection-remove",
        Some(name),
        Some(&format!("{} credential(s)", collection.credentials.len())),
    );

    output::success(&format!("Collection '{name}' removed"));
    Ok(())
}

fn list(cli: &Cli, settings: &Settings) -> Result<()> {
    let service = unlock_vault(cli, settings)?;
    let collections: Vec<_> = service.vault().collections().values().collect();
    output::print_collections_table(&collections);
    Ok(())
}
