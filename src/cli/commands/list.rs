//! `passvault list` — list credentials.

use crate::cli::{output, unlock_vault, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `list` command.
///
/// An empty `collection` lists the flat index (every credential); an
/// unknown collection name is simply empty, not an error.
pub fn execute(cli: &Cli, settings: &Settings, collection: &str) -> Result<()> {
    let service = unlock_vault(cli, settings)?;
    output::print_credentials_table(service.vault().credentials(collection));
    Ok(())
}
