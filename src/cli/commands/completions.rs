//! `passvault completions` — generate shell completion scripts.

use std::io;
use std::str::FromStr;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::{PassVaultError, Result};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = Shell::from_str(shell).map_err(|_| {
        PassVaultError::CommandFailed(format!(
            "unknown shell '{shell}' — expected bash, zsh, fish, or powershell"
        ))
    })?;

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "passvault", &mut io::stdout());
    Ok(())
}
