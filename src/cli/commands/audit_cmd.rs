//! `passvault audit` — view the operation history.

use comfy_table::{ContentArrangement, Table};

use crate::audit::AuditLog;
use crate::cli::output;
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `audit` command.
pub fn execute(settings: &Settings, last: usize) -> Result<()> {
    let Some(log) = AuditLog::open(&settings.audit_dir()) else {
        output::warning("Audit log unavailable.");
        return Ok(());
    };

    let entries = log.recent(last)?;
    if entries.is_empty() {
        output::info("No audit entries yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Item", "Details"]);

    for e in &entries {
        table.add_row(vec![
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.operation.clone(),
            e.item.clone().unwrap_or_default(),
            e.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
    Ok(())
}
