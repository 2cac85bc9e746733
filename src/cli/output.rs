//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Passwords never appear in
//! any table; `get --show` is the only place a password is printed.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::record::{AutofillKind, Collection, Credential};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

fn autofill_label(kind: AutofillKind) -> &'static str {
    match kind {
        AutofillKind::None => "-",
        AutofillKind::Username => "username",
        AutofillKind::Email => "email",
    }
}

/// Print a table of credentials (no passwords).
pub fn print_credentials_table(credentials: &[Credential]) {
    if credentials.is_empty() {
        info("No credentials here yet.");
        tip("Run `passvault add <NAME>` to store your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Username", "Email", "Website", "Collection", "Autofill"]);

    for c in credentials {
        table.add_row(vec![
            c.display_name.clone(),
            c.username.clone(),
            c.email.clone(),
            c.website.clone(),
            c.collection.clone(),
            autofill_label(c.autofill).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of collections with their credential counts.
pub fn print_collections_table(collections: &[&Collection]) {
    if collections.is_empty() {
        info("No collections yet.");
        tip("Run `passvault collection add <NAME>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Collection", "Credentials"]);

    for coll in collections {
        table.add_row(vec![coll.name.clone(), coll.credentials.len().to_string()]);
    }

    println!("{table}");
}
