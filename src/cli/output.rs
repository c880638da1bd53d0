//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get consistent
//! styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{VaultEntry, WriteDurability};

/// Print a green success message.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Warn when a save had to fall back to a non-atomic overwrite.
pub fn report_durability(durability: WriteDurability) {
    if durability == WriteDurability::NonAtomicFallback {
        warning("vault was written without an atomic rename; a crash during the write could have corrupted it");
    }
}

/// Print a table of entries (Id, Title, Username); passwords stay hidden.
pub fn print_entries_table(entries: &[VaultEntry]) {
    if entries.is_empty() {
        info("The vault is empty.");
        tip("Run `secvault add` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Username"]);

    for e in entries {
        table.add_row(vec![
            e.id.clone(),
            e.title.clone(),
            e.username.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!("{table}");
}
