//! `secvault get <id>`: print one entry, including its password.

use std::path::Path;

use console::style;

use crate::cli::{prompt_password, service, Cli};
use crate::errors::Result;

pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let master = prompt_password("Master password")?;
    let handle = svc.open(path, &master)?;

    let entry = handle.get(id)?;
    println!("{}: {}", style("Title").bold(), entry.title);
    println!(
        "{}: {}",
        style("Username").bold(),
        entry.username.as_deref().unwrap_or("-")
    );
    println!(
        "{}: {}",
        style("Password").bold(),
        entry.password.as_deref().unwrap_or("-")
    );
    println!(
        "{}: {}",
        style("Notes").bold(),
        entry.notes.as_deref().unwrap_or("-")
    );

    handle.close();
    Ok(())
}
