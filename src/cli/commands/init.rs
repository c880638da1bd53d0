//! `secvault init`: create a new vault file.

use std::path::Path;

use crate::cli::{output, prompt_new_password, service, Cli};
use crate::errors::Result;

pub fn execute(cli: &Cli) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let password = prompt_new_password("New master password")?;

    let (handle, durability) = svc.create(path, &password)?;
    output::report_durability(durability);
    output::success(&format!("Vault created at {}", handle.path().display()));
    output::tip("Run `secvault add` to add your first entry.");
    handle.close();
    Ok(())
}
