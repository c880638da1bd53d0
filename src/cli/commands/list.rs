//! `secvault list`: show all entries without revealing passwords.

use std::path::Path;

use crate::cli::{output, prompt_password, service, Cli};
use crate::errors::Result;

pub fn execute(cli: &Cli) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let master = prompt_password("Master password")?;
    let handle = svc.open(path, &master)?;

    output::print_entries_table(handle.list());
    handle.close();
    Ok(())
}
