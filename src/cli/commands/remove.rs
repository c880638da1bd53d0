//! `secvault remove <id>`: remove an entry and save.

use std::path::Path;

use crate::cli::{output, prompt_password, service, Cli};
use crate::errors::Result;

pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let master = prompt_password("Master password")?;
    let mut handle = svc.open(path, &master)?;

    handle.remove(id)?;
    let durability = handle.save()?;
    output::report_durability(durability);
    output::success(&format!("Entry {id} removed"));
    handle.close();
    Ok(())
}
