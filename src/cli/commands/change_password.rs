//! `secvault change-password`: rotate the master password.

use std::path::Path;

use crate::cli::{output, prompt_new_password, prompt_password, service, Cli};
use crate::errors::Result;

pub fn execute(cli: &Cli) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let old_password = prompt_password("Current master password")?;
    let new_password = prompt_new_password("New master password")?;

    let durability = svc.change_password(path, &old_password, &new_password)?;
    output::report_durability(durability);
    output::success("Master password changed");
    Ok(())
}
