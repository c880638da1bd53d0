//! `secvault delete`: remove the vault file itself.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::{output, service, Cli};
use crate::errors::{Result, SecVaultError};

pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    if !svc.exists(path) {
        return Err(SecVaultError::VaultNotFound(path.to_path_buf()));
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete vault {}? This cannot be undone", path.display()))
            .default(false)
            .interact()
            .map_err(|_| SecVaultError::UserCancelled)?;
        if !confirmed {
            return Err(SecVaultError::UserCancelled);
        }
    }

    svc.delete(path)?;
    output::success(&format!("Vault deleted: {}", path.display()));
    Ok(())
}
