//! `secvault add`: prompt for a new entry and save it.

use std::path::Path;

use dialoguer::Input;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::cli::{output, prompt_password, service, Cli};
use crate::errors::{Result, SecVaultError};
use crate::vault::VaultEntry;

pub fn execute(cli: &Cli) -> Result<()> {
    let path = Path::new(&cli.vault);
    let svc = service();

    let master = prompt_password("Master password")?;
    let mut handle = svc.open(path, &master)?;

    let title: String = Input::new()
        .with_prompt("Title")
        .interact_text()
        .map_err(|_| SecVaultError::UserCancelled)?;
    let username: String = Input::new()
        .with_prompt("Username (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|_| SecVaultError::UserCancelled)?;
    let entry_password = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Entry password (optional)")
            .allow_empty_password(true)
            .interact()
            .map_err(|_| SecVaultError::UserCancelled)?,
    );
    let notes: String = Input::new()
        .with_prompt("Notes (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|_| SecVaultError::UserCancelled)?;

    let id = new_entry_id();
    let entry = VaultEntry {
        id: id.clone(),
        title,
        username: non_empty(username),
        password: non_empty(entry_password.to_string()),
        notes: non_empty(notes),
    };

    handle.add(entry)?;
    let durability = handle.save()?;
    output::report_durability(durability);
    output::success(&format!("Entry added (id={id})"));
    handle.close();
    Ok(())
}

/// Random 128-bit hex id, unique for all practical purposes.
fn new_entry_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
