//! Clap argument parser, output helpers, and command implementations.
//!
//! This layer owns prompting, masking, and exit codes.  All cryptography and
//! persistence happens in the core (`crypto` + `vault` modules); commands
//! only wire a `VaultService` and call its operations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::crypto::{AesGcmCipher, Pbkdf2Sha256};
use crate::errors::{Result, SecVaultError};
use crate::vault::VaultService;

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// SecVault CLI: single-file encrypted secret vault.
#[derive(Parser)]
#[command(name = "secvault", about = "Encrypted secret vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file (default: vault.svlt)
    #[arg(long, default_value = "vault.svlt", global = true)]
    pub vault: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init,

    /// Add an entry (prompts for title, username, password, notes)
    Add,

    /// List all entries
    List,

    /// Show one entry, including its password
    Get {
        /// Entry id (see `list`)
        id: String,
    },

    /// Remove an entry
    Remove {
        /// Entry id (see `list`)
        id: String,
    },

    /// Change the vault's master password
    ChangePassword,

    /// Delete the vault file itself
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Build the service with the standard crypto stack.
pub fn service() -> VaultService<Pbkdf2Sha256, AesGcmCipher> {
    VaultService::new(Pbkdf2Sha256::default(), AesGcmCipher)
}

/// Prompt for the master password of an existing vault (masked input).
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    let password = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|_| SecVaultError::UserCancelled)?;
    Ok(Zeroizing::new(password))
}

/// Prompt for a new master password with confirmation and a length floor.
pub fn prompt_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    let password = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|_| SecVaultError::PasswordMismatch)?;

    if password.len() < MIN_PASSWORD_LEN {
        return Err(SecVaultError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(Zeroizing::new(password))
}
