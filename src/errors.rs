use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecVault.
///
/// Decryption failures are split into two distinct variants on purpose:
/// `AuthenticationFailed` means the explicit password check against the
/// stored auth hash did not pass, while `IntegrityFailure` means the AEAD
/// tag check failed after a *successful* password check, meaning the file was
/// tampered with, or the header the AAD is bound to was swapped.
#[derive(Debug, Error)]
pub enum SecVaultError {
    // --- Authentication / integrity ---
    #[error("Authentication failed: wrong master password")]
    AuthenticationFailed,

    #[error("Integrity check failed: vault data is tampered or corrupted")]
    IntegrityFailure,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Format errors ---
    #[error("Invalid vault format: {0}")]
    Format(String),

    // --- Vault / entry lookup ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    // --- Input validation ---
    #[error("Validation error: {0}")]
    Validation(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Convenience type alias for SecVault results.
pub type Result<T> = std::result::Result<T, SecVaultError>;
