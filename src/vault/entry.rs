//! Entry and payload types stored inside a vault.
//!
//! The payload is what gets encrypted: a JSON document holding the ordered
//! list of entries.  Everything in here is secret once decrypted, so both
//! types derive `Zeroize` and the owning handle wipes them on close.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A single labeled secret in the vault.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize)]
pub struct VaultEntry {
    /// Unique id within one vault.
    pub id: String,

    /// Display title (required).
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The decrypted vault body: entries in insertion order.
///
/// Order is preserved across save/reload: every save re-serializes the
/// whole list as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Zeroize)]
pub struct VaultPayload {
    pub entries: Vec<VaultEntry>,
}
