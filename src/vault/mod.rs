//! Encrypted secret storage.
//!
//! This module provides:
//! - `VaultEntry` / `VaultPayload` models (`entry`)
//! - `VaultHeader` and its canonical codec + AAD derivation (`header`)
//! - Length-prefixed binary framing with atomic writes (`store`)
//! - `VaultService` / `VaultHandle` orchestration (`service`)

pub mod entry;
pub mod header;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{VaultEntry, VaultPayload};
pub use header::VaultHeader;
pub use service::{VaultHandle, VaultService};
pub use store::{FileVaultStore, WriteDurability};
