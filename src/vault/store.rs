//! Binary vault file framing and atomic persistence.
//!
//! A `.svlt` file has this layout:
//!
//! ```text
//! [header_len: 4 bytes BE][header JSON][nonce ‖ ciphertext ‖ tag]
//! ```
//!
//! The header length prefix is big-endian; everything after the header JSON
//! is the opaque cipher blob, handed to the AEAD layer untouched.
//!
//! Writes go to a dot-prefixed temp file in the target's directory and are
//! renamed over the target, so readers never see a half-written vault.  If
//! the rename fails the store falls back to a plain overwrite and reports
//! the reduced durability to the caller instead of hiding it.

use std::fs;
use std::path::Path;

use crate::errors::{Result, SecVaultError};

use super::header::VaultHeader;

/// Size of the big-endian header length prefix.
const PREFIX_LEN: usize = 4;

/// How a completed write reached the disk.
///
/// `NonAtomicFallback` means the temp-file rename failed and the vault was
/// overwritten in place; a crash during that window could have corrupted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a non-atomic fallback write must be surfaced to the user"]
pub enum WriteDurability {
    Atomic,
    NonAtomicFallback,
}

/// File-backed vault persistence: framing, atomic writes, existence checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileVaultStore;

impl FileVaultStore {
    /// Write a framed vault file: `[4B BE len][header JSON][cipher blob]`.
    ///
    /// The whole file image is assembled in memory first; the rename (or
    /// fallback overwrite) is the only mutation of the target path.
    pub fn write(
        &self,
        path: &Path,
        header: &VaultHeader,
        cipher_blob: &[u8],
    ) -> Result<WriteDurability> {
        let header_bytes = header.to_json_bytes()?;
        let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
            SecVaultError::Serialization(format!(
                "header length {} exceeds u32::MAX",
                header_bytes.len()
            ))
        })?;

        let mut buf = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + cipher_blob.len());
        buf.extend_from_slice(&header_len.to_be_bytes());
        buf.extend_from_slice(&header_bytes);
        buf.extend_from_slice(cipher_blob);

        // Temp file in the same directory so the rename stays on one
        // filesystem.
        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &buf)?;
        match fs::rename(&tmp_path, path) {
            Ok(()) => Ok(WriteDurability::Atomic),
            Err(_) => {
                // Rename unavailable (exotic filesystem): overwrite in place
                // and report the reduced durability.
                let result = fs::write(path, &buf);
                let _ = fs::remove_file(&tmp_path);
                result?;
                Ok(WriteDurability::NonAtomicFallback)
            }
        }
    }

    /// Read a framed vault file back into its header and cipher blob.
    pub fn read(&self, path: &Path) -> Result<(VaultHeader, Vec<u8>)> {
        if !path.exists() {
            return Err(SecVaultError::VaultNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        if data.len() < PREFIX_LEN {
            return Err(SecVaultError::Format(
                "file too short to contain a header length".into(),
            ));
        }

        let header_len_u32 = u32::from_be_bytes(
            data[..PREFIX_LEN]
                .try_into()
                .map_err(|_| SecVaultError::Format("bad header length prefix".into()))?,
        );
        let header_len = header_len_u32 as usize;
        if header_len == 0 || header_len > data.len() - PREFIX_LEN {
            return Err(SecVaultError::Format(format!(
                "invalid header length: {header_len_u32}"
            )));
        }

        let header_end = PREFIX_LEN + header_len;
        let header = VaultHeader::from_json_bytes(&data[PREFIX_LEN..header_end])?;
        let cipher_blob = data[header_end..].to_vec();

        Ok((header, cipher_blob))
    }

    /// Whether a vault file exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Remove the vault file.  Returns `false` if it did not exist.
    pub fn delete(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
