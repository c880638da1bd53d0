//! High-level vault operations: create, open, mutate, save, rotate.
//!
//! `VaultService` wires the KDF, the AEAD cipher, and the file store
//! together.  Opening a vault yields a `VaultHandle` that owns the decrypted
//! entries and the derived encryption key for as long as it lives; dropping
//! or closing the handle wipes both.
//!
//! A handle moves through a simple lifecycle: opened (clean) → dirty after
//! any mutation → clean again after `save` → closed.  Saves always rewrite
//! the whole file: the payload is re-serialized, re-encrypted under a fresh
//! nonce, and persisted via the store's atomic rename.

use std::path::{Path, PathBuf};

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{
    generate_salt, AeadCipher, PasswordKdf, DEFAULT_ITERATIONS, DEFAULT_KEY_LEN,
};
use crate::errors::{Result, SecVaultError};

use super::entry::{VaultEntry, VaultPayload};
use super::header::VaultHeader;
use super::store::{FileVaultStore, WriteDurability};

/// Orchestrates KDF, cipher, and store.  The crypto implementations are
/// injected at construction; there are no globals.
pub struct VaultService<K, C> {
    kdf: K,
    cipher: C,
    store: FileVaultStore,
}

impl<K: PasswordKdf, C: AeadCipher> VaultService<K, C> {
    pub fn new(kdf: K, cipher: C) -> Self {
        Self {
            kdf,
            cipher,
            store: FileVaultStore,
        }
    }

    /// Create a brand-new vault at `path` and return it opened, along with
    /// the durability of the initial write.
    ///
    /// Fails with `VaultAlreadyExists` if the path is taken; creation never
    /// silently overwrites another vault.
    pub fn create(
        &self,
        path: &Path,
        password: &str,
    ) -> Result<(VaultHandle<'_, K, C>, WriteDurability)> {
        if self.store.exists(path) {
            return Err(SecVaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        // Authentication hash and encryption key use independent salts; the
        // auth hash carries its own salt inside the encoded string.
        let stored_auth_hash = self.kdf.hash_password(password)?;
        let enc_salt = generate_salt();
        let key =
            self.kdf
                .derive_key(password, &enc_salt, DEFAULT_ITERATIONS, DEFAULT_KEY_LEN)?;

        let header = VaultHeader::new(
            enc_salt.to_vec(),
            DEFAULT_ITERATIONS,
            DEFAULT_KEY_LEN,
            stored_auth_hash,
        );

        let mut handle = VaultHandle {
            service: self,
            path: path.to_path_buf(),
            header,
            key,
            payload: VaultPayload::default(),
            dirty: false,
        };

        // Persist the empty payload so the file exists before first use.
        let durability = handle.save()?;
        Ok((handle, durability))
    }

    /// Open an existing vault: authenticate, derive the key, decrypt.
    ///
    /// A wrong password is reported as `AuthenticationFailed` by the explicit
    /// stored-hash check, *before* any decryption runs.  A failure after that
    /// point is an `IntegrityFailure`: the file (or its header) was modified.
    pub fn open(&self, path: &Path, password: &str) -> Result<VaultHandle<'_, K, C>> {
        let (header, cipher_blob) = self.store.read(path)?;

        if !self.kdf.validate_password(&header.stored_auth_hash, password)? {
            return Err(SecVaultError::AuthenticationFailed);
        }

        let key = self.kdf.derive_key(
            password,
            &header.enc_salt,
            header.enc_iterations,
            header.key_len_bytes,
        )?;

        let aad = header.aad()?;
        let plaintext = self.cipher.decrypt(&key, &cipher_blob, &aad)?;

        let payload: VaultPayload = serde_json::from_slice(&plaintext)
            .map_err(|e| SecVaultError::Format(format!("payload JSON: {e}")))?;

        // Duplicate ids mean the payload violates its own invariant; treat
        // the vault as malformed rather than picking a winner.
        for (i, entry) in payload.entries.iter().enumerate() {
            if payload.entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(SecVaultError::Format(format!(
                    "duplicate entry id '{}'",
                    entry.id
                )));
            }
        }

        Ok(VaultHandle {
            service: self,
            path: path.to_path_buf(),
            header,
            key,
            payload,
            dirty: false,
        })
    }

    /// Rotate the master password.
    ///
    /// The complete new file image (new salt, new auth hash, new header,
    /// payload re-encrypted under the new key and AAD) is computed before
    /// anything touches the target path, so a crash mid-rotation leaves
    /// either the old vault or the new one, never a hybrid.
    pub fn change_password(
        &self,
        path: &Path,
        old_password: &str,
        new_password: &str,
    ) -> Result<WriteDurability> {
        let (header, cipher_blob) = self.store.read(path)?;

        if !self
            .kdf
            .validate_password(&header.stored_auth_hash, old_password)?
        {
            return Err(SecVaultError::AuthenticationFailed);
        }

        let old_key = self.kdf.derive_key(
            old_password,
            &header.enc_salt,
            header.enc_iterations,
            header.key_len_bytes,
        )?;
        let old_aad = header.aad()?;
        let plaintext = self.cipher.decrypt(&old_key, &cipher_blob, &old_aad)?;

        // New salt and auth hash; algorithm ids and KDF cost carry over.
        let new_salt = generate_salt();
        let new_key = self.kdf.derive_key(
            new_password,
            &new_salt,
            header.enc_iterations,
            header.key_len_bytes,
        )?;
        let new_auth_hash = self.kdf.hash_password(new_password)?;

        let new_header = VaultHeader {
            enc_salt: new_salt.to_vec(),
            stored_auth_hash: new_auth_hash,
            ..header
        };

        let new_aad = new_header.aad()?;
        let new_blob = self.cipher.encrypt(&new_key, &plaintext, &new_aad)?;

        self.store.write(path, &new_header, &new_blob)
    }

    /// Whether a vault file exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        self.store.exists(path)
    }

    /// Remove the vault file.  Returns `false` if it did not exist.
    pub fn delete(&self, path: &Path) -> Result<bool> {
        self.store.delete(path)
    }
}

/// An open, decrypted vault.
///
/// Owns the derived encryption key and the plaintext entries.  Both are
/// zeroed when the handle is closed or dropped, on every exit path.
pub struct VaultHandle<'a, K, C> {
    service: &'a VaultService<K, C>,
    path: PathBuf,
    header: VaultHeader,
    key: Zeroizing<Vec<u8>>,
    payload: VaultPayload,
    dirty: bool,
}

impl<K, C> std::fmt::Debug for VaultHandle<'_, K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultHandle")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl<K: PasswordKdf, C: AeadCipher> VaultHandle<'_, K, C> {
    /// All entries, in insertion order.
    pub fn list(&self) -> &[VaultEntry] {
        &self.payload.entries
    }

    /// Look up one entry by id.
    pub fn get(&self, id: &str) -> Result<&VaultEntry> {
        self.payload
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| SecVaultError::EntryNotFound(id.to_string()))
    }

    /// Append an entry.  Ids are caller-supplied and must be unique within
    /// the vault; the title is required.
    pub fn add(&mut self, entry: VaultEntry) -> Result<()> {
        if entry.id.is_empty() {
            return Err(SecVaultError::Validation("entry id cannot be empty".into()));
        }
        if entry.title.is_empty() {
            return Err(SecVaultError::Validation(
                "entry title cannot be empty".into(),
            ));
        }
        if self.payload.entries.iter().any(|e| e.id == entry.id) {
            return Err(SecVaultError::Validation(format!(
                "entry id '{}' already exists",
                entry.id
            )));
        }

        self.payload.entries.push(entry);
        self.dirty = true;
        Ok(())
    }

    /// Remove the entry with the given id, keeping the relative order of the
    /// remaining entries.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let index = self
            .payload
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SecVaultError::EntryNotFound(id.to_string()))?;

        let mut removed = self.payload.entries.remove(index);
        removed.zeroize();
        self.dirty = true;
        Ok(())
    }

    /// Re-encrypt the full payload and persist it atomically.
    ///
    /// The AAD is recomputed from the current header and the blob gets a
    /// fresh nonce; the entire file is rewritten every time.
    pub fn save(&mut self) -> Result<WriteDurability> {
        let mut plaintext = serde_json::to_vec(&self.payload)
            .map_err(|e| SecVaultError::Serialization(format!("payload: {e}")))?;

        let aad = self.header.aad()?;
        let blob = self.service.cipher.encrypt(&self.key, &plaintext, &aad);
        plaintext.zeroize();
        let blob = blob?;

        let durability = self.service.store.write(&self.path, &self.header, &blob)?;
        self.dirty = false;
        Ok(durability)
    }

    /// Discard the handle, wiping key material and decrypted entries.
    ///
    /// Unsaved mutations are lost; check `is_dirty` first if that matters.
    pub fn close(self) {
        // Drop does the wiping; this method exists to make the discard
        // explicit at call sites.
    }

    /// Whether the handle has unsaved mutations.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entries currently in the vault.
    pub fn len(&self) -> usize {
        self.payload.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.entries.is_empty()
    }

    /// The on-disk path this handle reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The vault's plaintext metadata header.
    pub fn header(&self) -> &VaultHeader {
        &self.header
    }
}

impl<K, C> Drop for VaultHandle<'_, K, C> {
    fn drop(&mut self) {
        // The key is a Zeroizing buffer and wipes itself; the decrypted
        // entries need an explicit pass.
        self.payload.zeroize();
    }
}
