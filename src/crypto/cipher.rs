//! AES-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting and verifies the 16-byte tag before returning a single
//! byte of plaintext.
//!
//! Layout of the produced blob:
//!   [ 12-byte nonce | ciphertext | 16-byte auth tag ]
//!
//! Nonce reuse under one key breaks GCM completely, which is why the nonce
//! is drawn from the OS CSPRNG on every call and never supplied by callers.

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::aes::Aes192;
use aes_gcm::{AeadCore, Aes128Gcm, Aes256Gcm, AesGcm, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::errors::{Result, SecVaultError};

/// Size of the GCM nonce in bytes (96 bits, the recommended size).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// The 96-bit nonce size shared by all three GCM variants, as a type.
type GcmNonceSize = <Aes256Gcm as AeadCore>::NonceSize;

/// AES-192-GCM is not aliased by the `aes-gcm` crate; build it here.
type Aes192Gcm = AesGcm<Aes192, GcmNonceSize>;

/// Capability interface over authenticated encryption of opaque blobs.
///
/// `aad` is authenticated but not encrypted; an empty slice means no
/// associated data.  Encryption and decryption must agree on it byte for
/// byte or the tag check fails.
pub trait AeadCipher {
    /// Encrypt `plaintext`, returning `nonce ‖ ciphertext ‖ tag`.
    fn encrypt(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a blob produced by `encrypt`, verifying the tag first.
    fn decrypt(&self, key: &[u8], blob: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}

/// AES-GCM with the key size selected by the key slice length:
/// 16, 24, or 32 bytes for AES-128/192/256.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmCipher;

impl AeadCipher for AesGcmCipher {
    fn encrypt(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        match key.len() {
            16 => seal::<Aes128Gcm>(key, plaintext, aad),
            24 => seal::<Aes192Gcm>(key, plaintext, aad),
            32 => seal::<Aes256Gcm>(key, plaintext, aad),
            n => Err(SecVaultError::Validation(format!(
                "AES key must be 16, 24, or 32 bytes (got {n})"
            ))),
        }
    }

    fn decrypt(&self, key: &[u8], blob: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(SecVaultError::Format(format!(
                "cipher blob too short: {} bytes, need at least {}",
                blob.len(),
                NONCE_LEN + TAG_LEN
            )));
        }

        match key.len() {
            16 => open::<Aes128Gcm>(key, blob, aad),
            24 => open::<Aes192Gcm>(key, blob, aad),
            32 => open::<Aes256Gcm>(key, blob, aad),
            n => Err(SecVaultError::Validation(format!(
                "AES key must be 16, 24, or 32 bytes (got {n})"
            ))),
        }
    }
}

fn seal<C>(key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>>
where
    C: Aead + KeyInit + AeadCore<NonceSize = GcmNonceSize>,
{
    let cipher = C::new_from_slice(key)
        .map_err(|e| SecVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce on every call: never reused, never caller-chosen.
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| SecVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

fn open<C>(key: &[u8], blob: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>>
where
    C: Aead + KeyInit + AeadCore<NonceSize = GcmNonceSize>,
{
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = C::new_from_slice(key)
        .map_err(|e| SecVaultError::Validation(format!("invalid key length: {e}")))?;

    // A failed tag check cannot distinguish tampered data from a wrong key
    // or wrong AAD; all three surface as IntegrityFailure.
    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| SecVaultError::IntegrityFailure)?;

    Ok(Zeroizing::new(plaintext))
}
