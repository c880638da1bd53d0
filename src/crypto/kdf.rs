//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The same primitive serves two deliberately separate purposes:
//!
//! - **Authentication**: `hash_password` / `validate_password` work with a
//!   self-contained stored hash (`base64(salt ‖ hash)`) computed with fixed
//!   default parameters.  This lets a wrong password be rejected before any
//!   decryption is attempted.
//! - **Encryption**: `derive_key` produces the AEAD key from the password and
//!   the salt/iteration-count/key-length stored in the vault header.  The two
//!   derivations use independent salts, so the auth hash never leaks the
//!   encryption key.
//!
//! PBKDF2 is CPU-bound by construction: latency scales linearly with the
//! iteration count.  That cost is the brute-force resistance.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, SecVaultError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Length of the random salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived authentication hash in bytes (256 bits).
const AUTH_HASH_LEN: usize = 32;

/// Default PBKDF2 iteration count for password authentication.
pub const DEFAULT_ITERATIONS: u32 = 65_536;

/// Default encryption key length in bytes (256 bits, for AES-256-GCM).
pub const DEFAULT_KEY_LEN: usize = 32;

/// Capability interface over password-based key derivation.
///
/// `VaultService` is generic over this trait so tests (and any future KDF)
/// can swap the implementation in at construction time.
pub trait PasswordKdf {
    /// Hash a password for storage: `base64(salt16 ‖ derived32)`.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Check a password against a stored hash produced by `hash_password`.
    fn validate_password(&self, stored_hash: &str, password: &str) -> Result<bool>;

    /// Derive an encryption key of `key_len_bytes` bytes.
    ///
    /// Deterministic for identical inputs.  `iterations` and `key_len_bytes`
    /// come from the vault header, not from this KDF's defaults.
    fn derive_key(
        &self,
        password: &str,
        salt: &[u8],
        iterations: u32,
        key_len_bytes: usize,
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// PBKDF2-HMAC-SHA256 key derivation.
///
/// `iterations` only affects `hash_password` / `validate_password`; the two
/// sides of a validate must agree on it, which is why it is fixed at
/// construction rather than passed per call.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Sha256 {
    iterations: u32,
}

impl Default for Pbkdf2Sha256 {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Pbkdf2Sha256 {
    /// Create a KDF with an explicit authentication iteration count.
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl PasswordKdf for Pbkdf2Sha256 {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = generate_salt();

        let mut hash = [0u8; AUTH_HASH_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, self.iterations, &mut hash);

        // Store salt and hash together so validation is self-contained.
        let mut combined = Vec::with_capacity(SALT_LEN + AUTH_HASH_LEN);
        combined.extend_from_slice(&salt);
        combined.extend_from_slice(&hash);
        let encoded = BASE64.encode(&combined);

        hash.zeroize();
        combined.zeroize();

        Ok(encoded)
    }

    fn validate_password(&self, stored_hash: &str, password: &str) -> Result<bool> {
        let decoded = BASE64
            .decode(stored_hash)
            .map_err(|e| SecVaultError::Format(format!("stored hash is not valid base64: {e}")))?;

        if decoded.len() <= SALT_LEN {
            return Err(SecVaultError::Format(format!(
                "stored hash too short: {} bytes",
                decoded.len()
            )));
        }

        let (salt, expected) = decoded.split_at(SALT_LEN);

        let mut recomputed = Zeroizing::new(vec![0u8; expected.len()]);
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, self.iterations, &mut recomputed);

        // Constant-time comparison to avoid timing side channels.
        Ok(recomputed.ct_eq(expected).into())
    }

    fn derive_key(
        &self,
        password: &str,
        salt: &[u8],
        iterations: u32,
        key_len_bytes: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        if iterations == 0 {
            return Err(SecVaultError::Validation(
                "iteration count must be at least 1".into(),
            ));
        }
        if key_len_bytes == 0 {
            return Err(SecVaultError::Validation(
                "key length must be at least 1 byte".into(),
            ));
        }

        let mut key = Zeroizing::new(vec![0u8; key_len_bytes]);
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
        Ok(key)
    }
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
