//! Vault header model and its canonical JSON codec.
//!
//! The header is the plaintext metadata a reader needs before it can decrypt
//! anything: KDF parameters for the encryption key, cipher parameters, and
//! the stored password-authentication hash.
//!
//! The codec is the single point where headers become bytes.  Its output is
//! canonical: compact JSON with fields in declaration order, so two
//! logically-equal headers always encode to identical bytes.  That matters
//! because the AAD bound into every ciphertext is `SHA-256(header bytes)`:
//! any drift in the encoding would make old vaults undecryptable, and any
//! edit to the stored header (say, lowering the iteration count) invalidates
//! the AEAD tag.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{Result, SecVaultError};

/// Current header format version.
pub const CURRENT_VERSION: u32 = 1;

/// KDF algorithm identifier written into headers.
pub const KDF_ALG: &str = "PBKDF2WithHmacSHA256";

/// Cipher algorithm identifier written into headers.
pub const CIPHER_ALG: &str = "AES/GCM/NoPadding";

/// AAD construction identifier written into headers.
pub const AAD_FORMAT: &str = "sha256(header-json)";

/// Plaintext metadata stored at the beginning of a vault file.
///
/// Field order is load-bearing: the canonical encoding serializes fields in
/// declaration order.  Append new fields at the end and bump the version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultHeader {
    /// Format version.
    pub version: u32,

    /// KDF algorithm used for the encryption key.
    pub kdf_alg: String,

    /// Salt for the encryption-key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub enc_salt: Vec<u8>,

    /// PBKDF2 iteration count for the encryption key.
    pub enc_iterations: u32,

    /// Encryption key length in bytes (32 → AES-256).
    pub key_len_bytes: usize,

    /// Cipher algorithm the payload is sealed with.
    pub cipher_alg: String,

    /// Nonce size in bytes.
    pub iv_size_bytes: u32,

    /// Authentication tag size in bytes.
    pub tag_size_bytes: u32,

    /// Password authentication hash: base64 of `salt16 ‖ hash32`,
    /// computed with the KDF's default parameters (separate from the
    /// encryption-key parameters above).
    pub stored_auth_hash: String,

    /// How the AAD is built from this header.
    pub aad_format: String,
}

impl VaultHeader {
    /// Build a version-1 header with the crate's algorithm identifiers.
    pub fn new(
        enc_salt: Vec<u8>,
        enc_iterations: u32,
        key_len_bytes: usize,
        stored_auth_hash: String,
    ) -> Self {
        Self {
            version: CURRENT_VERSION,
            kdf_alg: KDF_ALG.to_string(),
            enc_salt,
            enc_iterations,
            key_len_bytes,
            cipher_alg: CIPHER_ALG.to_string(),
            iv_size_bytes: crate::crypto::NONCE_LEN as u32,
            tag_size_bytes: crate::crypto::TAG_LEN as u32,
            stored_auth_hash,
            aad_format: AAD_FORMAT.to_string(),
        }
    }

    /// Canonical byte encoding of this header.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SecVaultError::Serialization(format!("header: {e}")))
    }

    /// Decode a header from its canonical byte encoding.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| SecVaultError::Format(format!("header JSON: {e}")))
    }

    /// The AAD bound into the payload ciphertext: SHA-256 of the canonical
    /// header bytes.  Always 32 bytes.
    pub fn aad(&self) -> Result<[u8; 32]> {
        let bytes = self.to_json_bytes()?;
        Ok(Sha256::digest(&bytes).into())
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> VaultHeader {
        VaultHeader::new([7u8; 16].to_vec(), 65_536, 32, "c2FsdGhhc2g=".to_string())
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = sample_header();
        let b = sample_header();
        assert_eq!(
            a.to_json_bytes().unwrap(),
            b.to_json_bytes().unwrap(),
            "equal headers must encode to identical bytes"
        );
    }

    #[test]
    fn aad_is_32_bytes_and_stable() {
        let header = sample_header();
        let aad1 = header.aad().unwrap();
        let aad2 = header.aad().unwrap();
        assert_eq!(aad1.len(), 32);
        assert_eq!(aad1, aad2, "AAD must be stable across repeated calls");
    }

    #[test]
    fn aad_changes_when_a_field_changes() {
        let header = sample_header();
        let mut lowered = header.clone();
        lowered.enc_iterations = 1;
        assert_ne!(
            header.aad().unwrap(),
            lowered.aad().unwrap(),
            "editing header metadata must change the AAD"
        );
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let header = sample_header();
        let bytes = header.to_json_bytes().unwrap();
        let decoded = VaultHeader::from_json_bytes(&bytes).unwrap();

        assert_eq!(decoded.version, header.version);
        assert_eq!(decoded.enc_salt, header.enc_salt);
        assert_eq!(decoded.enc_iterations, header.enc_iterations);
        assert_eq!(decoded.key_len_bytes, header.key_len_bytes);
        assert_eq!(decoded.stored_auth_hash, header.stored_auth_hash);
        // And the roundtrip must not disturb the canonical encoding.
        assert_eq!(decoded.to_json_bytes().unwrap(), bytes);
    }

    #[test]
    fn field_names_are_camel_case_on_disk() {
        let bytes = sample_header().to_json_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        for key in [
            "\"version\"",
            "\"kdfAlg\"",
            "\"encSalt\"",
            "\"encIterations\"",
            "\"keyLenBytes\"",
            "\"cipherAlg\"",
            "\"ivSizeBytes\"",
            "\"tagSizeBytes\"",
            "\"storedAuthHash\"",
            "\"aadFormat\"",
        ] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }

    #[test]
    fn bad_header_bytes_are_a_format_error() {
        let err = VaultHeader::from_json_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, SecVaultError::Format(_)));
    }
}
