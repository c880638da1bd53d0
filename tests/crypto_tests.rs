//! Integration tests for the SecVault crypto module.

use std::collections::HashSet;

use secvault::crypto::{
    generate_salt, AeadCipher, AesGcmCipher, PasswordKdf, Pbkdf2Sha256, NONCE_LEN, TAG_LEN,
};
use secvault::errors::SecVaultError;

// ---------------------------------------------------------------------------
// AEAD round-trip and AAD binding
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip_with_aad() {
    let cipher = AesGcmCipher;
    let key = [0xABu8; 32];
    let plaintext = b"{\"entries\":[]}";
    let aad = b"header-digest";

    let blob = cipher.encrypt(&key, plaintext, aad).expect("encrypt");
    assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);

    let recovered = cipher.decrypt(&key, &blob, aad).expect("decrypt");
    assert_eq!(&*recovered, plaintext);
}

#[test]
fn all_three_key_sizes_roundtrip() {
    let cipher = AesGcmCipher;
    let plaintext = b"payload";

    for key_len in [16usize, 24, 32] {
        let key = vec![0x5Au8; key_len];
        let blob = cipher.encrypt(&key, plaintext, b"").expect("encrypt");
        let recovered = cipher.decrypt(&key, &blob, b"").expect("decrypt");
        assert_eq!(&*recovered, plaintext, "key size {key_len} failed");
    }
}

#[test]
fn invalid_key_size_is_a_validation_error() {
    let cipher = AesGcmCipher;
    let key = [0u8; 15];

    let err = cipher.encrypt(&key, b"data", b"").unwrap_err();
    assert!(matches!(err, SecVaultError::Validation(_)));

    let err = cipher.decrypt(&key, &[0u8; 64], b"").unwrap_err();
    assert!(matches!(err, SecVaultError::Validation(_)));
}

#[test]
fn decrypt_under_different_aad_fails_integrity() {
    let cipher = AesGcmCipher;
    let key = [0x11u8; 32];

    let blob = cipher.encrypt(&key, b"secret", b"aad-A").expect("encrypt");
    let err = cipher.decrypt(&key, &blob, b"aad-B").unwrap_err();
    assert!(matches!(err, SecVaultError::IntegrityFailure));
}

#[test]
fn decrypt_with_wrong_key_fails_integrity() {
    let cipher = AesGcmCipher;
    let blob = cipher.encrypt(&[0x11u8; 32], b"secret", b"").expect("encrypt");

    let err = cipher.decrypt(&[0x22u8; 32], &blob, b"").unwrap_err();
    assert!(matches!(err, SecVaultError::IntegrityFailure));
}

#[test]
fn any_single_bit_flip_fails_integrity() {
    let cipher = AesGcmCipher;
    let key = [0xBBu8; 32];
    let blob = cipher.encrypt(&key, b"tamper target", b"aad").expect("encrypt");

    // Flip one bit in the nonce, the ciphertext, and the tag regions.
    for index in [0, NONCE_LEN + 2, blob.len() - 1] {
        let mut tampered = blob.clone();
        tampered[index] ^= 0x01;
        let err = cipher.decrypt(&key, &tampered, b"aad").unwrap_err();
        assert!(
            matches!(err, SecVaultError::IntegrityFailure),
            "bit flip at byte {index} must fail the tag check"
        );
    }
}

#[test]
fn truncated_blob_is_a_format_error() {
    let cipher = AesGcmCipher;
    // One byte shy of nonce + tag.
    let err = cipher
        .decrypt(&[0u8; 32], &[0u8; NONCE_LEN + TAG_LEN - 1], b"")
        .unwrap_err();
    assert!(matches!(err, SecVaultError::Format(_)));
}

#[test]
fn nonces_never_repeat_across_encryptions() {
    let cipher = AesGcmCipher;
    let key = [0xCDu8; 32];

    let mut nonces = HashSet::new();
    for _ in 0..64 {
        let blob = cipher.encrypt(&key, b"same plaintext", b"same aad").unwrap();
        assert!(
            nonces.insert(blob[..NONCE_LEN].to_vec()),
            "nonce repeated across encryptions of identical inputs"
        );
    }
}

#[test]
fn empty_plaintext_roundtrips() {
    let cipher = AesGcmCipher;
    let key = [0x42u8; 32];

    let blob = cipher.encrypt(&key, b"", b"aad").expect("encrypt");
    assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);

    let recovered = cipher.decrypt(&key, &blob, b"aad").expect("decrypt");
    assert!(recovered.is_empty());
}

// ---------------------------------------------------------------------------
// PBKDF2 key derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_key_is_deterministic() {
    let kdf = Pbkdf2Sha256::default();
    let salt = generate_salt();

    let key1 = kdf.derive_key("passphrase", &salt, 1_000, 32).unwrap();
    let key2 = kdf.derive_key("passphrase", &salt, 1_000, 32).unwrap();
    assert_eq!(&*key1, &*key2, "same inputs must produce the same key");
}

#[test]
fn derive_key_output_matches_requested_length() {
    let kdf = Pbkdf2Sha256::default();
    let salt = generate_salt();

    for len in [16usize, 24, 32] {
        let key = kdf.derive_key("pw", &salt, 1_000, len).unwrap();
        assert_eq!(key.len(), len);
    }
}

#[test]
fn derive_key_varies_with_salt_and_password() {
    let kdf = Pbkdf2Sha256::default();
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let base = kdf.derive_key("pw", &salt1, 1_000, 32).unwrap();
    let other_salt = kdf.derive_key("pw", &salt2, 1_000, 32).unwrap();
    let other_pw = kdf.derive_key("pw2", &salt1, 1_000, 32).unwrap();

    assert_ne!(&*base, &*other_salt, "different salts must change the key");
    assert_ne!(&*base, &*other_pw, "different passwords must change the key");
}

#[test]
fn derive_key_varies_with_iteration_count() {
    let kdf = Pbkdf2Sha256::default();
    let salt = generate_salt();

    let a = kdf.derive_key("pw", &salt, 1_000, 32).unwrap();
    let b = kdf.derive_key("pw", &salt, 2_000, 32).unwrap();
    assert_ne!(&*a, &*b);
}

#[test]
fn derive_key_rejects_zero_iterations_and_zero_length() {
    let kdf = Pbkdf2Sha256::default();
    let salt = generate_salt();

    let err = kdf.derive_key("pw", &salt, 0, 32).unwrap_err();
    assert!(matches!(err, SecVaultError::Validation(_)));

    let err = kdf.derive_key("pw", &salt, 1_000, 0).unwrap_err();
    assert!(matches!(err, SecVaultError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Password hashing and validation
// ---------------------------------------------------------------------------

#[test]
fn hash_and_validate_password() {
    let kdf = Pbkdf2Sha256::new(1_000);
    let stored = kdf.hash_password("Tr0ub4dor").unwrap();

    assert!(kdf.validate_password(&stored, "Tr0ub4dor").unwrap());
    assert!(!kdf.validate_password(&stored, "Tr0ub4dor ").unwrap());
    assert!(!kdf.validate_password(&stored, "").unwrap());
}

#[test]
fn malformed_stored_hash_is_a_format_error() {
    let kdf = Pbkdf2Sha256::default();
    let err = kdf.validate_password("%%%", "pw").unwrap_err();
    assert!(matches!(err, SecVaultError::Format(_)));
}
