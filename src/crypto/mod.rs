//! Cryptographic primitives for SecVault.
//!
//! This module provides:
//! - AES-GCM authenticated encryption with AAD support (`cipher`)
//! - PBKDF2-HMAC-SHA256 password hashing and key derivation (`kdf`)
//!
//! Both are exposed behind small traits (`AeadCipher`, `PasswordKdf`) so the
//! vault service receives its crypto explicitly at construction instead of
//! reaching for globals.

pub mod cipher;
pub mod kdf;

pub use cipher::{AeadCipher, AesGcmCipher, NONCE_LEN, TAG_LEN};
pub use kdf::{generate_salt, PasswordKdf, Pbkdf2Sha256, DEFAULT_ITERATIONS, DEFAULT_KEY_LEN};
