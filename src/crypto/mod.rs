//! Cryptographic primitives for the journal pipeline.
//!
//! Provides key derivation and authenticated encryption. The parameters
//! below are fixed constants of the format: every envelope ever produced
//! must stay decryptable, so none of them is caller-configurable.

pub mod aead;
pub mod kdf;

pub use aead::{generate_nonce, generate_salt, open, seal};
pub use kdf::derive_key;

/// Length of the key-derivation salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the AES-GCM nonce (12 bytes / 96 bits).
pub const NONCE_LEN: usize = 12;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the authentication tag appended to the ciphertext (16 bytes).
pub const TAG_LEN: usize = 16;
/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
