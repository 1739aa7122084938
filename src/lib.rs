//! Passphrase-based authenticated encryption for private journal entries.
//!
//! Plaintext never needs to leave the device: a passphrase is stretched
//! into a one-use key (PBKDF2-HMAC-SHA256), the entry is sealed with
//! AES-256-GCM, and the result is a single opaque base64 string that any
//! untrusted storage layer can persist.
//!
//! ```no_run
//! let envelope = ciphernote::encrypt("Dear diary", "correct-horse-battery-staple")?;
//! let plaintext = ciphernote::decrypt(&envelope, "correct-horse-battery-staple")?;
//! assert_eq!(plaintext, "Dear diary");
//! # Ok::<(), ciphernote::CryptoError>(())
//! ```

mod cache;
mod crypto;
mod envelope;
mod error;
mod storage;

pub use crate::cache::{SECRET_LEN, SecretCache, generate_secret};
pub use crate::crypto::{KEY_LEN, NONCE_LEN, PBKDF2_ITERATIONS, SALT_LEN, TAG_LEN};
pub use crate::envelope::Envelope;
pub use crate::error::CryptoError;
pub use crate::storage::CacheFile;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Encrypt a journal entry under a passphrase.
///
/// Generates a fresh salt and nonce, derives the key, and returns the
/// base64 envelope. Two calls with identical input yield different
/// envelopes that both decrypt to the same plaintext.
///
/// # Errors
///
/// Only [`CryptoError::RngUnavailable`], if the OS random source fails.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String, CryptoError> {
    let salt = crypto::generate_salt()?;
    let nonce = crypto::generate_nonce()?;

    let key = crypto::derive_key(passphrase, &salt);
    let ciphertext = crypto::seal(&key, &nonce, plaintext.as_bytes())?;

    Ok(Envelope::new(salt, nonce, ciphertext).encode())
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// The key is re-derived from the passphrase and the salt embedded in
/// the envelope; it lives only for the duration of this call.
///
/// # Errors
///
/// - [`CryptoError::MalformedEnvelope`] — not base64, or too short.
/// - [`CryptoError::AuthenticationFailed`] — wrong passphrase or
///   tampered data; the two are deliberately indistinguishable. Not
///   worth retrying: the outcome will not change.
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<String, CryptoError> {
    let parsed = Envelope::parse(envelope)?;

    let key = crypto::derive_key(passphrase, parsed.salt());
    let plaintext = crypto::open(&key, parsed.nonce(), parsed.ciphertext())?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::MalformedEnvelope)
}

/// The secret cache at the platform-default location.
pub fn default_cache() -> Result<SecretCache> {
    let project_dirs = ProjectDirs::from("", "", "ciphernote")
        .context("could not determine platform directories")?;

    let path = project_dirs.data_dir().join("secret-cache.json");

    Ok(SecretCache::new(CacheFile::new(path)))
}
