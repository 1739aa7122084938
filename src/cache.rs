//! Locally cached generated secret.
//!
//! A convenience layer only: it keeps one high-entropy generated secret in
//! plain local storage so the user need not retype it each session. The
//! cache provides no confidentiality of its own, and the stored value must
//! be treated exactly like a passphrase. It is not part of the
//! cryptographic trust boundary.

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Local;
use getrandom::fill;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;
use crate::storage::CacheFile;

/// Number of random bytes in a generated secret.
pub const SECRET_LEN: usize = 32;

/// Generate a fresh high-entropy secret, base64-encoded.
///
/// Intended as a passphrase substitute; 32 bytes from the OS CSPRNG.
pub fn generate_secret() -> Result<String, CryptoError> {
    let mut bytes = [0u8; SECRET_LEN];
    fill(&mut bytes).map_err(|_| CryptoError::RngUnavailable)?;
    Ok(STANDARD.encode(bytes))
}

#[derive(Serialize, Deserialize, Debug)]
struct CacheRecord {
    secret: String,
    created: String,
}

/// The on-disk cache holding at most one secret.
///
/// Reads and writes are last-writer-wins; the value is opaque, so a
/// concurrent writer clobbering it is acceptable.
pub struct SecretCache {
    file: CacheFile,
}

impl SecretCache {
    pub fn new(file: CacheFile) -> Self {
        Self { file }
    }

    /// Persists the secret, replacing any previous one.
    pub fn store(&self, secret: &str) -> Result<()> {
        let record = CacheRecord {
            secret: secret.to_string(),
            created: Local::now().to_string(),
        };

        let data = serde_json::to_vec(&record)?;
        self.file.save(&data).context("failed to write secret cache")
    }

    /// Returns the cached secret, or `None` if nothing is stored.
    pub fn retrieve(&self) -> Result<Option<String>> {
        if !self.file.exists() {
            return Ok(None);
        }

        let data = self.file.load().context("failed to read secret cache")?;
        let record: CacheRecord =
            serde_json::from_slice(&data).context("secret cache is corrupted")?;

        Ok(Some(record.secret))
    }

    /// Removes the cached secret. Idempotent; afterwards `retrieve`
    /// returns `None`.
    pub fn clear(&self) -> Result<()> {
        self.file.remove()
    }
}
