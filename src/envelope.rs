//! The serialized ciphertext envelope.
//!
//! Layout, base64-encoded for storage:
//! ```text
//! SALT (16) | NONCE (12) | CIPHERTEXT + TAG (16)
//! ```
//!
//! There is no magic, version byte, or metadata; the string is opaque to
//! everything outside this crate, and version skew is the caller's problem
//! (a schema field next to the envelope, for instance).

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::crypto::{NONCE_LEN, SALT_LEN};
use crate::error::CryptoError;

/// A parsed envelope: salt, nonce, and ciphertext with its appended tag.
#[derive(Debug)]
pub struct Envelope {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub(crate) fn new(
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        ciphertext: Vec<u8>,
    ) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialize to the base64 storage form.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(SALT_LEN + NONCE_LEN + self.ciphertext.len());

        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);

        STANDARD.encode(buf)
    }

    /// Parse a stored envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedEnvelope`] if the string is not
    /// valid base64 or decodes to fewer bytes than a salt and nonce.
    pub fn parse(encoded: &str) -> Result<Self, CryptoError> {
        let data = STANDARD
            .decode(encoded)
            .map_err(|_| CryptoError::MalformedEnvelope)?;

        if data.len() < SALT_LEN + NONCE_LEN {
            return Err(CryptoError::MalformedEnvelope);
        }

        let mut offset = 0;

        let salt: [u8; SALT_LEN] = data[offset..offset + SALT_LEN]
            .try_into()
            .map_err(|_| CryptoError::MalformedEnvelope)?;
        offset += SALT_LEN;

        let nonce: [u8; NONCE_LEN] = data[offset..offset + NONCE_LEN]
            .try_into()
            .map_err(|_| CryptoError::MalformedEnvelope)?;
        offset += NONCE_LEN;

        let ciphertext = data[offset..].to_vec();

        Ok(Envelope {
            salt,
            nonce,
            ciphertext,
        })
    }
}
