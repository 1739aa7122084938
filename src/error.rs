use std::fmt;

/// Failures of the encryption pipeline.
///
/// Authentication failure deliberately does not say whether the passphrase
/// was wrong or the ciphertext was tampered with; distinguishing the two
/// would hand an attacker a decryption oracle.
#[derive(Debug, PartialEq, Eq)]
pub enum CryptoError {
    /// Input is not a valid envelope: not base64, or too short to hold
    /// a salt and a nonce.
    MalformedEnvelope,
    /// The authentication tag did not verify.
    AuthenticationFailed,
    /// The OS random source could not produce bytes.
    RngUnavailable,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::MalformedEnvelope => write!(f, "malformed envelope"),
            CryptoError::AuthenticationFailed => {
                write!(f, "incorrect passphrase or corrupted data")
            }
            CryptoError::RngUnavailable => write!(f, "OS random generator unavailable"),
        }
    }
}

impl std::error::Error for CryptoError {}
