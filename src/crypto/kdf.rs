use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};

/// Derive the encryption key from a passphrase and a salt.
///
/// PBKDF2-HMAC-SHA256 with a fixed iteration count, stretched to exactly
/// 32 key bytes. Deterministic: the same (passphrase, salt) pair always
/// yields the same key, which is what lets decryption re-derive it from
/// the salt stored in the envelope.
///
/// This is CPU-bound and deliberately slow. Callers on an interactive
/// path should run it on a worker thread; independent derivations may
/// run in parallel without coordination.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; SALT_LEN];

        let k1 = derive_key("passphrase", &salt);
        let k2 = derive_key("passphrase", &salt);

        assert_eq!(*k1, *k2);
    }

    #[test]
    fn different_passphrases_give_different_keys() {
        let salt = [7u8; SALT_LEN];

        let k1 = derive_key("passphrase", &salt);
        let k2 = derive_key("passphrasf", &salt);

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn different_salts_give_different_keys() {
        let k1 = derive_key("passphrase", &[1u8; SALT_LEN]);
        let k2 = derive_key("passphrase", &[2u8; SALT_LEN]);

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn empty_passphrase_still_derives() {
        let salt = [0u8; SALT_LEN];
        let key = derive_key("", &salt);
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn parallel_derivations_agree_with_sequential() {
        let salt = [9u8; SALT_LEN];
        let expected = derive_key("shared", &salt);

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || derive_key("shared", &salt)))
            .collect();

        for handle in handles {
            assert_eq!(*handle.join().unwrap(), *expected);
        }
    }
}
