use ciphernote::{CacheFile, CryptoError, SecretCache, decrypt, encrypt, generate_secret};
use tempfile::tempdir;

#[test]
fn diary_entry_roundtrip() {
    let envelope = encrypt("Dear diary, today was great.", "correct-horse-battery-staple")
        .unwrap();

    assert_eq!(
        decrypt(&envelope, "correct-horse-battery-staple").unwrap(),
        "Dear diary, today was great."
    );

    assert_eq!(
        decrypt(&envelope, "wrong-password").unwrap_err(),
        CryptoError::AuthenticationFailed
    );
}

#[test]
fn generated_secret_works_as_passphrase() {
    let secret = generate_secret().unwrap();

    let envelope = encrypt("entry locked with a generated secret", &secret).unwrap();
    assert_eq!(
        decrypt(&envelope, &secret).unwrap(),
        "entry locked with a generated secret"
    );
}

#[test]
fn cached_secret_survives_a_new_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("secret-cache.json");

    let secret = generate_secret().unwrap();
    let envelope = encrypt("remember me", &secret).unwrap();

    // first session stores the secret
    let cache = SecretCache::new(CacheFile::new(path.clone()));
    cache.store(&secret).unwrap();
    drop(cache);

    // a later session picks it up again
    let cache = SecretCache::new(CacheFile::new(path));
    let recalled = cache.retrieve().unwrap().unwrap();
    assert_eq!(decrypt(&envelope, &recalled).unwrap(), "remember me");

    cache.clear().unwrap();
    assert_eq!(cache.retrieve().unwrap(), None);
}

#[test]
fn envelope_is_opaque_to_the_storage_layer() {
    // whatever persists the envelope only ever sees base64 text
    let envelope = encrypt("plaintext stays local", "pw").unwrap();

    assert!(envelope.is_ascii());
    assert!(!envelope.contains("plaintext"));
}

#[test]
fn large_entry_roundtrips() {
    let entry = "A long day. ".repeat(10_000);
    let envelope = encrypt(&entry, "pw").unwrap();
    assert_eq!(decrypt(&envelope, "pw").unwrap(), entry);
}

#[test]
fn parallel_encryptions_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let entry = format!("entry {i}");
                let envelope = encrypt(&entry, "shared-passphrase").unwrap();
                (entry, envelope)
            })
        })
        .collect();

    for handle in handles {
        let (entry, envelope) = handle.join().unwrap();
        assert_eq!(decrypt(&envelope, "shared-passphrase").unwrap(), entry);
    }
}
