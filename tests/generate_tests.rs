// tests/generate_tests.rs
//! Random password generation

mod common;

use aescrypt_keygen::consts::{MAX_PASSWD_LEN, PASSWORD_ALPHABET};
use aescrypt_keygen::{generate_password, Codeset, DeviceEntropy, KeygenError, OsEntropy};

#[test]
fn test_every_length_yields_that_many_alphabet_characters() {
    common::setup();
    let mut source = OsEntropy;
    for length in 1..=MAX_PASSWD_LEN {
        let password = generate_password(length, &mut source, Codeset::utf8()).unwrap();
        let text = common::decode_utf16le(password.expose_secret());
        assert_eq!(text.chars().count(), length);
        assert!(text.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
    }
}

#[test]
fn test_ascii_locale_is_enough_for_generated_passwords() {
    let password = generate_password(64, &mut OsEntropy, Codeset::Ascii).unwrap();
    assert_eq!(password.len(), 128);
}

#[test]
fn test_two_passwords_differ() {
    let a = generate_password(32, &mut OsEntropy, Codeset::utf8()).unwrap();
    let b = generate_password(32, &mut OsEntropy, Codeset::utf8()).unwrap();
    assert_ne!(a.expose_secret(), b.expose_secret());
}

#[cfg(unix)]
#[test]
fn test_urandom_device_source() {
    let mut source = DeviceEntropy::new("/dev/urandom");
    let password = generate_password(20, &mut source, Codeset::utf8()).unwrap();
    assert_eq!(common::decode_utf16le(password.expose_secret()).len(), 20);
}

#[test]
fn test_missing_device_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = DeviceEntropy::new(dir.path().join("no-random-here"));
    let err = generate_password(20, &mut source, Codeset::utf8()).unwrap_err();
    assert!(matches!(err, KeygenError::FatalEntropy(_)));
}

#[test]
fn test_length_bounds() {
    assert!(matches!(
        generate_password(0, &mut OsEntropy, Codeset::utf8()),
        Err(KeygenError::InvalidLength(0))
    ));
    assert!(matches!(
        generate_password(1025, &mut OsEntropy, Codeset::utf8()),
        Err(KeygenError::InvalidLength(1025))
    ));
}
