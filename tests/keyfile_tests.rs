// tests/keyfile_tests.rs
//! Key file writing and reading

mod common;

use std::fs;

use aescrypt_keygen::consts::MAX_PASSWD_LEN;
use aescrypt_keygen::{
    read_key_file, transcode, write_key_file, Codeset, Destination, KeygenError, Utf16Password,
};
use tempfile::tempdir;

fn utf16(text: &str) -> Utf16Password {
    let mut out = Utf16Password::new();
    transcode(text.as_bytes(), MAX_PASSWD_LEN, Codeset::utf8(), &mut out).unwrap();
    out
}

#[test]
fn test_hello_key_file_layout() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.key");

    write_key_file(&Destination::Path(path.clone()), utf16("hello")).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 2 + common::encode_utf16le("hello").len());
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
    assert_eq!(&bytes[2..], common::encode_utf16le("hello").as_slice());
}

#[test]
fn test_existing_file_is_truncated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.key");
    fs::write(&path, vec![0xAA; 500]).unwrap();

    write_key_file(&Destination::Path(path.clone()), utf16("pw")).unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0xFE, b'p', 0, b'w', 0]);
}

#[test]
fn test_written_key_file_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("round.key");
    let text = "Grüße 🔐";

    write_key_file(&Destination::Path(path.clone()), utf16(text)).unwrap();
    let loaded = read_key_file(&path, Codeset::utf8()).unwrap();
    assert_eq!(loaded.expose_secret(), common::encode_utf16le(text).as_slice());
}

#[test]
fn test_big_endian_key_file_is_swapped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("be.key");
    fs::write(&path, [0xFE, 0xFF, 0x00, b'h', 0x00, b'i']).unwrap();

    let loaded = read_key_file(&path, Codeset::utf8()).unwrap();
    assert_eq!(loaded.expose_secret(), &[b'h', 0, b'i', 0]);
}

#[test]
fn test_text_key_file_uses_codeset_and_drops_newline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.key");
    fs::write(&path, "hello\r\n").unwrap();

    let loaded = read_key_file(&path, Codeset::utf8()).unwrap();
    assert_eq!(loaded.expose_secret(), common::encode_utf16le("hello").as_slice());
}

#[test]
fn test_malformed_key_files() {
    let dir = tempdir().unwrap();

    let odd = dir.path().join("odd.key");
    fs::write(&odd, [0xFF, 0xFE, b'a', 0, b'b']).unwrap();
    assert!(matches!(
        read_key_file(&odd, Codeset::utf8()),
        Err(KeygenError::KeyFileFormat(_))
    ));

    let empty = dir.path().join("empty.key");
    fs::write(&empty, [0xFF, 0xFE]).unwrap();
    assert!(matches!(
        read_key_file(&empty, Codeset::utf8()),
        Err(KeygenError::KeyFileFormat(_))
    ));

    let long = dir.path().join("long.key");
    let mut body = vec![0xFF, 0xFE];
    body.extend(std::iter::repeat([b'x', 0]).take(MAX_PASSWD_LEN + 1).flatten());
    fs::write(&long, body).unwrap();
    assert!(matches!(
        read_key_file(&long, Codeset::utf8()),
        Err(KeygenError::InputTooLong)
    ));
}

#[test]
fn test_missing_key_file_is_file_io() {
    let dir = tempdir().unwrap();
    let err = read_key_file(dir.path().join("nope.key"), Codeset::utf8()).unwrap_err();
    assert!(matches!(err, KeygenError::FileIo(_)));
}

#[test]
fn test_unwritable_destination_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.key");
    let err = write_key_file(&Destination::Path(path.clone()), utf16("hello")).unwrap_err();
    assert!(matches!(err, KeygenError::FileIo(_)));
    assert!(!path.exists());
}
