// src/lib.rs
//! aescrypt-keygen: password acquisition and key files for AES Crypt
//!
//! Features:
//! - Terminal password entry with echo off and confirmation
//! - Locale codeset → UTF-16LE conversion
//! - Random passwords over a 64-symbol alphabet
//! - BOM-prefixed UTF-16LE key files, never left half written
//! - Every secret buffer zeroized on every exit path

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod error;
pub mod terminal;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "logging")]
pub mod logging;

// Re-export everything users need at the crate root
pub use aliases::{PasswordBuffer, SecretBuffer, Utf16Password};
pub use config::load as load_config;
pub use crate::core::{
    generate_password, read_key_file, secure_erase, transcode, write_key_file, Codeset,
    Destination, DeviceEntropy, EntropySource, OsEntropy,
};
pub use enums::{EncryptMode, EntropyKind};
pub use error::{EncodingError, KeygenError, Result};
pub use terminal::{acquire_password, prompt_password};
