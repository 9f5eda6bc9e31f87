// src/error.rs
//! Public error type for the entire crate
//!
//! No variant ever carries secret bytes: every message is safe to print.

use thiserror::Error;

/// Failures of the locale → UTF-16LE conversion
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Converted form would not fit in `2 * max_length` octets
    #[error("password too long")]
    Overflow,

    /// Malformed or truncated input for the source codeset
    #[error("invalid character sequence for codeset {0}")]
    InvalidSequence(&'static str),

    /// The locale names a codeset we have no converter for
    #[error("unsupported locale codeset")]
    UnsupportedCodeset,
}

#[derive(Error, Debug)]
pub enum KeygenError {
    #[error("cannot open the controlling terminal: {0}")]
    ResourceUnavailable(#[source] std::io::Error),

    #[error("cannot configure terminal attributes ({0})")]
    TerminalConfig(&'static str),

    #[error("password too long")]
    InputTooLong,

    #[error("passwords don't match")]
    InputMismatch,

    #[error("end of input before a complete password was read")]
    EndOfInput,

    #[error("password conversion error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("cannot read random octets: {0}")]
    FatalEntropy(String),

    #[error("invalid password length {0} (must be 1..=1024)")]
    InvalidLength(usize),

    #[error("key file I/O error: {0}")]
    FileIo(#[from] std::io::Error),

    #[error("malformed key file: {0}")]
    KeyFileFormat(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl KeygenError {
    /// Stable negative sentinel for each error kind.
    ///
    /// The reader codes -1 and -3 through -7 follow the password-reader codes used by the AES Crypt
    /// command-line tools, so scripts keyed on them keep working.
    pub fn code(&self) -> i32 {
        match self {
            KeygenError::ResourceUnavailable(_) => -1,
            KeygenError::TerminalConfig(call) if call.starts_with("tcsetattr") => -4,
            KeygenError::TerminalConfig(_) => -3,
            KeygenError::EndOfInput => -5,
            KeygenError::InputTooLong => -6,
            KeygenError::InputMismatch => -7,
            KeygenError::Encoding(EncodingError::Overflow) => -6,
            KeygenError::Encoding(_) => -8,
            KeygenError::FatalEntropy(_) => -9,
            KeygenError::InvalidLength(_) => -10,
            KeygenError::FileIo(_) => -11,
            KeygenError::KeyFileFormat(_) => -12,
            KeygenError::Config(_) => -13,
        }
    }
}

pub type Result<T> = std::result::Result<T, KeygenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn every_error_kind_has_its_sentinel() {
        let cases = [
            (KeygenError::ResourceUnavailable(io::Error::from(io::ErrorKind::NotFound)), -1),
            (KeygenError::TerminalConfig("tcgetattr()"), -3),
            (KeygenError::TerminalConfig("tcsetattr()"), -4),
            (KeygenError::EndOfInput, -5),
            (KeygenError::InputTooLong, -6),
            (KeygenError::Encoding(EncodingError::Overflow), -6),
            (KeygenError::InputMismatch, -7),
            (KeygenError::Encoding(EncodingError::InvalidSequence("UTF-8")), -8),
            (KeygenError::Encoding(EncodingError::UnsupportedCodeset), -8),
            (KeygenError::FatalEntropy("short read".into()), -9),
            (KeygenError::InvalidLength(0), -10),
            (KeygenError::FileIo(io::Error::from(io::ErrorKind::WriteZero)), -11),
            (KeygenError::KeyFileFormat("odd number of UTF-16 octets"), -12),
            (KeygenError::Config("bad".into()), -13),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code, "{err:?}");
        }
    }
}
