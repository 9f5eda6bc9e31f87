// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the small closed sets of user-visible choices.

use serde::{Deserialize, Serialize};

/// Whether a password is being set (needs confirmation) or supplied to decrypt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EncryptMode {
    #[default]
    Decrypt,
    Encrypt,
}

impl EncryptMode {
    /// Number of read passes at the prompt
    pub fn passes(self) -> usize {
        match self {
            EncryptMode::Decrypt => 1,
            EncryptMode::Encrypt => 2,
        }
    }
}

/// Where generated passwords draw their random octets from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntropyKind {
    /// Operating-system CSPRNG (`getrandom`)
    #[default]
    Os,
    /// A random device file read directly, e.g. `/dev/urandom`
    Device,
}
