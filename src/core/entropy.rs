// src/core/entropy.rs
//! Random password generation
//!
//! Raw octets come from an [`EntropySource`], are folded onto a 64-symbol
//! printable alphabet and converted to UTF-16LE. A source that cannot deliver
//! every requested octet is a hard failure: nothing is ever padded.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use rand::{rngs::OsRng, TryRngCore};
use tracing::{debug, warn};

use crate::aliases::{PasswordBuffer, Utf16Password};
use crate::consts::{MAX_PASSWD_LEN, PASSWORD_ALPHABET};
use crate::core::transcode::{transcode, Codeset};
use crate::error::{KeygenError, Result};

/// Anything that can fill a buffer completely with random octets
pub trait EntropySource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating-system CSPRNG via `getrandom`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| KeygenError::FatalEntropy(e.to_string()))
    }
}

/// A random device read directly, e.g. `/dev/urandom`
#[derive(Debug, Clone)]
pub struct DeviceEntropy {
    path: PathBuf,
}

impl DeviceEntropy {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntropySource for DeviceEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let mut device = File::open(&self.path).map_err(|e| {
            KeygenError::FatalEntropy(format!("cannot open {}: {e}", self.path.display()))
        })?;
        device.read_exact(dest).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => KeygenError::FatalEntropy(format!(
                "short read from {}",
                self.path.display()
            )),
            _ => KeygenError::FatalEntropy(format!("cannot read {}: {e}", self.path.display())),
        })
    }
}

/// Map each octet in place onto the 64-symbol password alphabet.
pub fn map_to_alphabet(octets: &mut [u8]) {
    for octet in octets.iter_mut() {
        *octet = PASSWORD_ALPHABET[usize::from(*octet) % PASSWORD_ALPHABET.len()];
    }
}

/// Generate a random `length`-character password and return it as UTF-16LE.
pub fn generate_password<S: EntropySource + ?Sized>(
    length: usize,
    source: &mut S,
    codeset: Codeset,
) -> Result<Utf16Password> {
    if !(1..=MAX_PASSWD_LEN).contains(&length) {
        warn!(length, "rejected password length");
        return Err(KeygenError::InvalidLength(length));
    }

    // Dropping `raw` on any path below zeroes it
    let mut raw = PasswordBuffer::new();
    source.fill(&mut raw.storage_mut()[..length])?;
    raw.set_len(length);
    map_to_alphabet(&mut raw.storage_mut()[..length]);

    let mut password = Utf16Password::new();
    transcode(raw.expose_secret(), MAX_PASSWD_LEN, codeset, &mut password)?;
    raw.erase();

    debug!(length, octets = password.len(), "generated random password");
    Ok(password)
}
