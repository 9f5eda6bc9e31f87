// src/core/keyfile.rs
//! Key file persistence
//!
//! A key file is the UTF-16LE byte-order mark `FF FE` followed by the raw
//! UTF-16LE password: no length prefix, no terminator, no checksum. AES Crypt
//! reads it in place of an interactively typed password.

use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::aliases::Utf16Password;
use crate::consts::{MAX_PASSWD_LEN, STDOUT_SENTINEL, UTF16BE_BOM, UTF16LE_BOM};
use crate::core::transcode::{transcode, Codeset};
use crate::error::{KeygenError, Result};

/// Largest key file accepted by [`read_key_file`]: a text key file may use up
/// to four octets per character plus a CRLF.
const MAX_KEYFILE_LEN: usize = 4 * MAX_PASSWD_LEN + 2;

/// Where a key file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Path(PathBuf),
}

impl Destination {
    /// `-` means standard output, anything else is a path.
    pub fn parse<S: AsRef<OsStr> + ?Sized>(arg: &S) -> Self {
        let arg = arg.as_ref();
        if arg == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::Path(PathBuf::from(arg))
        }
    }

    /// Path that may be deleted if writing fails
    fn removable_path(&self) -> Option<&Path> {
        match self {
            Destination::Path(path) if !path.as_os_str().is_empty() => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("<stdout>"),
            Destination::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Deletes a half-written key file unless disarmed.
struct PartialOutputCleanup<'a> {
    path: Option<&'a Path>,
    armed: bool,
}

impl<'a> PartialOutputCleanup<'a> {
    fn new(destination: &'a Destination) -> Self {
        Self {
            path: destination.removable_path(),
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialOutputCleanup<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(path) = self.path {
            match fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed partial key file"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial key file"),
            }
        }
    }
}

fn open_output(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

fn stage_error(stage: &str, e: io::Error) -> KeygenError {
    KeygenError::FileIo(io::Error::new(e.kind(), format!("{stage}: {e}")))
}

/// Write BOM + `password` to `destination`, consuming (and erasing) the password.
///
/// A failure after the file was created removes it again.
pub fn write_key_file(destination: &Destination, mut password: Utf16Password) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_key_material(stdout.lock(), destination, password)
        }
        Destination::Path(path) => {
            let file = match open_output(path) {
                Ok(file) => file,
                Err(e) => {
                    password.erase();
                    return Err(stage_error(
                        &format!("cannot open output file {}", path.display()),
                        e,
                    ));
                }
            };
            write_key_material(file, destination, password)
        }
    }
}

/// Write the key file body to an already opened `sink`.
///
/// `destination` names what `sink` refers to so a failed write can clean it
/// up. The sink is dropped (closing files) before the cleanup runs.
pub fn write_key_material<W: Write>(
    mut sink: W,
    destination: &Destination,
    mut password: Utf16Password,
) -> Result<()> {
    let mut cleanup = PartialOutputCleanup::new(destination);

    let outcome = emit(&mut sink, password.expose_secret());

    let written = UTF16LE_BOM.len() + password.len();
    password.erase();
    drop(sink);

    outcome?;
    cleanup.disarm();
    info!(%destination, octets = written, "key file written");
    Ok(())
}

fn emit<W: Write>(sink: &mut W, password: &[u8]) -> Result<()> {
    sink.write_all(&UTF16LE_BOM)
        .map_err(|e| stage_error("could not write BOM to key file", e))?;
    sink.write_all(password)
        .map_err(|e| stage_error("could not write password to key file", e))?;
    sink.flush()
        .map_err(|e| stage_error("could not flush key file", e))
}

/// Load a key file into a UTF-16LE password.
///
/// `FF FE` files are taken as is and `FE FF` files are byte-swapped. A file
/// without a BOM is treated as text in `codeset`, minus one trailing newline.
pub fn read_key_file<P: AsRef<Path>>(path: P, codeset: Codeset) -> Result<Utf16Password> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        stage_error(&format!("cannot open key file {}", path.display()), e)
    })?;

    let mut raw = Zeroizing::new(Vec::<u8>::with_capacity(MAX_KEYFILE_LEN + 1));
    file.take(MAX_KEYFILE_LEN as u64 + 1)
        .read_to_end(&mut raw)
        .map_err(|e| stage_error(&format!("cannot read key file {}", path.display()), e))?;
    if raw.len() > MAX_KEYFILE_LEN {
        return Err(KeygenError::InputTooLong);
    }

    let password = match raw.get(..2) {
        Some(bom) if bom == UTF16LE_BOM => utf16_payload(&raw[2..], false)?,
        Some(bom) if bom == UTF16BE_BOM => utf16_payload(&raw[2..], true)?,
        _ => {
            let text = strip_newline(&raw);
            let mut password = Utf16Password::new();
            transcode(text, MAX_PASSWD_LEN, codeset, &mut password)?;
            password
        }
    };

    if password.is_empty() {
        return Err(KeygenError::KeyFileFormat("key file holds an empty password"));
    }
    debug!(path = %path.display(), octets = password.len(), "key file loaded");
    Ok(password)
}

fn utf16_payload(payload: &[u8], big_endian: bool) -> Result<Utf16Password> {
    if payload.len() % 2 != 0 {
        return Err(KeygenError::KeyFileFormat("odd number of UTF-16 octets"));
    }
    if payload.len() > 2 * MAX_PASSWD_LEN {
        return Err(KeygenError::InputTooLong);
    }
    let mut password = Utf16Password::from_slice(payload).map_err(|_| KeygenError::InputTooLong)?;
    if big_endian {
        let len = password.len();
        for pair in password.storage_mut()[..len].chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
    }
    Ok(password)
}

fn strip_newline(text: &[u8]) -> &[u8] {
    match text.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => text,
    }
}
