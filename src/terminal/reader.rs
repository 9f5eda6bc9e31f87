// src/terminal/reader.rs
//! Interactive password entry
//!
//! One pass per password: prompt, suppress echo, read a line, restore echo.
//! Encryption asks twice and compares. Every buffer that saw password bytes
//! is erased on every failure.

use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::PasswordBuffer;
use crate::consts::{CONFIRM_PROMPT, PROMPT};
use crate::enums::EncryptMode;
use crate::error::{KeygenError, Result};
use crate::terminal::echo::{EchoControl, EchoGuard};

/// A readable, writable terminal with echo control
pub trait PasswordTerminal: Read + Write + EchoControl {}

impl<T: Read + Write + EchoControl + ?Sized> PasswordTerminal for T {}

/// Open the controlling terminal at `device` and read a password from it.
#[cfg(unix)]
pub fn prompt_password<P: AsRef<Path>>(device: P, mode: EncryptMode) -> Result<PasswordBuffer> {
    let mut tty = crate::terminal::tty::TtyTerminal::open(device)?;
    acquire_password(&mut tty, mode)
}

#[cfg(not(unix))]
pub fn prompt_password<P: AsRef<Path>>(device: P, _mode: EncryptMode) -> Result<PasswordBuffer> {
    Err(KeygenError::ResourceUnavailable(std::io::Error::new(
        ErrorKind::Unsupported,
        format!(
            "no terminal password entry on this platform ({})",
            device.as_ref().display()
        ),
    )))
}

/// Read a password from `terminal`, asking for confirmation in encrypt mode.
pub fn acquire_password<T: PasswordTerminal + ?Sized>(
    terminal: &mut T,
    mode: EncryptMode,
) -> Result<PasswordBuffer> {
    let mut password = PasswordBuffer::new();
    let mut confirm = PasswordBuffer::new();
    read_and_confirm(terminal, mode, &mut password, &mut confirm)?;
    Ok(password)
}

/// Both buffers are zero on return unless this succeeds, in which case
/// `password` holds the entry and `confirm` is zero.
pub(crate) fn read_and_confirm<T: PasswordTerminal + ?Sized>(
    terminal: &mut T,
    mode: EncryptMode,
    password: &mut PasswordBuffer,
    confirm: &mut PasswordBuffer,
) -> Result<usize> {
    let outcome = read_pass(terminal, PROMPT, password).and_then(|()| {
        if mode.passes() < 2 {
            return Ok(());
        }
        let second = read_pass(terminal, CONFIRM_PROMPT, confirm);
        let matched = password.expose_secret() == confirm.expose_secret();
        confirm.erase();
        second?;
        if matched {
            Ok(())
        } else {
            Err(KeygenError::InputMismatch)
        }
    });

    confirm.erase();
    if let Err(e) = outcome {
        password.erase();
        debug!(error = %e, "password entry failed");
        return Err(e);
    }
    debug!(?mode, octets = password.len(), "password read from terminal");
    Ok(password.len())
}

fn read_pass<T: PasswordTerminal + ?Sized>(
    terminal: &mut T,
    prompt: &str,
    buf: &mut PasswordBuffer,
) -> Result<()> {
    terminal
        .write_all(prompt.as_bytes())
        .and_then(|()| terminal.flush())
        .map_err(KeygenError::ResourceUnavailable)?;

    let mut guard = EchoGuard::engage(terminal)?;
    let line = read_line(&mut *guard, buf);
    // The user's Enter was not echoed
    if let Err(e) = guard.write_all(b"\n") {
        debug!(error = %e, "could not end the prompt line");
    }
    guard.release()?;
    line
}

/// Read up to the next `\n` into `buf`.
///
/// Octets past the buffer's capacity are consumed but dropped, and the line
/// is then rejected as too long. A line may hold exactly `capacity` octets.
pub fn read_line<R: Read + ?Sized>(input: &mut R, buf: &mut PasswordBuffer) -> Result<()> {
    let mut byte = Zeroizing::new([0u8; 1]);
    let mut overflowed = false;
    loop {
        match input.read(&mut byte[..]) {
            Ok(0) => return Err(KeygenError::EndOfInput),
            Ok(_) if byte[0] == b'\n' => break,
            Ok(_) => {
                if buf.push(byte[0]).is_err() {
                    overflowed = true;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(error = %e, "terminal read failed");
                return Err(KeygenError::EndOfInput);
            }
        }
    }
    if overflowed {
        return Err(KeygenError::InputTooLong);
    }
    Ok(())
}
