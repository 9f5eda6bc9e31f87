// src/terminal/tty.rs
//! The controlling terminal, driven through termios
//!
//! Opened directly (`/dev/tty`) instead of using stdin, so a redirected
//! standard input can never silently supply the password.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::mem::MaybeUninit;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use tracing::debug;

use crate::error::{KeygenError, Result};
use crate::terminal::echo::EchoControl;

pub struct TtyTerminal {
    device: File,
    saved: libc::termios,
}

impl TtyTerminal {
    /// Open `path` read/write and remember its current attributes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(KeygenError::ResourceUnavailable)?;
        let saved = get_attrs(device.as_raw_fd())?;
        debug!(device = %path.display(), "opened controlling terminal");
        Ok(Self { device, saved })
    }
}

fn get_attrs(fd: RawFd) -> Result<libc::termios> {
    let mut attrs = MaybeUninit::<libc::termios>::uninit();
    // SAFETY: `fd` is an open descriptor and `attrs` is valid for writes of one termios.
    if unsafe { libc::tcgetattr(fd, attrs.as_mut_ptr()) } != 0 {
        return Err(KeygenError::TerminalConfig("tcgetattr()"));
    }
    // SAFETY: tcgetattr succeeded, so the struct is fully initialized.
    Ok(unsafe { attrs.assume_init() })
}

fn set_attrs(fd: RawFd, attrs: &libc::termios) -> Result<()> {
    // SAFETY: `fd` is an open descriptor and `attrs` points to a valid termios.
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, attrs) } != 0 {
        return Err(KeygenError::TerminalConfig("tcsetattr()"));
    }
    Ok(())
}

impl EchoControl for TtyTerminal {
    fn suppress_echo(&mut self) -> Result<bool> {
        if self.saved.c_lflag & libc::ECHO == 0 {
            return Ok(false);
        }
        let mut quiet = self.saved;
        quiet.c_lflag &= !libc::ECHO;
        set_attrs(self.device.as_raw_fd(), &quiet)?;
        Ok(true)
    }

    fn restore_echo(&mut self) -> Result<()> {
        set_attrs(self.device.as_raw_fd(), &self.saved)
    }
}

impl Read for TtyTerminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.device.read(buf)
    }
}

impl Write for TtyTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.device.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.device.flush()
    }
}
