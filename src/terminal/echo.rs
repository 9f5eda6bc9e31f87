// src/terminal/echo.rs
//! Echo suppression with guaranteed restoration
//!
//! [`EchoGuard`] turns echo off when engaged and turns it back on when
//! released or dropped, whichever comes first, so every early return restores
//! the terminal.

use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::error::Result;

/// A terminal whose local echo can be switched off and back on
pub trait EchoControl {
    /// Switch echo off. Returns `true` if echo was on, i.e. it must be restored.
    fn suppress_echo(&mut self) -> Result<bool>;

    /// Put the attributes saved when the terminal was opened back in place.
    fn restore_echo(&mut self) -> Result<()>;
}

/// Scoped echo suppression over a borrowed terminal
pub struct EchoGuard<'a, T: EchoControl + ?Sized> {
    terminal: &'a mut T,
    restore: bool,
}

impl<'a, T: EchoControl + ?Sized> EchoGuard<'a, T> {
    pub fn engage(terminal: &'a mut T) -> Result<Self> {
        let restore = terminal.suppress_echo()?;
        Ok(Self { terminal, restore })
    }

    /// Restore echo now and report whether that worked.
    pub fn release(mut self) -> Result<()> {
        if std::mem::take(&mut self.restore) {
            self.terminal.restore_echo()
        } else {
            Ok(())
        }
    }
}

impl<T: EchoControl + ?Sized> Deref for EchoGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: EchoControl + ?Sized> DerefMut for EchoGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: EchoControl + ?Sized> Drop for EchoGuard<'_, T> {
    fn drop(&mut self) {
        if self.restore {
            if let Err(e) = self.terminal.restore_echo() {
                warn!(error = %e, "terminal echo could not be restored");
            }
        }
    }
}
