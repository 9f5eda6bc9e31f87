// src/aliases.rs
//! Secret buffer types built on secure-gate
//!
//! These are the canonical types used throughout aescrypt-keygen. Storage is a
//! `secure_gate::Fixed` array (zeroized on drop); [`SecretBuffer`] adds the
//! logical length and bounds-checked writes on top of it.

use std::fmt;

use secure_gate::{Fixed, RevealSecret, RevealSecretMut};
use zeroize::Zeroize;

use crate::consts::{MAX_PASSWD_BUF, MAX_PASSWD_LEN};
use crate::core::erase::secure_erase;

/// Fixed-capacity secret byte buffer with a logical length
pub struct SecretBuffer<const N: usize> {
    bytes: Fixed<[u8; N]>,
    len: usize,
}

/// Password as typed or supplied, in the locale encoding
pub type PasswordBuffer = SecretBuffer<MAX_PASSWD_LEN>;

/// Password converted to UTF-16LE, ready for key derivation or a key file
pub type Utf16Password = SecretBuffer<MAX_PASSWD_BUF>;

/// Returned by [`SecretBuffer::push`] when the buffer is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

impl<const N: usize> SecretBuffer<N> {
    pub fn new() -> Self {
        Self {
            bytes: Fixed::new([0u8; N]),
            len: 0,
        }
    }

    /// Copy `data` into a fresh buffer; fails without copying if it does not fit.
    pub fn from_slice(data: &[u8]) -> Result<Self, CapacityExceeded> {
        if data.len() > N {
            return Err(CapacityExceeded);
        }
        let mut buf = Self::new();
        buf.bytes.expose_secret_mut()[..data.len()].copy_from_slice(data);
        buf.len = data.len();
        Ok(buf)
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, byte: u8) -> Result<(), CapacityExceeded> {
        if self.len >= N {
            return Err(CapacityExceeded);
        }
        self.bytes.expose_secret_mut()[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// The logical contents
    pub fn expose_secret(&self) -> &[u8] {
        &self.bytes.expose_secret()[..self.len]
    }

    /// Whole backing storage, for writers that fill the buffer in place.
    /// Call [`SecretBuffer::set_len`] afterwards.
    pub(crate) fn storage_mut(&mut self) -> &mut [u8; N] {
        self.bytes.expose_secret_mut()
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= N);
        self.len = len.min(N);
    }

    /// Zero the entire backing storage, not just the logical prefix.
    pub fn erase(&mut self) {
        secure_erase(self.bytes.expose_secret_mut());
        self.len = 0;
    }

    /// True when every byte of backing storage is zero.
    pub fn is_erased(&self) -> bool {
        self.len == 0 && self.bytes.expose_secret().iter().all(|&b| b == 0)
    }
}

impl<const N: usize> Default for SecretBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for SecretBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.expose_secret() == other.expose_secret()
    }
}

impl<const N: usize> Zeroize for SecretBuffer<N> {
    fn zeroize(&mut self) {
        self.erase();
    }
}

impl<const N: usize> Drop for SecretBuffer<N> {
    fn drop(&mut self) {
        self.erase();
    }
}

impl<const N: usize> fmt::Debug for SecretBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.len)
            .field("capacity", &N)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = SecretBuffer::<3>::new();
        assert!(buf.push(b'a').is_ok());
        assert!(buf.push(b'b').is_ok());
        assert!(buf.push(b'c').is_ok());
        assert_eq!(buf.push(b'd'), Err(CapacityExceeded));
        assert_eq!(buf.expose_secret(), b"abc");
    }

    #[test]
    fn from_slice_rejects_oversized_input() {
        assert!(SecretBuffer::<4>::from_slice(b"hello").is_err());
        let buf = SecretBuffer::<5>::from_slice(b"hello").unwrap();
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn erase_clears_whole_storage() {
        let mut buf = PasswordBuffer::from_slice(b"hunter2").unwrap();
        buf.storage_mut()[MAX_PASSWD_LEN - 1] = 0xAA;
        buf.erase();
        assert!(buf.is_erased());
        assert!(buf.expose_secret().is_empty());
    }

    #[test]
    fn debug_does_not_print_contents() {
        let buf = PasswordBuffer::from_slice(b"s3cret").unwrap();
        let shown = format!("{buf:?}");
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("len: 6"));
    }
}
