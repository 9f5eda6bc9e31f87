// src/core/erase.rs
//! Secure erasure of secret memory
//!
//! `zeroize` performs volatile writes followed by a compiler fence, so the
//! zeroing survives optimization even when the buffer is never read again.

use zeroize::Zeroize;

/// Overwrite every byte of `buffer` with zero.
#[inline]
pub fn secure_erase(buffer: &mut [u8]) {
    buffer.zeroize();
}
