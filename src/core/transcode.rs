// src/core/transcode.rs
//! Locale codeset → UTF-16LE password conversion
//!
//! AES Crypt derives keys from the UTF-16LE form of a password. Passwords
//! arrive in whatever encoding the user's locale uses, so they are converted
//! here. The codeset is an explicit argument; [`Codeset::from_env`] resolves
//! the process locale once for callers that want the ambient behaviour.

use std::env;

use encoding_rs::{DecoderResult, Encoding, EUC_JP, EUC_KR, UTF_8};
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::Utf16Password;
use crate::error::EncodingError;

/// Source character encoding of a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codeset {
    /// 7-bit ASCII, the codeset of the `C`/`POSIX` locale
    Ascii,
    /// Any encoding `encoding_rs` knows (UTF-8, ISO-8859-x, windows-125x, EUC, …)
    Encoding(&'static Encoding),
}

impl Codeset {
    pub fn utf8() -> Self {
        Codeset::Encoding(UTF_8)
    }

    /// Look up a codeset by the label a locale uses (`UTF-8`, `utf8`, `ISO-8859-1`, …).
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "c" | "posix" | "ascii" | "us-ascii" | "ansi_x3.4-1968" => {
                return Ok(Codeset::Ascii)
            }
            // glibc spells these without the dash
            "utf8" => return Ok(Codeset::utf8()),
            "eucjp" => return Ok(Codeset::Encoding(EUC_JP)),
            "euckr" => return Ok(Codeset::Encoding(EUC_KR)),
            _ => {}
        }
        Encoding::for_label(trimmed.as_bytes())
            .map(Codeset::Encoding)
            .ok_or(EncodingError::UnsupportedCodeset)
    }

    /// Codeset of a locale name such as `en_US.UTF-8` or `de_DE.ISO-8859-15@euro`.
    pub fn from_locale_name(locale: &str) -> Result<Self, EncodingError> {
        let without_modifier = locale.split('@').next().unwrap_or_default();
        match without_modifier.split_once('.') {
            Some((_, codeset)) => Self::from_label(codeset),
            // `C`, `POSIX` and bare language names carry no codeset
            None if matches!(without_modifier, "" | "C" | "POSIX") => Ok(Codeset::Ascii),
            // glibc's default for territory-only locales such as `en_US`
            None => Self::from_label("ISO-8859-1"),
        }
    }

    /// Resolve the active locale the way `setlocale(LC_CTYPE, "")` does:
    /// `LC_ALL`, then `LC_CTYPE`, then `LANG`; unset means the `C` locale.
    pub fn from_env() -> Result<Self, EncodingError> {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| "C".to_string());
        let codeset = Self::from_locale_name(&locale)?;
        debug!(%locale, codeset = codeset.name(), "resolved locale codeset");
        Ok(codeset)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codeset::Ascii => "ANSI_X3.4-1968",
            Codeset::Encoding(encoding) => encoding.name(),
        }
    }
}

/// Convert `input` to UTF-16LE in `out`, writing at most `2 * max_length` octets.
///
/// Returns the number of octets written. No terminator or BOM is added. On
/// error `out` is left erased.
pub fn transcode(
    input: &[u8],
    max_length: usize,
    codeset: Codeset,
    out: &mut Utf16Password,
) -> Result<usize, EncodingError> {
    out.erase();
    let capacity = (2 * max_length).min(out.capacity());
    let max_units = capacity / 2;

    let mut units = Zeroizing::new(vec![0u16; max_units]);
    let written_units = match codeset {
        Codeset::Ascii => ascii_to_utf16(input, &mut units)?,
        Codeset::Encoding(encoding) => decode_to_utf16(encoding, input, &mut units)?,
    };

    let storage = out.storage_mut();
    for (i, unit) in units[..written_units].iter().enumerate() {
        storage[2 * i..2 * i + 2].copy_from_slice(&unit.to_le_bytes());
    }
    let written = written_units * 2;
    out.set_len(written);

    debug!(codeset = codeset.name(), octets = written, "password converted to UTF-16LE");
    Ok(written)
}

fn ascii_to_utf16(input: &[u8], units: &mut [u16]) -> Result<usize, EncodingError> {
    for (i, &byte) in input.iter().enumerate() {
        if !byte.is_ascii() {
            return Err(EncodingError::InvalidSequence(Codeset::Ascii.name()));
        }
        let slot = units.get_mut(i).ok_or(EncodingError::Overflow)?;
        *slot = u16::from(byte);
    }
    Ok(input.len())
}

fn decode_to_utf16(
    encoding: &'static Encoding,
    input: &[u8],
    units: &mut [u16],
) -> Result<usize, EncodingError> {
    // A leading BOM is password content, not a signature
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let worst_case = decoder
        .max_utf16_buffer_length(input.len())
        .ok_or(EncodingError::Overflow)?;
    let mut scratch = Zeroizing::new(vec![0u16; worst_case]);
    let (result, _read, written) =
        decoder.decode_to_utf16_without_replacement(input, &mut scratch, true);

    // Whichever problem comes first in the input wins
    let fits = written <= units.len();
    match result {
        DecoderResult::InputEmpty if fits => {
            units[..written].copy_from_slice(&scratch[..written]);
            Ok(written)
        }
        DecoderResult::Malformed(_, _) if fits => {
            Err(EncodingError::InvalidSequence(encoding.name()))
        }
        _ => Err(EncodingError::Overflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_names_resolve_to_codesets() {
        assert_eq!(Codeset::from_locale_name("en_US.UTF-8").unwrap(), Codeset::utf8());
        assert_eq!(Codeset::from_locale_name("C.utf8").unwrap(), Codeset::utf8());
        assert_eq!(Codeset::from_locale_name("C").unwrap(), Codeset::Ascii);
        assert_eq!(Codeset::from_locale_name("POSIX").unwrap(), Codeset::Ascii);
        assert_eq!(
            Codeset::from_locale_name("de_DE.ISO-8859-15@euro").unwrap(),
            Codeset::Encoding(encoding_rs::ISO_8859_15)
        );
        assert_eq!(
            Codeset::from_locale_name("ja_JP.eucJP").unwrap(),
            Codeset::Encoding(encoding_rs::EUC_JP)
        );
        assert_eq!(
            Codeset::from_locale_name("ko_KR.eucKR").unwrap(),
            Codeset::Encoding(encoding_rs::EUC_KR)
        );
        assert_eq!(
            Codeset::from_locale_name("xx_XX.NOT-A-CODESET"),
            Err(EncodingError::UnsupportedCodeset)
        );
    }

    #[test]
    fn failed_conversion_leaves_output_erased() {
        let mut out = Utf16Password::from_slice(b"stale secret").unwrap();
        let err = transcode(&[0xC3], 16, Codeset::utf8(), &mut out).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidSequence(_)));
        assert!(out.is_erased());
    }

    #[test]
    fn overflow_never_writes_past_capacity() {
        let mut out = Utf16Password::new();
        let err = transcode(b"abcdef", 4, Codeset::utf8(), &mut out).unwrap_err();
        assert_eq!(err, EncodingError::Overflow);
        assert!(out.is_erased());
    }

    #[test]
    fn ascii_rejects_high_bytes_before_overflow() {
        let mut out = Utf16Password::new();
        assert!(matches!(
            transcode(&[b'a', 0xE9, b'b', b'c'], 2, Codeset::Ascii, &mut out),
            Err(EncodingError::InvalidSequence(_))
        ));
        assert_eq!(
            transcode(b"abc", 2, Codeset::Ascii, &mut out),
            Err(EncodingError::Overflow)
        );
    }
}
