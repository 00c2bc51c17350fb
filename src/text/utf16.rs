//! Conversion between UTF-8 and UTF-16.
//!
//! Compiled on Windows, where 16-bit strings are the native platform
//! encoding, or anywhere with the `utf16` feature.
//!
//! Code points above U+FFFF become a surrogate pair:
//!
//! ```text
//! v    = cp - 0x10000                  20 bits: yyyyyyyyyy xxxxxxxxxx
//! high = 0xD800 | (v >> 10)            110110yy yyyyyyyy
//! low  = 0xDC00 | (v & 0x3FF)          110111xx xxxxxxxx
//! ```

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::sequence::decode_all_with;
use super::utf8::{check_code_point, encode_code_point, EncodeError, Utf8Error, MAX_BMP};

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;
const SURROGATE_PAYLOAD_MASK: u16 = 0x03FF;
const SUPPLEMENTARY_BASE: u32 = 0x10000;

/// Error information for UTF-16 decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utf16Error {
    /// Index of the code unit where the bad surrogate starts.
    pub offset: usize,
    /// The kind of UTF-16 error.
    pub kind: Utf16ErrorKind,
}

impl core::fmt::Display for Utf16Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at code unit {}", self.kind, self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf16Error {}

/// The specific type of UTF-16 decoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Utf16ErrorKind {
    /// A low surrogate (0xDC00-0xDFFF) without a preceding high surrogate.
    UnexpectedLowSurrogate,
    /// A high surrogate (0xD800-0xDBFF) followed by a non-low-surrogate unit.
    UnpairedHighSurrogate,
    /// A high surrogate as the last code unit.
    TruncatedSurrogatePair,
}

impl core::fmt::Display for Utf16ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedLowSurrogate => write!(f, "unexpected low surrogate"),
            Self::UnpairedHighSurrogate => {
                write!(f, "high surrogate not followed by low surrogate")
            }
            Self::TruncatedSurrogatePair => write!(f, "high surrogate at end of input"),
        }
    }
}

/// Append the UTF-16 encoding of an already validated code point.
#[inline]
fn push_utf16(cp: u32, dst: &mut Vec<u16>) -> usize {
    if cp <= MAX_BMP {
        dst.push(cp as u16);
        return 1;
    }
    let v = cp - SUPPLEMENTARY_BASE;
    dst.push(HIGH_SURROGATE_START | (v >> 10) as u16);
    dst.push(LOW_SURROGATE_START | (v as u16 & SURROGATE_PAYLOAD_MASK));
    2
}

/// Encode `cp` as UTF-16, appending to `dst`.
///
/// Returns the number of code units appended (1 or 2). On error nothing is
/// written.
///
/// ```
/// use utf8kit::text::utf16::encode_utf16;
///
/// let mut out = Vec::new();
/// assert_eq!(encode_utf16(0x1F389, &mut out), Ok(2));
/// assert_eq!(out, vec![0xD83C, 0xDF89]);
/// ```
pub fn encode_utf16(cp: u32, dst: &mut Vec<u16>) -> Result<usize, EncodeError> {
    check_code_point(cp)?;
    Ok(push_utf16(cp, dst))
}

/// Convert UTF-8 to UTF-16.
pub fn utf8_to_utf16(input: &[u8]) -> Result<Vec<u16>, Utf8Error> {
    let mut out = Vec::new();
    utf8_to_utf16_into(input, &mut out)?;
    Ok(out)
}

/// Convert UTF-8 to UTF-16, appending to `dst`.
///
/// On failure `dst` is restored to its original length.
pub fn utf8_to_utf16_into(input: &[u8], dst: &mut Vec<u16>) -> Result<usize, Utf8Error> {
    let original_len = dst.len();
    match decode_all_with(input, |cp| {
        push_utf16(cp, dst);
    }) {
        Ok(()) => Ok(dst.len() - original_len),
        Err(err) => {
            dst.truncate(original_len);
            Err(err)
        }
    }
}

/// Convert UTF-16 to UTF-8.
///
/// ```
/// use utf8kit::text::utf16::{utf16_to_utf8, Utf16ErrorKind};
///
/// assert_eq!(utf16_to_utf8(&[0x41, 0xD83C, 0xDF89]).unwrap(), "A🎉".as_bytes());
///
/// let err = utf16_to_utf8(&[0x41, 0xDC00]).unwrap_err();
/// assert_eq!(err.kind, Utf16ErrorKind::UnexpectedLowSurrogate);
/// assert_eq!(err.offset, 1);
/// ```
pub fn utf16_to_utf8(input: &[u16]) -> Result<Vec<u8>, Utf16Error> {
    let mut out = Vec::with_capacity(input.len());
    utf16_to_utf8_into(input, &mut out)?;
    Ok(out)
}

/// Convert UTF-16 to UTF-8, appending to `dst`.
///
/// On failure `dst` is restored to its original length.
pub fn utf16_to_utf8_into(input: &[u16], dst: &mut Vec<u8>) -> Result<usize, Utf16Error> {
    let original_len = dst.len();
    let result = decode_utf16(input, |cp| {
        if let Some((bytes, len)) = encode_code_point(cp) {
            dst.extend_from_slice(&bytes[..len]);
        }
    });
    match result {
        Ok(()) => Ok(dst.len() - original_len),
        Err(err) => {
            dst.truncate(original_len);
            Err(err)
        }
    }
}

/// Walk UTF-16 code units, handing each scalar value to `on_decoded`.
fn decode_utf16<F>(input: &[u16], mut on_decoded: F) -> Result<(), Utf16Error>
where
    F: FnMut(u32),
{
    let mut i = 0;
    while i < input.len() {
        let start = i;
        let unit = input[i];
        i += 1;

        if !(HIGH_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit) {
            on_decoded(unit as u32);
            continue;
        }

        let fail = |kind| Utf16Error {
            offset: start,
            kind,
        };
        if unit > HIGH_SURROGATE_END {
            return Err(fail(Utf16ErrorKind::UnexpectedLowSurrogate));
        }
        let low = match input.get(i) {
            Some(&low) => low,
            None => return Err(fail(Utf16ErrorKind::TruncatedSurrogatePair)),
        };
        if !(LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&low) {
            return Err(fail(Utf16ErrorKind::UnpairedHighSurrogate));
        }
        i += 1;

        let high_bits = (unit & SURROGATE_PAYLOAD_MASK) as u32;
        let low_bits = (low & SURROGATE_PAYLOAD_MASK) as u32;
        on_decoded(((high_bits << 10) | low_bits) + SUPPLEMENTARY_BASE);
    }
    Ok(())
}
