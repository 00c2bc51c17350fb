//! UTF-8 encoding and single-step decoding with detailed error reporting.
//!
//! ## UTF-8 Encoding Rules
//!
//! UTF-8 is a variable-width encoding that uses 1-4 bytes per character:
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+10FFFF   |
//!
//! ## Decoding Checks
//!
//! [`decode_step`] rejects:
//! 1. **Invalid lead bytes**: Bytes 0x80-0xBF or 0xF8-0xFF where a lead byte is expected
//! 2. **Invalid continuation bytes**: Non-continuation bytes where continuation expected
//! 3. **Overlong encodings**: Using more bytes than necessary (security vulnerability)
//! 4. **Surrogate code points**: U+D800-U+DFFF (reserved for UTF-16)
//! 5. **Out of range**: Code points above U+10FFFF
//! 6. **Truncated sequences**: Multi-byte sequence cut off at end of input
//!
//! Every bulk operation in [`crate::text::sequence`] is built on
//! [`decode_step`], so it is the single definition of validity.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::table::{
    self, encoded_len, is_continuation_byte, lead_masks, lead_shift, CONTINUATION_BITS,
    CONTINUATION_PAYLOAD_MASK, CONTINUATION_TAG,
};

/// Largest ASCII code point.
pub const MAX_ASCII: u32 = 0x7F;

/// Largest code point of the Basic Multilingual Plane.
pub const MAX_BMP: u32 = 0xFFFF;

/// Largest Unicode code point.
pub const MAX_UNICODE: u32 = 0x10FFFF;

/// First surrogate code point.
pub const SURROGATE_START: u32 = 0xD800;

/// One past the last surrogate code point.
pub const SURROGATE_END: u32 = 0xE000;

/// Sentinel meaning "no valid code point".
///
/// Never a valid code point. Useful for callers that flatten an
/// `Option<u32>` into a bare `u32`.
pub const BAD_CHAR: u32 = u32::MAX;

// =============================================================================
// Errors
// =============================================================================

/// Error information for UTF-8 decoding failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utf8Error {
    /// Byte offset of the first byte of the malformed sequence (0-indexed).
    ///
    /// This is also the length of the longest valid prefix.
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl Utf8Error {
    /// Build an error for the sequence starting at `offset` in `input`,
    /// computing its line and column.
    pub fn new(input: &[u8], offset: usize, kind: Utf8ErrorKind) -> Self {
        let prefix = &input[..offset.min(input.len())];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);

        Self {
            offset,
            line,
            column: offset - line_start + 1,
            kind,
        }
    }

    /// Length of the longest valid UTF-8 prefix of the input.
    #[inline]
    pub fn valid_up_to(&self) -> usize {
        self.offset
    }
}

impl core::fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// The specific type of UTF-8 decoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Utf8ErrorKind {
    /// A byte that cannot start a sequence appeared where a lead byte was
    /// expected: a continuation byte (0x80-0xBF) or 0xF8-0xFF.
    InvalidLeadByte,

    /// A byte outside the range 0x80-0xBF appeared where a continuation byte was expected.
    InvalidContinuationByte,

    /// A character was encoded using more bytes than necessary.
    /// For example, encoding ASCII 'A' (U+0041) as `C1 81` instead of `41`.
    OverlongEncoding,

    /// A surrogate code point (U+D800-U+DFFF) was encoded.
    SurrogateCodepoint,

    /// A code point above U+10FFFF was encoded.
    OutOfRangeCodepoint,

    /// A multi-byte sequence was truncated at the end of input.
    TruncatedSequence,
}

impl core::fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
        }
    }
}

/// A code point that has no UTF-8 (or UTF-16) encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncodeError {
    /// The value is above U+10FFFF.
    OutOfRange(u32),
    /// The value is a surrogate (U+D800-U+DFFF).
    Surrogate(u32),
}

impl EncodeError {
    /// The rejected value.
    pub fn code_point(&self) -> u32 {
        match *self {
            Self::OutOfRange(cp) | Self::Surrogate(cp) => cp,
        }
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange(cp) => write!(f, "code point 0x{:X} is above U+10FFFF", cp),
            Self::Surrogate(cp) => write!(f, "code point U+{:04X} is a surrogate", cp),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

// =============================================================================
// Code point classification
// =============================================================================

/// Whether `cp` is a surrogate (U+D800-U+DFFF).
#[inline]
pub fn is_surrogate(cp: u32) -> bool {
    (SURROGATE_START..SURROGATE_END).contains(&cp)
}

/// Whether `cp` is a Unicode scalar value, i.e. encodable as UTF-8.
#[inline]
pub fn is_valid_code_point(cp: u32) -> bool {
    cp <= MAX_UNICODE && !is_surrogate(cp)
}

/// Check that `cp` is encodable.
#[inline]
pub fn check_code_point(cp: u32) -> Result<(), EncodeError> {
    if cp > MAX_UNICODE {
        Err(EncodeError::OutOfRange(cp))
    } else if is_surrogate(cp) {
        Err(EncodeError::Surrogate(cp))
    } else {
        Ok(())
    }
}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length(lead_byte: u8) -> usize {
    table::lead_length(lead_byte)
}

// =============================================================================
// Encoder
// =============================================================================

/// Encode a Unicode code point as UTF-8.
///
/// Returns `None` if the code point is invalid (surrogate or > U+10FFFF).
/// On success, returns the UTF-8 bytes and the number of bytes used.
///
/// # Examples
///
/// ```
/// use utf8kit::text::utf8::encode_code_point;
///
/// // ASCII
/// let (bytes, len) = encode_code_point(0x41).unwrap();
/// assert_eq!(&bytes[..len], b"A");
///
/// // 4-byte character (🎉)
/// let (bytes, len) = encode_code_point(0x1F389).unwrap();
/// assert_eq!(&bytes[..len], "🎉".as_bytes());
///
/// // Invalid: surrogate
/// assert!(encode_code_point(0xD800).is_none());
/// ```
pub fn encode_code_point(cp: u32) -> Option<([u8; 4], usize)> {
    if !is_valid_code_point(cp) {
        return None;
    }
    Some((encode_unchecked(cp), encoded_len(cp)))
}

/// Write the shortest encoding of `cp` into the front of a 4-byte buffer.
/// `cp` must already be a valid code point.
#[inline]
fn encode_unchecked(cp: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    let len = encoded_len(cp);
    if len == 1 {
        buf[0] = cp as u8;
        return buf;
    }

    let (marker, payload) = lead_masks(len);
    let mut shift = lead_shift(len);
    buf[0] = marker | (payload & (cp >> shift) as u8);
    for slot in &mut buf[1..len] {
        shift -= CONTINUATION_BITS;
        *slot = CONTINUATION_TAG | (CONTINUATION_PAYLOAD_MASK & (cp >> shift) as u8);
    }
    buf
}

/// Encode `cp`, appending its bytes to `dst`.
///
/// Returns the number of bytes appended. On error nothing is written.
///
/// ```
/// use utf8kit::text::utf8::encode_into;
///
/// let mut out = b"price: ".to_vec();
/// assert_eq!(encode_into(0x20AC, &mut out), Ok(3));
/// assert_eq!(out, "price: €".as_bytes());
/// assert!(encode_into(0x110000, &mut out).is_err());
/// assert_eq!(out, "price: €".as_bytes());
/// ```
pub fn encode_into(cp: u32, dst: &mut Vec<u8>) -> Result<usize, EncodeError> {
    check_code_point(cp)?;
    let len = encoded_len(cp);
    dst.extend_from_slice(&encode_unchecked(cp)[..len]);
    Ok(len)
}

/// Encode `cp` into a freshly allocated buffer.
pub fn encode(cp: u32) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(4);
    encode_into(cp, &mut out)?;
    Ok(out)
}

// =============================================================================
// Decoder
// =============================================================================

/// Decode the code point whose encoding starts at `*cursor`.
///
/// On success, `*cursor` is left one byte past the consumed sequence.
/// On failure `*cursor` is partially advanced: past the lead byte, and past
/// the declared trailing bytes when the input held all of them. Callers that
/// need the error position must remember the offset they started from.
///
/// A cursor at or past the end of `input` reports
/// [`Utf8ErrorKind::TruncatedSequence`] without moving.
///
/// # Examples
///
/// ```
/// use utf8kit::text::utf8::decode_step;
///
/// let input = "A€".as_bytes();
/// let mut cursor = 0;
/// assert_eq!(decode_step(input, &mut cursor), Ok(0x41));
/// assert_eq!(cursor, 1);
/// assert_eq!(decode_step(input, &mut cursor), Ok(0x20AC));
/// assert_eq!(cursor, 4);
/// ```
pub fn decode_step(input: &[u8], cursor: &mut usize) -> Result<u32, Utf8ErrorKind> {
    let start = *cursor;
    let lead = match input.get(start) {
        Some(&byte) => byte,
        None => return Err(Utf8ErrorKind::TruncatedSequence),
    };
    *cursor += 1;

    if (lead as u32) <= MAX_ASCII {
        return Ok(lead as u32);
    }

    let len = table::lead_length(lead);
    if len < 2 {
        return Err(Utf8ErrorKind::InvalidLeadByte);
    }
    if input.len() - start < len {
        return Err(Utf8ErrorKind::TruncatedSequence);
    }

    let (_, payload) = lead_masks(len);
    let mut shift = lead_shift(len);
    let mut cp = ((lead & payload) as u32) << shift;
    let mut malformed = false;

    while shift > 0 {
        let byte = input[*cursor];
        *cursor += 1;
        shift -= CONTINUATION_BITS;
        cp |= ((byte & CONTINUATION_PAYLOAD_MASK) as u32) << shift;
        malformed |= !is_continuation_byte(byte);
    }

    if malformed {
        return Err(Utf8ErrorKind::InvalidContinuationByte);
    }
    // Also catches sequences that assemble into the ASCII range.
    if encoded_len(cp) != len {
        return Err(Utf8ErrorKind::OverlongEncoding);
    }
    if cp > MAX_UNICODE {
        return Err(Utf8ErrorKind::OutOfRangeCodepoint);
    }
    if is_surrogate(cp) {
        return Err(Utf8ErrorKind::SurrogateCodepoint);
    }

    Ok(cp)
}

/// Decode a UTF-8 code point from the start of a byte slice.
///
/// Returns `None` if the input is empty or starts with an invalid sequence.
/// On success, returns the decoded code point and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use utf8kit::text::utf8::decode_code_point;
///
/// assert_eq!(decode_code_point(b"A"), Some(('A' as u32, 1)));
/// assert_eq!(decode_code_point("日".as_bytes()), Some((0x65E5, 3)));
/// assert_eq!(decode_code_point(b""), None);
/// ```
pub fn decode_code_point(input: &[u8]) -> Option<(u32, usize)> {
    let mut cursor = 0;
    decode_step(input, &mut cursor).ok().map(|cp| (cp, cursor))
}

/// Format a byte as a human-readable string for error messages.
pub fn format_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        alloc::format!("0x{:02X} ({:?})", byte, byte as char)
    } else {
        alloc::format!("0x{:02X}", byte)
    }
}
