//! ASCII-only case conversion.
//!
//! Only bytes `A-Z` and `a-z` change. Bytes of multi-byte UTF-8 sequences are
//! all `>= 0x80`, so they never fall in those ranges and pass through intact.

const CASE_OFFSET: u8 = b'a' - b'A';

/// Convert ASCII uppercase letters in `buf` to lowercase, in place.
///
/// ```
/// use utf8kit::text::case::ascii_lower;
///
/// let mut buf = "CAFÉ".as_bytes().to_vec();
/// ascii_lower(&mut buf);
/// assert_eq!(buf, "cafÉ".as_bytes());
/// ```
#[inline]
pub fn ascii_lower(buf: &mut [u8]) {
    for byte in buf {
        if byte.is_ascii_uppercase() {
            *byte += CASE_OFFSET;
        }
    }
}

/// Convert ASCII lowercase letters in `buf` to uppercase, in place.
#[inline]
pub fn ascii_upper(buf: &mut [u8]) {
    for byte in buf {
        if byte.is_ascii_lowercase() {
            *byte -= CASE_OFFSET;
        }
    }
}
