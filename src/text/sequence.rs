//! Whole-buffer operations built on the single-step decoder.
//!
//! Every function here walks the input with [`decode_step`] from offset 0 and
//! stops at the first malformed sequence. There is no resynchronisation and
//! no partial result: callers that want the valid prefix use
//! [`Utf8Error::valid_up_to`], or iterate with [`next_char`] / [`chars`] and
//! keep their own last-known-good offset.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use super::utf8::{decode_step, Utf8Error, MAX_ASCII};

/// Decode every code point, handing each to `on_decoded` in order.
pub(crate) fn decode_all_with<F>(input: &[u8], mut on_decoded: F) -> Result<(), Utf8Error>
where
    F: FnMut(u32),
{
    let mut cursor = 0;
    while cursor < input.len() {
        let start = cursor;
        match decode_step(input, &mut cursor) {
            Ok(cp) => on_decoded(cp),
            Err(kind) => return Err(Utf8Error::new(input, start, kind)),
        }
    }
    Ok(())
}

/// Validate that the input is valid UTF-8.
///
/// Returns `Ok(())` if the input is valid UTF-8 (an empty input is valid), or
/// an `Err(Utf8Error)` describing the first malformed sequence.
///
/// # Examples
///
/// ```
/// use utf8kit::text::sequence::validate;
/// use utf8kit::text::utf8::Utf8ErrorKind;
///
/// assert!(validate(b"Hello, world!").is_ok());
/// assert!(validate("日本語".as_bytes()).is_ok());
///
/// // Truncated sequence: reported at the start of the sequence
/// let err = validate(&[b'a', 0xE2, 0x82]).unwrap_err();
/// assert_eq!(err.kind, Utf8ErrorKind::TruncatedSequence);
/// assert_eq!(err.offset, 1);
/// ```
pub fn validate(input: &[u8]) -> Result<(), Utf8Error> {
    decode_all_with(input, |_| {})
}

/// Decode all code points of `input`.
///
/// ```
/// use utf8kit::text::sequence::decode;
///
/// assert_eq!(decode("A€".as_bytes()).unwrap(), vec![0x41, 0x20AC]);
/// assert!(decode(&[0xC0, 0x80]).is_err());
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<u32>, Utf8Error> {
    let mut codes = Vec::new();
    decode_into(input, &mut codes)?;
    Ok(codes)
}

/// Decode all code points of `input`, appending them to `dst`.
///
/// Returns the number of code points appended. On failure `dst` is restored
/// to its original length.
pub fn decode_into(input: &[u8], dst: &mut Vec<u32>) -> Result<usize, Utf8Error> {
    let original_len = dst.len();
    match decode_all_with(input, |cp| dst.push(cp)) {
        Ok(()) => Ok(dst.len() - original_len),
        Err(err) => {
            dst.truncate(original_len);
            Err(err)
        }
    }
}

/// Count the code points in `input`, failing if it is not valid UTF-8.
pub fn char_count(input: &[u8]) -> Result<usize, Utf8Error> {
    let mut count = 0;
    decode_all_with(input, |_| count += 1)?;
    Ok(count)
}

/// Whether every byte of `input` is ASCII. An empty input is ASCII.
///
/// This inspects raw bytes only and does not run the decoder.
#[inline]
pub fn is_ascii(input: &[u8]) -> bool {
    input.iter().all(|&b| (b as u32) <= MAX_ASCII)
}

/// Return the `index`-th code point (0-indexed).
///
/// Returns `None` if `input` holds fewer than `index + 1` code points or if a
/// malformed sequence occurs at or before that position. At most
/// `index + 1` code points are decoded, so the remainder of the input may
/// still be malformed.
///
/// ```
/// use utf8kit::text::sequence::char_at;
///
/// let input = [b'A', 0xE2, 0x82, 0xAC, 0xFF];
/// assert_eq!(char_at(&input, 1), Some(0x20AC));
/// assert_eq!(char_at(&input, 2), None);
/// ```
pub fn char_at(input: &[u8], index: usize) -> Option<u32> {
    chars(input).nth(index)?.ok()
}

/// Decode the code point whose encoding starts at `*cursor`.
///
/// Returns `None` at end of input or on a malformed sequence. On success
/// `*cursor` is advanced one byte past the code point; on failure it is
/// partially advanced and must not be reused, so callers that report the
/// error position keep the offset from before the call.
///
/// ```
/// use utf8kit::text::sequence::next_char;
///
/// let input = "A€".as_bytes();
/// let mut cursor = 0;
/// assert_eq!(next_char(input, &mut cursor), Some(0x41));
/// assert_eq!(cursor, 1);
/// assert_eq!(next_char(input, &mut cursor), Some(0x20AC));
/// assert_eq!(cursor, 4);
/// assert_eq!(next_char(input, &mut cursor), None);
/// ```
#[inline]
pub fn next_char(input: &[u8], cursor: &mut usize) -> Option<u32> {
    if *cursor < input.len() {
        decode_step(input, cursor).ok()
    } else {
        None
    }
}

/// Iterate over the code points of `input`.
pub fn chars(input: &[u8]) -> Chars<'_> {
    Chars {
        input,
        offset: 0,
        failed: false,
    }
}

/// Iterator over the code points of a byte slice.
///
/// Yields `Ok(code_point)` for each valid sequence. The first malformed
/// sequence yields one `Err` and ends iteration.
#[derive(Debug, Clone)]
pub struct Chars<'a> {
    input: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Chars<'a> {
    /// Byte offset just past the last successfully decoded code point.
    ///
    /// After an error this is the offset of the malformed sequence.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }
}

impl Iterator for Chars<'_> {
    type Item = Result<u32, Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.input.len() {
            return None;
        }

        let mut cursor = self.offset;
        match decode_step(self.input, &mut cursor) {
            Ok(cp) => {
                self.offset = cursor;
                Some(Ok(cp))
            }
            Err(kind) => {
                self.failed = true;
                Some(Err(Utf8Error::new(self.input, self.offset, kind)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        // Malformed input ends iteration after a single `Err`.
        let remaining = self.input.len() - self.offset;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Chars<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::utf8::{encode_into, Utf8ErrorKind};

    // =========================================================================
    // Validation Tests
    // =========================================================================

    mod validation {
        use super::*;

        #[test]
        fn empty_input() {
            assert!(validate(b"").is_ok());
        }

        #[test]
        fn mixed_sequences() {
            assert!(validate("A é 日 🎉".as_bytes()).is_ok());
            assert!(validate("Hello! 你好 مرحبا 🌍🚀 Ñoño café".as_bytes()).is_ok());
        }

        #[test]
        fn bare_continuation() {
            let err = validate(&[b'A', 0x80]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
            assert_eq!(err.offset, 1);
        }

        #[test]
        fn overlong_null() {
            let err = validate(&[0xC0, 0x80]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::OverlongEncoding);
            assert_eq!(err.offset, 0);
        }

        #[test]
        fn truncated_reports_sequence_start() {
            let err = validate(&[0xE2, 0x82]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::TruncatedSequence);
            assert_eq!(err.offset, 0);
        }

        #[test]
        fn bad_continuation_reports_sequence_start() {
            let err = validate(&[b'x', b'y', 0xF0, 0x90, b'A', 0x80]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
            assert_eq!(err.offset, 2);
        }

        #[test]
        fn surrogate_in_middle_of_valid() {
            let mut input = Vec::from(&b"Hello "[..]);
            input.extend_from_slice(&[0xED, 0xA0, 0x80]); // U+D800
            input.extend_from_slice(b" world");

            let err = validate(&input).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint);
            assert_eq!(err.offset, 6);
        }

        #[test]
        fn idempotent() {
            let inputs: [&[u8]; 3] = [b"plain", &[0xE2, 0x82], "€uro".as_bytes()];
            for input in inputs {
                assert_eq!(validate(input), validate(input));
            }
        }

        #[test]
        fn stops_at_first_error() {
            let err = validate(&[0xFF, 0xC0, 0x80]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
            assert_eq!(err.offset, 0);
        }
    }

    // =========================================================================
    // Error Position Tests
    // =========================================================================

    mod error_positions {
        use super::*;

        #[test]
        fn line_and_column_first_byte() {
            let err = validate(&[0x80]).unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (0, 1, 1));
        }

        #[test]
        fn line_and_column_second_line() {
            let err = validate(b"Hello\nWorld\x80").unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (11, 2, 6));
        }

        #[test]
        fn line_and_column_after_multibyte() {
            let mut input = "日本".as_bytes().to_vec();
            input.push(0x80);
            let err = validate(&input).unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (6, 1, 7));
        }

        #[test]
        fn multiple_newlines() {
            let err = validate(b"\n\n\n\n\x80").unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (4, 5, 1));
        }

        #[test]
        fn display() {
            let err = validate(b"ab\xC2").unwrap_err();
            assert_eq!(
                err.to_string(),
                "truncated UTF-8 sequence at byte 2, line 1, column 3"
            );
        }
    }

    // =========================================================================
    // Decode / Count Tests
    // =========================================================================

    mod decode_and_count {
        use super::*;

        #[test]
        fn decode_euro_example() {
            let input = [0x41, 0xE2, 0x82, 0xAC];
            assert_eq!(decode(&input).unwrap(), vec![0x41, 0x20AC]);
            assert_eq!(char_count(&input).unwrap(), 2);
        }

        #[test]
        fn decode_empty() {
            assert_eq!(decode(b"").unwrap(), Vec::<u32>::new());
            assert_eq!(char_count(b"").unwrap(), 0);
        }

        #[test]
        fn decode_matches_std_chars() {
            let s = "Mixed: café 日本 🎉\n";
            let expected: Vec<u32> = s.chars().map(u32::from).collect();
            assert_eq!(decode(s.as_bytes()).unwrap(), expected);
            assert_eq!(char_count(s.as_bytes()).unwrap(), s.chars().count());
        }

        #[test]
        fn decode_into_appends() {
            let mut dst = vec![7];
            assert_eq!(decode_into("é€".as_bytes(), &mut dst).unwrap(), 2);
            assert_eq!(dst, vec![7, 0xE9, 0x20AC]);
        }

        #[test]
        fn decode_grows_with_output() {
            // 256 four-byte sequences decode to 256 code points.
            let input = "🎉".repeat(256);
            let codes = decode(input.as_bytes()).unwrap();
            assert_eq!(codes.len(), 256);
            assert!(codes.capacity() < input.len());
        }

        #[test]
        fn decode_into_failure_keeps_original() {
            let mut dst = vec![7];
            let err = decode_into(&[b'a', b'b', 0xC3], &mut dst).unwrap_err();
            assert_eq!(err.offset, 2);
            assert_eq!(dst, vec![7]);
        }

        #[test]
        fn decode_failure_is_whole() {
            assert!(decode(&[b'a', 0xED, 0xA0, 0x80]).is_err());
            assert!(char_count(&[b'a', 0xED, 0xA0, 0x80]).is_err());
        }

        #[test]
        fn roundtrip_through_encoder() {
            let cps = [0x00, 0x7F, 0x80, 0x7FF, 0x800, 0xFFFF, 0x10000, 0x10FFFF];
            let mut bytes = Vec::new();
            for cp in cps {
                encode_into(cp, &mut bytes).unwrap();
            }
            assert_eq!(decode(&bytes).unwrap(), cps.to_vec());
        }
    }

    // =========================================================================
    // ASCII Tests
    // =========================================================================

    mod ascii {
        use super::*;

        #[test]
        fn ascii_only() {
            assert!(is_ascii(b""));
            assert!(is_ascii(b"Hello\x00\x7F"));
            assert!(!is_ascii("é".as_bytes()));
            assert!(!is_ascii(&[0x80]));
        }

        #[test]
        fn agrees_with_validate_on_ascii() {
            let input: Vec<u8> = (0x00..=0x7F).collect();
            assert!(is_ascii(&input));
            assert!(validate(&input).is_ok());
            assert_eq!(char_count(&input).unwrap(), input.len());
        }

        #[test]
        fn ascii_check_ignores_decoder_rules() {
            // Not ASCII, but still valid UTF-8.
            assert!(!is_ascii("ü".as_bytes()));
            assert!(validate("ü".as_bytes()).is_ok());
        }
    }

    // =========================================================================
    // Random Access and Iteration Tests
    // =========================================================================

    mod random_access {
        use super::*;

        #[test]
        fn char_at_euro_example() {
            let input = "A€".as_bytes();
            assert_eq!(char_at(input, 0), Some(0x41));
            assert_eq!(char_at(input, 1), Some(0x20AC));
            assert_eq!(char_at(input, 2), None);
        }

        #[test]
        fn char_at_ignores_trailing_garbage() {
            let input = [b'a', b'b', 0xFF, 0xFE];
            assert_eq!(char_at(&input, 1), Some(b'b' as u32));
            assert_eq!(char_at(&input, 2), None);
            assert_eq!(char_at(&input, 3), None);
        }

        #[test]
        fn char_at_fails_on_earlier_error() {
            let input = [0xC0, 0x80, b'a'];
            assert_eq!(char_at(&input, 0), None);
            assert_eq!(char_at(&input, 1), None);
        }

        #[test]
        fn next_char_walk() {
            let input = [0x41, 0xE2, 0x82, 0xAC];
            let mut cursor = 0;
            assert_eq!(next_char(&input, &mut cursor), Some(0x41));
            assert_eq!(cursor, 1);
            assert_eq!(next_char(&input, &mut cursor), Some(0x20AC));
            assert_eq!(cursor, 4);
            assert_eq!(next_char(&input, &mut cursor), None);
            assert_eq!(cursor, 4);
        }

        #[test]
        fn next_char_failure() {
            let input = [b'a', 0xE2, 0x82];
            let mut cursor = 1;
            assert_eq!(next_char(&input, &mut cursor), None);
            assert!(cursor > 1);
        }

        #[test]
        fn independent_cursors() {
            let input = "αβγ".as_bytes();
            let (mut a, mut b) = (0, 0);
            assert_eq!(next_char(input, &mut a), Some(0x3B1));
            assert_eq!(next_char(input, &mut a), Some(0x3B2));
            assert_eq!(next_char(input, &mut b), Some(0x3B1));
            assert_eq!((a, b), (4, 2));
        }

        #[test]
        fn chars_iterator() {
            let collected: Result<Vec<u32>, _> = chars("a🎉".as_bytes()).collect();
            assert_eq!(collected.unwrap(), vec![0x61, 0x1F389]);
        }

        #[test]
        fn chars_fuses_after_error() {
            let input = [b'a', 0x80, b'b'];
            let mut iter = chars(&input);
            assert_eq!(iter.next(), Some(Ok(0x61)));
            let err = iter.next().unwrap().unwrap_err();
            assert_eq!(err.offset, 1);
            assert_eq!(iter.offset(), 1);
            assert_eq!(iter.remaining(), &[0x80, b'b']);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.size_hint(), (0, Some(0)));
        }

        #[test]
        fn chars_size_hint() {
            let iter = chars(b"abcdefgh");
            assert_eq!(iter.size_hint(), (1, Some(8)));
            assert_eq!(chars(b"").size_hint(), (0, Some(0)));
        }

        #[test]
        fn chars_size_hint_bounds_early_failure() {
            let input = [0x80u8; 8];
            let (lower, upper) = chars(&input).size_hint();
            let count = chars(&input).count();
            assert_eq!(count, 1);
            assert!(lower <= count);
            assert!(upper.map_or(true, |upper| count <= upper));
        }
    }
}
