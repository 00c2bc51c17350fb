//! # utf8kit
//!
//! Strict UTF-8 encoding, decoding, validation and code-point indexing.
//!
//! Malformed input never panics: every failure is a return value, and
//! validation reports the exact byte offset of the first malformed sequence.
//!
//! ## Module Organization
//!
//! - [`table`] - Lead-byte lookup table and per-length bit arithmetic
//! - [`text::utf8`] - Encoder, single-step decoder and error types
//! - [`text::sequence`] - Validate, decode, count, `char_at`, `next_char`
//! - [`text::case`] - ASCII-only case conversion
//! - `text::utf16` - UTF-16 bridge (Windows, or the `utf16` feature)
//!
//! ## Quick Start
//!
//! ```
//! use utf8kit::{char_at, char_count, decode, encode, next_char, validate};
//!
//! let input = "A€".as_bytes();
//! assert!(validate(input).is_ok());
//! assert_eq!(decode(input).unwrap(), vec![0x41, 0x20AC]);
//! assert_eq!(char_count(input).unwrap(), 2);
//! assert_eq!(char_at(input, 1), Some(0x20AC));
//!
//! let mut cursor = 0;
//! assert_eq!(next_char(input, &mut cursor), Some(0x41));
//! assert_eq!(cursor, 1);
//!
//! assert_eq!(encode(0x20AC).unwrap(), vec![0xE2, 0x82, 0xAC]);
//! assert!(encode(0xD800).is_err());
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` impls for the error types
//! - `serde` - Serialization/deserialization of the error types
//! - `utf16` - UTF-16 bridge on non-Windows targets
//! - `cli` - The `utf8kit` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Lookup tables for lead-byte classification and sequence bit layout.
pub mod table;

/// UTF-8 codec, sequence operations and ASCII case conversion.
pub mod text;

// =============================================================================
// Public re-exports
// =============================================================================

pub use text::case::{ascii_lower, ascii_upper};
pub use text::sequence::{
    char_at, char_count, chars, decode, decode_into, is_ascii, next_char, validate, Chars,
};
pub use text::utf8::{
    encode, encode_into, EncodeError, Utf8Error, Utf8ErrorKind, BAD_CHAR, MAX_ASCII, MAX_BMP,
    MAX_UNICODE, SURROGATE_END, SURROGATE_START,
};

#[cfg(any(windows, feature = "utf16"))]
pub use text::utf16::{encode_utf16, utf16_to_utf8, utf8_to_utf16, Utf16Error, Utf16ErrorKind};
