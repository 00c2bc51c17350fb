//! Text processing: UTF-8 codec, sequence operations and case conversion.
//!
//! ## UTF-8
//!
//! The [`utf8`] module encodes code points and decodes a single sequence at a
//! time. The [`sequence`] module builds whole-buffer operations on top of it:
//! validation with detailed error reporting (byte offset, line and column),
//! decoding, counting and code-point-indexed access.
//!
//! ```
//! use utf8kit::text::{validate, Utf8ErrorKind};
//!
//! // Valid UTF-8
//! assert!(validate(b"Hello, world!").is_ok());
//! assert!(validate("日本語".as_bytes()).is_ok());
//!
//! // Invalid UTF-8 (bare continuation byte)
//! let err = validate(&[0x80]).unwrap_err();
//! assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
//! assert_eq!(err.offset, 0);
//! ```

pub mod case;
pub mod sequence;
pub mod utf8;

#[cfg(any(windows, feature = "utf16"))]
pub mod utf16;

// Re-export commonly used types
pub use case::{ascii_lower, ascii_upper};
pub use sequence::{
    char_at, char_count, chars, decode, decode_into, is_ascii, next_char, validate, Chars,
};
pub use utf8::{
    decode_step, encode, encode_code_point, encode_into, EncodeError, Utf8Error, Utf8ErrorKind,
    BAD_CHAR, MAX_ASCII, MAX_BMP, MAX_UNICODE, SURROGATE_END, SURROGATE_START,
};

#[cfg(any(windows, feature = "utf16"))]
pub use utf16::{encode_utf16, utf16_to_utf8, utf8_to_utf16, Utf16Error, Utf16ErrorKind};
