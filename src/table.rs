//! Precomputed lookup tables and bit arithmetic for UTF-8 sequences.
//!
//! The `SEQUENCE_LENGTH_TABLE` classifies a lead byte by its top five bits,
//! giving the total length of the sequence it starts. The remaining helpers
//! compute, for a given sequence length, the lead-byte marker and payload
//! mask and the shift applied to the lead byte's payload.
//!
//! | Length | Lead byte  | Marker | Payload mask | Lead shift |
//! |--------|------------|--------|--------------|------------|
//! | 1      | `0xxxxxxx` | `0x00` | `0x7F`       | 0          |
//! | 2      | `110xxxxx` | `0xC0` | `0x1F`       | 6          |
//! | 3      | `1110xxxx` | `0xE0` | `0x0F`       | 12         |
//! | 4      | `11110xxx` | `0xF0` | `0x07`       | 18         |

/// Tag bits of a continuation byte (`10xxxxxx`).
pub const CONTINUATION_TAG: u8 = 0x80;

/// Mask selecting the tag bits of a continuation byte.
pub const CONTINUATION_TAG_MASK: u8 = 0xC0;

/// Mask selecting the six payload bits of a continuation byte.
pub const CONTINUATION_PAYLOAD_MASK: u8 = 0x3F;

/// Number of payload bits carried by each continuation byte.
pub const CONTINUATION_BITS: u32 = 6;

/// Lookup table for lead-byte classification.
///
/// `SEQUENCE_LENGTH_TABLE[lead >> 3]` is the total number of bytes in the
/// sequence started by `lead`, or 0 if `lead` cannot start a sequence.
///
/// ```text
/// 0xxxxxxx >> 3 -> [0, 15]   1 byte
/// 10xxxxxx >> 3 -> [16, 23]  continuation, invalid as lead
/// 110xxxxx >> 3 -> [24, 27]  2 bytes
/// 1110xxxx >> 3 -> [28, 29]  3 bytes
/// 11110xxx >> 3 -> 30        4 bytes
/// 11111xxx >> 3 -> 31        invalid
/// ```
pub static SEQUENCE_LENGTH_TABLE: [u8; 32] = {
    let mut table = [0u8; 32];
    let mut index = 0usize;
    while index < 32 {
        table[index] = match index {
            0..=15 => 1,
            24..=27 => 2,
            28..=29 => 3,
            30 => 4,
            _ => 0,
        };
        index += 1;
    }
    table
};

/// Get the sequence length declared by a lead byte.
///
/// Returns 0 for bytes that cannot start a sequence (continuation bytes and
/// `0xF8..=0xFF`).
#[inline]
pub fn lead_length(lead: u8) -> usize {
    SEQUENCE_LENGTH_TABLE[(lead >> 3) as usize] as usize
}

/// Number of bytes in the shortest encoding of `cp`.
///
/// Does not check validity: surrogates report 3 and anything above
/// U+FFFF reports 4.
#[inline]
pub fn encoded_len(cp: u32) -> usize {
    if cp <= 0x7F {
        return 1;
    }
    2 + (cp > 0x7FF) as usize + (cp > 0xFFFF) as usize
}

/// Lead-byte marker and payload mask for a multi-byte sequence of `len`
/// bytes (2, 3 or 4).
///
/// The marker is the sign-extended shift of `0xC0`, so each extra byte adds
/// one more high bit to the marker and removes one from the mask.
#[inline]
pub fn lead_masks(len: usize) -> (u8, u8) {
    debug_assert!((2..=4).contains(&len));
    let extra = (len - 2) as u32;
    let marker = ((0xC0u8 as i8) >> extra) as u8;
    let payload = 0x1Fu8 >> extra;
    (marker, payload)
}

/// Left shift applied to the lead byte's payload in a sequence of `len`
/// bytes.
#[inline]
pub fn lead_shift(len: usize) -> u32 {
    (len as u32 - 1) * CONTINUATION_BITS
}

/// Check if a byte is a continuation byte (`10xxxxxx`).
#[inline(always)]
pub fn is_continuation_byte(byte: u8) -> bool {
    (byte & CONTINUATION_TAG_MASK) == CONTINUATION_TAG
}
