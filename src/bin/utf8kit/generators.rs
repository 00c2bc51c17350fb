//! UTF-8 text generators for benchmarking and testing.
//!
//! Text is built by drawing code points from per-pattern ranges and encoding
//! them with the library encoder, so the output is valid UTF-8 unless an
//! invalid byte is planted afterwards.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use utf8kit::table::{encoded_len, is_continuation_byte};
use utf8kit::text::utf8::encode_into;

/// Pattern types for UTF-8 text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Pattern {
    /// Printable ASCII (single-byte sequences)
    Ascii,
    /// Latin-1 supplement and Latin Extended-A (2-byte sequences)
    Latin,
    /// Greek and Cyrillic (2-byte sequences)
    GreekCyrillic,
    /// CJK unified ideographs (3-byte sequences)
    Cjk,
    /// Emoji (4-byte sequences)
    Emoji,
    /// Mostly ASCII with occasional multi-byte characters
    Mixed,
    /// Uniform mix of all sequence lengths (1-4 bytes)
    AllLengths,
    /// Maximum multi-byte density across all supplementary planes
    Pathological,
}

/// Configuration for text generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Exact size of the output in bytes.
    pub size: usize,
    /// Which characters to draw from.
    pub pattern: Utf8Pattern,
    /// RNG seed (default: 0, so output is reproducible)
    pub seed: u64,
    /// Newline after roughly this many bytes; 0 disables (default: 80)
    pub line_width: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            size: 1024,
            pattern: Utf8Pattern::Mixed,
            seed: 0,
            line_width: 80,
        }
    }
}

impl GenerateConfig {
    /// Create a configuration for `size` bytes of `pattern` text.
    pub fn new(size: usize, pattern: Utf8Pattern) -> Self {
        Self {
            size,
            pattern,
            ..Self::default()
        }
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the line width.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}

// Inclusive code point ranges per sequence length.
const ONE_BYTE: &[(u32, u32)] = &[(0x20, 0x7E)];
const LATIN: &[(u32, u32)] = &[(0xC0, 0xFF), (0x100, 0x17F)];
const GREEK_CYRILLIC: &[(u32, u32)] = &[(0x391, 0x3C9), (0x410, 0x44F)];
const TWO_BYTE: &[(u32, u32)] = &[(0x80, 0x7FF)];
const CJK: &[(u32, u32)] = &[(0x4E00, 0x9FFF)];
const THREE_BYTE: &[(u32, u32)] = &[(0x800, 0xD7FF), (0xE000, 0xFFFF)];
const EMOJI: &[(u32, u32)] = &[(0x1F300, 0x1F5FF), (0x1F600, 0x1F64F), (0x1F680, 0x1F6FF)];
const FOUR_BYTE: &[(u32, u32)] = &[(0x10000, 0x10FFFF)];

fn pick(rng: &mut ChaCha8Rng, ranges: &[(u32, u32)]) -> u32 {
    let (lo, hi) = ranges[rng.gen_range(0..ranges.len())];
    rng.gen_range(lo..=hi)
}

fn next_code_point(rng: &mut ChaCha8Rng, pattern: Utf8Pattern) -> u32 {
    match pattern {
        Utf8Pattern::Ascii => pick(rng, ONE_BYTE),
        Utf8Pattern::Latin => pick(rng, LATIN),
        Utf8Pattern::GreekCyrillic => pick(rng, GREEK_CYRILLIC),
        Utf8Pattern::Cjk => pick(rng, CJK),
        Utf8Pattern::Emoji => pick(rng, EMOJI),
        // Approximately 70% ASCII, 20% 2-byte, 8% 3-byte, 2% 4-byte.
        Utf8Pattern::Mixed => match rng.gen_range(0..100) {
            0..=69 => pick(rng, ONE_BYTE),
            70..=89 => pick(rng, LATIN),
            90..=97 => pick(rng, CJK),
            _ => pick(rng, EMOJI),
        },
        Utf8Pattern::AllLengths => match rng.gen_range(0..4) {
            0 => pick(rng, ONE_BYTE),
            1 => pick(rng, TWO_BYTE),
            2 => pick(rng, THREE_BYTE),
            _ => pick(rng, FOUR_BYTE),
        },
        Utf8Pattern::Pathological => pick(rng, FOUR_BYTE),
    }
}

/// Generate exactly `config.size` bytes of valid UTF-8.
///
/// When the next character would overflow the target size, the remainder is
/// padded with spaces.
pub fn generate_utf8(config: &GenerateConfig) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut result = Vec::with_capacity(config.size);
    let mut line_len = 0;

    while result.len() < config.size {
        if config.line_width > 0 && line_len >= config.line_width {
            result.push(b'\n');
            line_len = 0;
            continue;
        }

        let cp = next_code_point(&mut rng, config.pattern);
        if result.len() + encoded_len(cp) > config.size {
            break;
        }
        let encoded = encode_into(cp, &mut result);
        debug_assert!(encoded.is_ok(), "generator drew U+{:04X}", cp);
        line_len += encoded.unwrap_or(0);
    }

    result.resize(config.size, b' ');
    result
}

/// Corrupt the sequence that covers byte `offset`.
///
/// The lead byte of that sequence is replaced with `0xFF`, which never
/// appears in UTF-8. Returns the offset actually corrupted (the start of the
/// sequence), or `None` if `offset` is out of bounds.
pub fn plant_invalid_byte(text: &mut [u8], offset: usize) -> Option<usize> {
    if offset >= text.len() {
        return None;
    }
    let mut start = offset;
    while start > 0 && is_continuation_byte(text[start]) {
        start -= 1;
    }
    text[start] = 0xFF;
    Some(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utf8kit::text::utf8::Utf8ErrorKind;

    const ALL_PATTERNS: [Utf8Pattern; 8] = [
        Utf8Pattern::Ascii,
        Utf8Pattern::Latin,
        Utf8Pattern::GreekCyrillic,
        Utf8Pattern::Cjk,
        Utf8Pattern::Emoji,
        Utf8Pattern::Mixed,
        Utf8Pattern::AllLengths,
        Utf8Pattern::Pathological,
    ];

    #[test]
    fn test_all_patterns_valid_and_exact_size() {
        for pattern in ALL_PATTERNS {
            for size in [0, 1, 3, 100, 4096] {
                let text = generate_utf8(&GenerateConfig::new(size, pattern));
                assert_eq!(text.len(), size, "{:?} {}", pattern, size);
                assert!(utf8kit::validate(&text).is_ok(), "{:?} {}", pattern, size);
            }
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let config = GenerateConfig::new(512, Utf8Pattern::AllLengths).with_seed(42);
        assert_eq!(generate_utf8(&config), generate_utf8(&config));
        let other = config.clone().with_seed(43);
        assert_ne!(generate_utf8(&config), generate_utf8(&other));
    }

    #[test]
    fn test_ascii_pattern_is_ascii() {
        let text = generate_utf8(&GenerateConfig::new(1000, Utf8Pattern::Ascii));
        assert!(utf8kit::is_ascii(&text));
    }

    #[test]
    fn test_line_width() {
        let config = GenerateConfig::new(400, Utf8Pattern::Ascii).with_line_width(40);
        let text = generate_utf8(&config);
        for line in text.split(|&b| b == b'\n') {
            assert!(line.len() <= 40);
        }

        let unwrapped = generate_utf8(&config.with_line_width(0));
        assert!(!unwrapped.contains(&b'\n'));
    }

    #[test]
    fn test_plant_invalid_byte_moves_to_sequence_start() {
        let mut text = "ab€cd".as_bytes().to_vec();
        // Offset 3 is the second byte of the euro sign.
        assert_eq!(plant_invalid_byte(&mut text, 3), Some(2));
        let err = utf8kit::validate(&text).unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
    }

    #[test]
    fn test_plant_invalid_byte_out_of_bounds() {
        let mut text = b"abc".to_vec();
        assert_eq!(plant_invalid_byte(&mut text, 3), None);
        assert_eq!(text, b"abc");
    }
}
