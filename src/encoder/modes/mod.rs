//! QR code data mode encoders
//!
//! This module contains encoders for the supported QR data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Upper-case letters, digits, and nine symbols
//! - Byte: 8-bit data (ISO-8859-1 text or raw bytes)
//!
//! Kanji and ECI segments are not produced.

/// Alphanumeric mode, 11 bits per character pair
pub mod alphanumeric;
/// Byte mode, ISO-8859-1 text or raw octets
pub mod byte;
/// Numeric mode, 10 bits per three digits
pub mod numeric;

pub use alphanumeric::AlphanumericEncoder;
pub use byte::ByteEncoder;
pub use numeric::NumericEncoder;

use crate::coding::BitStream;
use crate::error::Result;
use crate::models::Version;

/// Segment encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits only
    Numeric,
    /// 0-9, A-Z and ` $%*+-./:`
    Alphanumeric,
    /// Arbitrary octets
    Byte,
}

impl Mode {
    /// Four-bit mode indicator
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for a version
    pub fn count_bits(self, version: Version) -> usize {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
        };
        widths[version.count_tier()]
    }

    /// Lower-case mode name
    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
        }
    }
}

/// Pick the densest mode that can carry `text`
///
/// Numeric beats alphanumeric beats byte. Text with characters beyond
/// ISO-8859-1 would need Kanji or ECI and is rejected.
pub fn select_mode(text: &str) -> Result<Mode> {
    if NumericEncoder::accepts(text) {
        return Ok(Mode::Numeric);
    }
    if AlphanumericEncoder::accepts(text) {
        return Ok(Mode::Alphanumeric);
    }
    if ByteEncoder::accepts(text) {
        return Ok(Mode::Byte);
    }
    // reports the first character past U+00FF
    ByteEncoder::latin1(text).map(|_| Mode::Byte)
}

/// Payload bits (without header) needed for `count` characters in `mode`
pub fn encoding_length(mode: Mode, count: usize) -> usize {
    match mode {
        Mode::Numeric => NumericEncoder::bit_length(count),
        Mode::Alphanumeric => AlphanumericEncoder::bit_length(count),
        Mode::Byte => 8 * count,
    }
}

/// One encoded run of data in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitStream,
}

impl Segment {
    /// Numeric segment; fails on any non-digit
    pub fn numeric(digits: &str) -> Result<Self> {
        Ok(Self {
            mode: Mode::Numeric,
            char_count: digits.len(),
            data: NumericEncoder::encode(digits)?,
        })
    }

    /// Alphanumeric segment; fails on characters outside the 45-symbol table
    pub fn alphanumeric(text: &str) -> Result<Self> {
        Ok(Self {
            mode: Mode::Alphanumeric,
            char_count: text.chars().count(),
            data: AlphanumericEncoder::encode(text)?,
        })
    }

    /// Byte segment carrying raw bytes
    pub fn bytes(data: &[u8]) -> Self {
        Self {
            mode: Mode::Byte,
            char_count: data.len(),
            data: ByteEncoder::encode(data),
        }
    }

    /// Segment in an explicitly chosen mode
    pub fn with_mode(text: &str, mode: Mode) -> Result<Self> {
        match mode {
            Mode::Numeric => Self::numeric(text),
            Mode::Alphanumeric => Self::alphanumeric(text),
            Mode::Byte => Ok(Self::bytes(&ByteEncoder::latin1(text)?)),
        }
    }

    /// Segment in the mode chosen by [`select_mode`]
    pub fn from_text(text: &str) -> Result<Self> {
        Self::with_mode(text, select_mode(text)?)
    }

    /// Encoding mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters (or bytes) in the segment
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Encoded payload, without mode indicator or count field
    pub fn data(&self) -> &BitStream {
        &self.data
    }

    /// Header plus payload bits at a given version
    pub fn total_bits(&self, version: Version) -> usize {
        4 + self.mode.count_bits(version) + self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_select_mode() {
        assert_eq!(select_mode("0123").unwrap(), Mode::Numeric);
        assert_eq!(select_mode("HELLO WORLD").unwrap(), Mode::Alphanumeric);
        assert_eq!(select_mode("").unwrap(), Mode::Alphanumeric);
        assert_eq!(select_mode("Hello").unwrap(), Mode::Byte);
        assert_eq!(select_mode("café").unwrap(), Mode::Byte);
        assert_eq!(select_mode("ÿ").unwrap(), Mode::Byte);
        assert!(matches!(
            select_mode("abc€"),
            Err(Error::Unencodable { character: '€', mode: "byte" })
        ));
        assert!(matches!(
            select_mode("日本"),
            Err(Error::Unencodable { character: '日', .. })
        ));
    }

    #[test]
    fn test_count_bits() {
        let v1 = Version::new(1).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(Mode::Numeric.count_bits(v1), 10);
        assert_eq!(Mode::Alphanumeric.count_bits(v10), 11);
        assert_eq!(Mode::Byte.count_bits(v10), 16);
        assert_eq!(Mode::Numeric.count_bits(v27), 14);
        assert_eq!(Mode::Byte.count_bits(v27), 16);
    }

    #[test]
    fn test_encoding_length_monotonic() {
        for mode in [Mode::Numeric, Mode::Alphanumeric, Mode::Byte] {
            for count in 0..300 {
                assert!(encoding_length(mode, count) <= encoding_length(mode, count + 1));
            }
        }
    }

    #[test]
    fn test_segment_from_text() {
        let seg = Segment::from_text("HELLO WORLD").unwrap();
        assert_eq!(seg.mode(), Mode::Alphanumeric);
        assert_eq!(seg.char_count(), 11);
        assert_eq!(seg.total_bits(Version::MIN), 4 + 9 + 61);

        let seg = Segment::from_text("é!").unwrap();
        assert_eq!(seg.mode(), Mode::Byte);
        assert_eq!(seg.char_count(), 2);
    }

    #[test]
    fn test_forced_mode_rejects_alphabet() {
        assert!(matches!(
            Segment::with_mode("hello", Mode::Alphanumeric),
            Err(Error::Unencodable { character: 'h', .. })
        ));
    }
}
