//! BCH codes protecting QR format and version information
use crate::models::{ECLevel, MaskPattern, Version};

/// (15,5) generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0b101_0011_0111;
/// XOR applied to every format word so it is never all zero
pub const FORMAT_MASK: u16 = 0b101_0100_0001_0010;
/// (18,6) generator x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

/// Remainder of `value` divided by `generator` as polynomials over GF(2)
pub fn remainder(value: u32, generator: u32) -> u32 {
    let gen_len = 32 - generator.leading_zeros();
    if gen_len == 0 {
        return value;
    }
    let mut rem = value;
    while 32 - rem.leading_zeros() >= gen_len {
        let shift = (32 - rem.leading_zeros()) - gen_len;
        rem ^= generator << shift;
    }
    rem
}

/// Systematic codeword: `data` followed by its remainder bits
pub fn encode(data: u32, generator: u32) -> u32 {
    let parity_bits = 31 - generator.leading_zeros();
    let shifted = data << parity_bits;
    shifted | remainder(shifted, generator)
}

/// 15-bit format word for an EC level and mask, already XOR-masked
pub fn format_word(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u32) << 3) | mask.index() as u32;
    encode(data, FORMAT_GENERATOR) as u16 ^ FORMAT_MASK
}

/// 18-bit version word (meaningful for versions 7-40)
pub fn version_word(version: Version) -> u32 {
    encode(version.number() as u32, VERSION_GENERATOR)
}

/// Nearest valid format word within 3 bit errors
pub fn decode_format_word(word: u16) -> Option<(ECLevel, MaskPattern)> {
    let mut best: Option<(u32, u8)> = None;
    for data in 0u8..32 {
        let ec_level = ECLevel::from_format_bits(data >> 3);
        let mask = MaskPattern::from_bits(data);
        let distance = (format_word(ec_level, mask) ^ word).count_ones();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, data));
        }
    }
    match best {
        Some((distance, data)) if distance <= 3 => Some((
            ECLevel::from_format_bits(data >> 3),
            MaskPattern::from_bits(data),
        )),
        _ => None,
    }
}

/// Nearest valid version word within 3 bit errors
pub fn decode_version_word(word: u32) -> Option<Version> {
    Version::all()
        .filter(|v| v.has_version_info())
        .map(|v| ((version_word(v) ^ word).count_ones(), v))
        .min_by_key(|&(distance, _)| distance)
        .filter(|&(distance, _)| distance <= 3)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder() {
        assert_eq!(remainder(0, FORMAT_GENERATOR), 0);
        assert_eq!(remainder(FORMAT_GENERATOR, FORMAT_GENERATOR), 0);
        assert_eq!(remainder(0b11, FORMAT_GENERATOR), 0b11);
        // x^10 mod g = x^8 + x^5 + x^4 + x^2 + x + 1
        assert_eq!(remainder(1 << 10, FORMAT_GENERATOR), 0b01_0011_0111);
    }

    #[test]
    fn test_known_format_words() {
        assert_eq!(
            format_word(ECLevel::L, MaskPattern::Pattern0),
            0b111_0111_1100_0100
        );
        assert_eq!(format_word(ECLevel::M, MaskPattern::Pattern0), FORMAT_MASK);
        assert_eq!(
            format_word(ECLevel::H, MaskPattern::Pattern7),
            0b000_1000_0010_0101
        );
    }

    #[test]
    fn test_known_version_words() {
        assert_eq!(version_word(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_word(Version::new(8).unwrap()), 0x085BC);
        assert_eq!(version_word(Version::new(40).unwrap()), 0x28C69);
    }

    #[test]
    fn test_format_decode_with_errors() {
        let word = format_word(ECLevel::Q, MaskPattern::Pattern4);
        assert_eq!(
            decode_format_word(word),
            Some((ECLevel::Q, MaskPattern::Pattern4))
        );
        assert_eq!(
            decode_format_word(word ^ 0b100_0000_0100_0001),
            Some((ECLevel::Q, MaskPattern::Pattern4))
        );
    }

    #[test]
    fn test_version_decode_with_errors() {
        let v = Version::new(23).unwrap();
        let word = version_word(v);
        assert_eq!(decode_version_word(word), Some(v));
        assert_eq!(decode_version_word(word ^ 0b10_0000_0001_0000_0001), Some(v));
        assert_eq!(decode_version_word(version_word(Version::new(6).unwrap())), None);
    }
}
