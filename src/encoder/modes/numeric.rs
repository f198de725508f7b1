use crate::coding::BitStream;
use crate::error::{Error, Result};

/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericEncoder;

impl NumericEncoder {
    /// True if the text is non-empty and made of ASCII digits only
    pub fn accepts(text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
    }

    /// Payload length in bits for `count` digits
    pub fn bit_length(count: usize) -> usize {
        10 * (count / 3)
            + match count % 3 {
                1 => 4,
                2 => 7,
                _ => 0,
            }
    }

    /// Payload bits for a digit string; fails on the first non-digit
    pub fn encode(text: &str) -> Result<BitStream> {
        let digits = text.as_bytes();
        let mut bits = BitStream::with_capacity(Self::bit_length(digits.len()));

        for group in digits.chunks(3) {
            let mut value = 0u32;
            for &d in group {
                if !d.is_ascii_digit() {
                    return Err(Error::Unencodable {
                        character: d as char,
                        mode: "numeric",
                    });
                }
                value = value * 10 + (d - b'0') as u32;
            }
            let width = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            bits.push(value, width);
        }

        Ok(bits)
    }
}
