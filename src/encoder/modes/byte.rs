use crate::coding::BitStream;
use crate::error::{Error, Result};

/// Byte mode encoder (Mode 0100), 8 bits per character
///
/// Text is carried as ISO-8859-1, so only characters up to U+00FF fit.
pub struct ByteEncoder;

impl ByteEncoder {
    /// True if every character has an ISO-8859-1 code point
    pub fn accepts(text: &str) -> bool {
        text.chars().all(|c| (c as u32) <= 0xFF)
    }

    /// ISO-8859-1 bytes of `text`
    pub fn latin1(text: &str) -> Result<Vec<u8>> {
        text.chars()
            .map(|c| {
                u8::try_from(c as u32).map_err(|_| Error::Unencodable {
                    character: c,
                    mode: "byte",
                })
            })
            .collect()
    }

    /// Payload bits for raw bytes, 8 per byte
    pub fn encode(data: &[u8]) -> BitStream {
        let mut bits = BitStream::with_capacity(8 * data.len());
        bits.push_bytes(data);
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_encode() {
        // "HI" in ASCII = 72, 73
        let bits = ByteEncoder::encode(&ByteEncoder::latin1("HI").unwrap());
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.to_bytes(), vec![0x48, 0x49]);
    }

    #[test]
    fn test_latin1() {
        assert_eq!(ByteEncoder::latin1("é").unwrap(), vec![0xE9]);
        assert!(ByteEncoder::accepts("naïve ÿ"));
        assert!(!ByteEncoder::accepts("€"));
        assert!(matches!(
            ByteEncoder::latin1("a€"),
            Err(Error::Unencodable { character: '€', .. })
        ));
    }
}
