use crate::coding::BitStream;
use crate::error::{Error, Result};

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Alphanumeric mode encoder (Mode 0010)
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Index of `c` in the alphanumeric table
    pub fn char_value(c: char) -> Option<u32> {
        match c {
            '0'..='9' => Some(c as u32 - '0' as u32),
            'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
            _ => ALPHANUMERIC_TABLE[36..]
                .iter()
                .position(|&s| s == c)
                .map(|i| 36 + i as u32),
        }
    }

    /// True if every character is in the alphanumeric table
    pub fn accepts(text: &str) -> bool {
        text.chars().all(|c| Self::char_value(c).is_some())
    }

    /// Payload length in bits for `count` characters
    pub fn bit_length(count: usize) -> usize {
        11 * (count / 2) + 6 * (count % 2)
    }

    /// Payload bits for `text`; fails on characters outside the table
    pub fn encode(text: &str) -> Result<BitStream> {
        let values = text
            .chars()
            .map(|c| {
                Self::char_value(c).ok_or(Error::Unencodable {
                    character: c,
                    mode: "alphanumeric",
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        let mut bits = BitStream::with_capacity(Self::bit_length(values.len()));
        for pair in values.chunks(2) {
            match *pair {
                [first, second] => bits.push(45 * first + second, 11),
                [single] => bits.push(single, 6),
                _ => {}
            }
        }
        Ok(bits)
    }
}
