//! EAN-13 and EAN-8
use super::{LinearSymbology, push_bits};
use crate::error::{Error, Result};

/// L, G and R patterns per digit, seven modules each
const PATTERNS: [[u32; 3]; 10] = [
    [0b0001101, 0b0100111, 0b1110010],
    [0b0011001, 0b0110011, 0b1100110],
    [0b0010011, 0b0011011, 0b1101100],
    [0b0111101, 0b0100001, 0b1000010],
    [0b0100011, 0b0011101, 0b1011100],
    [0b0110001, 0b0111001, 0b1001110],
    [0b0101111, 0b0000101, 0b1010000],
    [0b0111011, 0b0010001, 0b1000100],
    [0b0110111, 0b0001001, 0b1001000],
    [0b0001011, 0b0010111, 0b1110100],
];

/// L/G choice for the left half of EAN-13, keyed by the leading digit (1 = G)
const PARITY_EAN13: [u32; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

const DIGIT_WIDTH: usize = 7;
const GUARD: u32 = 0b101;
const CENTER_GUARD: u32 = 0b01010;

const L: usize = 0;
const G: usize = 1;
const R: usize = 2;

/// EAN encoder; the variant follows the digit count
///
/// 12 or 13 digits give EAN-13, 7 or 8 give EAN-8. A supplied check digit
/// must be correct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ean;

impl Ean {
    /// Check digit for a payload without its check digit
    pub fn check_digit(payload: &[u8]) -> u8 {
        let sum: u32 = payload
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| if i % 2 == 0 { 3 * d as u32 } else { d as u32 })
            .sum();
        ((10 - sum % 10) % 10) as u8
    }

    /// All digits including the check digit
    pub fn with_check_digit(data: &str) -> Result<Vec<u8>> {
        let mut digits = data
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .filter(|_| c.is_ascii_digit())
                    .map(|d| d as u8)
                    .ok_or_else(|| Error::InvalidInput("EAN can contain only digits 0-9".into()))
            })
            .collect::<Result<Vec<u8>>>()?;
        match digits.len() {
            12 | 7 => {
                let check = Self::check_digit(&digits);
                digits.push(check);
                Ok(digits)
            }
            13 | 8 => {
                let (payload, supplied) = digits.split_at(digits.len() - 1);
                if Self::check_digit(payload) != supplied[0] {
                    return Err(Error::InvalidInput(
                        "supplied EAN check digit is invalid".into(),
                    ));
                }
                Ok(digits)
            }
            n => Err(Error::InvalidInput(format!(
                "invalid EAN length {}; expected 7, 8, 12 or 13 digits",
                n
            ))),
        }
    }

    fn ean13(digits: &[u8]) -> Vec<bool> {
        let parity = PARITY_EAN13[digits[0] as usize];
        let mut out = Vec::with_capacity(13 + 95 + 8);
        push_bits(&mut out, 0, 13);
        push_bits(&mut out, GUARD, 3);
        for (i, &d) in digits[1..7].iter().enumerate() {
            let set = if (parity >> (5 - i)) & 1 == 1 { G } else { L };
            push_bits(&mut out, PATTERNS[d as usize][set], DIGIT_WIDTH);
        }
        push_bits(&mut out, CENTER_GUARD, 5);
        for &d in &digits[7..] {
            push_bits(&mut out, PATTERNS[d as usize][R], DIGIT_WIDTH);
        }
        push_bits(&mut out, GUARD, 3);
        push_bits(&mut out, 0, 8);
        out
    }

    fn ean8(digits: &[u8]) -> Vec<bool> {
        let mut out = Vec::with_capacity(8 + 67 + 8);
        push_bits(&mut out, 0, 8);
        push_bits(&mut out, GUARD, 3);
        for &d in &digits[..4] {
            push_bits(&mut out, PATTERNS[d as usize][L], DIGIT_WIDTH);
        }
        push_bits(&mut out, CENTER_GUARD, 5);
        for &d in &digits[4..] {
            push_bits(&mut out, PATTERNS[d as usize][R], DIGIT_WIDTH);
        }
        push_bits(&mut out, GUARD, 3);
        push_bits(&mut out, 0, 8);
        out
    }
}

impl LinearSymbology for Ean {
    fn name(&self) -> &'static str {
        "EAN"
    }

    fn bars(&self, data: &str) -> Result<Vec<bool>> {
        let digits = Self::with_check_digit(data)?;
        Ok(if digits.len() == 13 {
            Self::ean13(&digits)
        } else {
            Self::ean8(&digits)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digits() {
        assert_eq!(Ean::check_digit(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5]), 7);
        assert_eq!(Ean::check_digit(&[9, 6, 3, 8, 5, 0, 7]), 4);
        assert_eq!(
            Ean::with_check_digit("590123412345").unwrap().last(),
            Some(&7)
        );
        assert!(Ean::with_check_digit("5901234123458").is_err());
        assert!(Ean::with_check_digit("59012341234").is_err());
        assert!(Ean::with_check_digit("59012341234x").is_err());
    }

    #[test]
    fn test_ean13_layout() {
        let bars = Ean.bars("5901234123457").unwrap();
        assert_eq!(bars.len(), 13 + 95 + 8);
        assert!(bars[..13].iter().all(|&b| !b));
        assert_eq!(&bars[13..16], &[true, false, true]);
        // center guard after six left digits
        assert_eq!(&bars[58..63], &[false, true, false, true, false]);
        // computed and supplied check digits give the same symbol
        assert_eq!(bars, Ean.bars("590123412345").unwrap());
    }

    #[test]
    fn test_ean8_layout() {
        let bars = Ean.bars("9638507").unwrap();
        assert_eq!(bars.len(), 8 + 67 + 8);
        // first digit 9 in L set: 0001011
        let nine: Vec<bool> = "0001011".chars().map(|c| c == '1').collect();
        assert_eq!(&bars[11..18], nine.as_slice());
    }
}
