//! Code 93 with full-ASCII escapes and two modulo-47 check characters
use super::{LinearSymbology, push_bits};
use crate::error::{Error, Result};

/// Bar patterns for values 0-47, nine modules each (47 is start/stop)
const PATTERNS: [u32; 48] = [
    0b100010100, 0b101001000, 0b101000100, 0b101000010, 0b100101000, 0b100100100, 0b100100010,
    0b101010000, 0b100010010, 0b100001010, 0b110101000, 0b110100100, 0b110100010, 0b110010100,
    0b110010010, 0b110001010, 0b101101000, 0b101100100, 0b101100010, 0b100110100, 0b100011010,
    0b101011000, 0b101001100, 0b101000110, 0b100101100, 0b100010110, 0b110110100, 0b110110010,
    0b110101100, 0b110100110, 0b110010110, 0b110011010, 0b101101100, 0b101100110, 0b100110110,
    0b100111010, 0b100101110, 0b111010100, 0b111010010, 0b111001010, 0b101101110, 0b101110110,
    0b110101110, 0b100100110, 0b111011010, 0b111010110, 0b100110010, 0b101011110,
];

const MODULE_WIDTH: usize = 9;
const QUIET_ZONE: usize = 10;
const START_STOP: u8 = 47;

// shift characters ($) (%) (/) (+)
const SHIFT_DOLLAR: u8 = 43;
const SHIFT_PERCENT: u8 = 44;
const SHIFT_SLASH: u8 = 45;
const SHIFT_PLUS: u8 = 46;

/// Code 93 encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code93;

impl Code93 {
    /// Symbol values for `data`, shift characters included
    pub fn values(data: &str) -> Result<Vec<u8>> {
        let mut values = Vec::with_capacity(data.len() * 2);
        for c in data.chars() {
            let code = u8::try_from(c as u32)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| {
                    Error::InvalidInput(format!("{:?} can't be encoded in Code93", c))
                })?;
            match code {
                b'0'..=b'9' => values.push(code - b'0'),
                b'A'..=b'Z' => values.push(code - b'A' + 10),
                b'a'..=b'z' => values.extend([SHIFT_PLUS, code - b'a' + 10]),
                b'-' => values.push(36),
                b'.' => values.push(37),
                b' ' => values.push(38),
                b'$' => values.push(39),
                b'/' => values.push(40),
                b'+' => values.push(41),
                b'%' => values.push(42),
                0 => values.extend([SHIFT_PERCENT, 30]),
                1..=26 => values.extend([SHIFT_DOLLAR, code + 9]),
                27..=31 => values.extend([SHIFT_PERCENT, code - 17]),
                b'!'..=b'#' | b'&'..=b'*' | b',' | b':' => values.extend([SHIFT_SLASH, code - 23]),
                b';'..=b'?' => values.extend([SHIFT_PERCENT, code - 44]),
                b'@' => values.extend([SHIFT_PERCENT, 31]),
                b'['..=b'_' => values.extend([SHIFT_PERCENT, code - 71]),
                b'`' => values.extend([SHIFT_PERCENT, 32]),
                _ => values.extend([SHIFT_PERCENT, code - 98]),
            }
        }
        Ok(values)
    }

    /// The "C" and "K" check values for a value sequence
    ///
    /// Weights count up from the rightmost symbol, wrapping after 20 for C
    /// and after 15 for K; K also covers C.
    pub fn check_values(values: &[u8]) -> (u8, u8) {
        let c = weighted_mod47(values.iter().rev().copied(), 20);
        let k = weighted_mod47(std::iter::once(c).chain(values.iter().rev().copied()), 15);
        (c, k)
    }
}

fn weighted_mod47(right_to_left: impl Iterator<Item = u8>, wrap: usize) -> u8 {
    let sum: usize = right_to_left
        .enumerate()
        .map(|(i, v)| (i % wrap + 1) * v as usize)
        .sum();
    (sum % 47) as u8
}

impl LinearSymbology for Code93 {
    fn name(&self) -> &'static str {
        "Code93"
    }

    fn bars(&self, data: &str) -> Result<Vec<bool>> {
        let values = Self::values(data)?;
        let (c, k) = Self::check_values(&values);

        let mut out = Vec::with_capacity(2 * QUIET_ZONE + MODULE_WIDTH * (values.len() + 4) + 1);
        push_bits(&mut out, 0, QUIET_ZONE);
        push_bits(&mut out, PATTERNS[START_STOP as usize], MODULE_WIDTH);
        for v in values.iter().copied().chain([c, k]) {
            push_bits(&mut out, PATTERNS[v as usize], MODULE_WIDTH);
        }
        push_bits(&mut out, PATTERNS[START_STOP as usize], MODULE_WIDTH);
        // termination bar
        out.push(true);
        push_bits(&mut out, 0, QUIET_ZONE);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_values() {
        let values = Code93::values("TEST93").unwrap();
        assert_eq!(values, vec![29, 14, 28, 29, 9, 3]);
        // "+6"
        assert_eq!(Code93::check_values(&values), (41, 6));
    }

    #[test]
    fn test_full_ascii_escapes() {
        assert_eq!(Code93::values("a").unwrap(), vec![SHIFT_PLUS, 10]);
        assert_eq!(Code93::values("!").unwrap(), vec![SHIFT_SLASH, 10]);
        assert_eq!(Code93::values(":").unwrap(), vec![SHIFT_SLASH, 35]);
        assert_eq!(Code93::values("\u{7f}").unwrap(), vec![SHIFT_PERCENT, 29]);
        assert_eq!(Code93::values("\n").unwrap(), vec![SHIFT_DOLLAR, 19]);
        assert!(Code93::values("é").is_err());
    }

    #[test]
    fn test_bar_layout() {
        let bars = Code93.bars("TEST93").unwrap();
        assert_eq!(bars.len(), 10 + 9 * 10 + 1 + 10);
        assert!(bars[..10].iter().all(|&b| !b));
        // start character 101011110
        let start: Vec<bool> = "101011110".chars().map(|c| c == '1').collect();
        assert_eq!(&bars[10..19], start.as_slice());
        assert!(bars[bars.len() - 11]);
    }
}
