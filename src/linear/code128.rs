//! Code 128 in a single code set (A, B or C)
use super::{LinearSymbology, push_bits};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Bar patterns for values 0-106, eleven modules each
const PATTERNS: [u32; 106] = [
    1740, 1644, 1638, 1176, 1164, 1100, 1224, 1220, 1124, 1608, 1604, 1572, 1436, 1244, 1230, 1484,
    1260, 1254, 1650, 1628, 1614, 1764, 1652, 1902, 1868, 1836, 1830, 1892, 1844, 1842, 1752, 1734,
    1590, 1304, 1112, 1094, 1416, 1128, 1122, 1672, 1576, 1570, 1464, 1422, 1134, 1496, 1478, 1142,
    1910, 1678, 1582, 1768, 1762, 1774, 1880, 1862, 1814, 1896, 1890, 1818, 1914, 1602, 1930, 1328,
    1292, 1200, 1158, 1068, 1062, 1424, 1412, 1232, 1218, 1076, 1074, 1554, 1616, 1978, 1556, 1146,
    1340, 1212, 1182, 1508, 1268, 1266, 1956, 1940, 1938, 1758, 1782, 1974, 1400, 1310, 1118, 1512,
    1506, 1960, 1954, 1502, 1518, 1886, 1966, 1668, 1680, 1692,
];

const MODULE_WIDTH: usize = 11;
/// Stop pattern including the final two-module bar
const STOP: u32 = 0b1100011101011;
const STOP_WIDTH: usize = 13;
const QUIET_ZONE: usize = 10;

/// Code 128 code set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Code128Set {
    /// Upper-case ASCII and control characters
    A,
    /// Printable ASCII
    #[default]
    B,
    /// Digit pairs 00-99
    C,
}

impl Code128Set {
    /// Start character value for this set
    pub fn start_value(self) -> u8 {
        match self {
            Code128Set::A => 103,
            Code128Set::B => 104,
            Code128Set::C => 105,
        }
    }
}

impl fmt::Display for Code128Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code128Set::A => "A",
            Code128Set::B => "B",
            Code128Set::C => "C",
        };
        f.write_str(name)
    }
}

impl FromStr for Code128Set {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" | "a" => Ok(Code128Set::A),
            "B" | "b" => Ok(Code128Set::B),
            "C" | "c" => Ok(Code128Set::C),
            other => Err(Error::InvalidInput(format!(
                "unsupported Code128 set {:?}",
                other
            ))),
        }
    }
}

/// Code 128 encoder bound to one code set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code128 {
    set: Code128Set,
}

impl Code128 {
    /// Encoder for `set`
    pub fn new(set: Code128Set) -> Self {
        Self { set }
    }

    /// Code set in use
    pub fn set(&self) -> Code128Set {
        self.set
    }

    /// Symbol values for `data`, start character first
    pub fn values(&self, data: &str) -> Result<Vec<u8>> {
        let mut values = Vec::with_capacity(data.len() + 1);
        values.push(self.set.start_value());
        match self.set {
            Code128Set::A => {
                for c in data.chars() {
                    values.push(match c as u32 {
                        code @ 0..=31 => code as u8 + 64,
                        code @ 32..=95 => code as u8 - 32,
                        _ => return Err(unencodable(c, self.set)),
                    });
                }
            }
            Code128Set::B => {
                for c in data.chars() {
                    values.push(match c as u32 {
                        code @ 32..=127 => code as u8 - 32,
                        _ => return Err(unencodable(c, self.set)),
                    });
                }
            }
            Code128Set::C => {
                if data.len() % 2 == 1 {
                    return Err(Error::InvalidInput(
                        "Code128C needs an even number of digits".to_string(),
                    ));
                }
                for pair in data.as_bytes().chunks(2) {
                    let (hi, lo) = (pair[0], pair[1]);
                    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
                        let bad = if hi.is_ascii_digit() { lo } else { hi };
                        return Err(unencodable(bad as char, self.set));
                    }
                    values.push((hi - b'0') * 10 + (lo - b'0'));
                }
            }
        }
        Ok(values)
    }

    /// Modulo-103 check value; the start character and first data
    /// character both carry weight 1
    pub fn check_value(values: &[u8]) -> u8 {
        let sum: usize = values
            .iter()
            .enumerate()
            .map(|(i, &v)| i.max(1) * v as usize)
            .sum();
        (sum % 103) as u8
    }
}

fn unencodable(c: char, set: Code128Set) -> Error {
    Error::InvalidInput(format!("{:?} can't be encoded in Code128{}", c, set))
}

impl LinearSymbology for Code128 {
    fn name(&self) -> &'static str {
        "Code128"
    }

    fn bars(&self, data: &str) -> Result<Vec<bool>> {
        let values = self.values(data)?;
        let check = Self::check_value(&values);

        let mut out =
            Vec::with_capacity(2 * QUIET_ZONE + MODULE_WIDTH * (values.len() + 1) + STOP_WIDTH);
        push_bits(&mut out, 0, QUIET_ZONE);
        for v in values.iter().copied().chain([check]) {
            push_bits(&mut out, PATTERNS[v as usize], MODULE_WIDTH);
        }
        push_bits(&mut out, STOP, STOP_WIDTH);
        push_bits(&mut out, 0, QUIET_ZONE);
        Ok(out)
    }
}
