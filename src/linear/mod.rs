//! Linear (1D) symbologies and the symbology dispatcher
//!
//! Linear encoders produce a flat bar sequence, quiet zones included, with
//! `true` for a dark bar module. QR symbols keep their own 2D output type.

pub mod code128;
pub mod code93;
pub mod ean;

pub use code128::{Code128, Code128Set};
pub use code93::Code93;
pub use ean::Ean;

use crate::error::{Error, Result};
use crate::models::{ECLevel, QrCode};
use std::fmt;
use std::str::FromStr;

/// A symbology that encodes text into a single row of bars
pub trait LinearSymbology {
    /// Human-readable symbology name
    fn name(&self) -> &'static str;

    /// Bar modules for `data`, quiet zones included
    fn bars(&self, data: &str) -> Result<Vec<bool>>;
}

/// Append the low `width` bits of `value`, most significant first
pub(crate) fn push_bits(out: &mut Vec<bool>, value: u32, width: usize) {
    for shift in (0..width).rev() {
        out.push((value >> shift) & 1 == 1);
    }
}

/// Output of any symbology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Barcode {
    /// One row of bar modules
    Linear(Vec<bool>),
    /// A 2D QR symbol
    Matrix(QrCode),
}

impl Barcode {
    /// Width in modules, without the 2D quiet zone
    pub fn width(&self) -> usize {
        match self {
            Barcode::Linear(bars) => bars.len(),
            Barcode::Matrix(qr) => qr.width(),
        }
    }
}

/// Every supported symbology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// Code 93, full ASCII
    Code93,
    /// Code 128 in one fixed code set
    Code128(Code128Set),
    /// EAN-13 or EAN-8, chosen by digit count
    Ean,
    /// QR code at an error correction level
    Qr(ECLevel),
}

impl Symbology {
    /// Encode `content` with this symbology
    pub fn encode(&self, content: &str) -> Result<Barcode> {
        match *self {
            Symbology::Code93 => Code93.bars(content).map(Barcode::Linear),
            Symbology::Code128(set) => Code128::new(set).bars(content).map(Barcode::Linear),
            Symbology::Ean => Ean.bars(content).map(Barcode::Linear),
            Symbology::Qr(ec_level) => QrCode::encode_text(content, ec_level).map(Barcode::Matrix),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Code93 => f.write_str(Code93.name()),
            Symbology::Code128(set) => write!(f, "{}{}", Code128::new(*set).name(), set),
            Symbology::Ean => f.write_str(Ean.name()),
            Symbology::Qr(ec_level) => write!(f, "QR-{:?}", ec_level),
        }
    }
}

impl FromStr for Symbology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "code93" => Ok(Symbology::Code93),
            "code128" => Ok(Symbology::Code128(Code128Set::default())),
            "ean" | "ean13" | "ean8" => Ok(Symbology::Ean),
            "qr" => Ok(Symbology::Qr(ECLevel::default())),
            other => Err(Error::InvalidInput(format!("unknown symbology {:?}", other))),
        }
    }
}
