use super::{Module, ModuleMatrix};
use std::fmt;
use std::str::FromStr;

/// QR Code Model 2 version (1-40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol, 21x21 modules
    pub const MIN: Version = Version(1);
    /// Largest symbol, 177x177 modules
    pub const MAX: Version = Version(40);

    /// Version from its number, if in 1..=40
    pub fn new(number: u8) -> Option<Self> {
        if (1..=40).contains(&number) {
            Some(Version(number))
        } else {
            None
        }
    }

    /// Get the version number (1-40)
    pub fn number(self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Character-count field tier: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub fn count_tier(self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Versions 7 and up carry version information blocks
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    /// All versions in ascending order
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    #[default]
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Table index in L, M, Q, H order
    pub fn ordinal(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }

    /// Two-bit field used in format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }
}

impl FromStr for ECLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ECLevel::L),
            "M" => Ok(ECLevel::M),
            "Q" => Ok(ECLevel::Q),
            "H" => Ok(ECLevel::H),
            other => Err(format!("unknown error correction level '{}'", other)),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Pattern index 0-7
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Check if module at row i, column j should be inverted
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Finished QR symbol
///
/// Built once by the encoder and immutable afterwards. Every module is
/// resolved to a dark or light data or function module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: ModuleMatrix,
}

impl QrCode {
    pub(crate) fn from_parts(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        modules: ModuleMatrix,
    ) -> Self {
        Self {
            version,
            ec_level,
            mask,
            modules,
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern chosen for the data area
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Side length in modules, without quiet zone
    pub fn width(&self) -> usize {
        self.modules.width()
    }

    /// Module at (x, y)
    pub fn module(&self, x: usize, y: usize) -> Module {
        self.modules.get(x, y)
    }

    /// True if the module at (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.is_dark(x, y)
    }

    /// Underlying module matrix
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.modules
    }

    /// Module rows from top to bottom; each call starts over
    pub fn rows(&self) -> impl Iterator<Item = &[Module]> + '_ {
        self.modules.rows()
    }

    /// Rows of dark/light values surrounded by `margin` light modules
    pub fn to_bits(&self, margin: usize) -> Vec<Vec<bool>> {
        let width = self.width();
        let total = width + 2 * margin;
        let mut out = vec![vec![false; total]; total];
        for (y, row) in self.modules.rows().enumerate() {
            for (x, module) in row.iter().enumerate() {
                out[y + margin][x + margin] = module.is_dark();
            }
        }
        out
    }

    /// Text rendering using two characters per module
    pub fn to_text(&self, margin: usize) -> String {
        let bits = self.to_bits(margin);
        let mut out = String::with_capacity(bits.len() * (bits.len() * 2 + 1));
        for row in &bits {
            for &dark in row {
                out.push_str(if dark { "██" } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for QrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(4))
    }
}
