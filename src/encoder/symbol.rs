//! Symbol construction
//!
//! [`SymbolBuilder`] moves a module matrix through a fixed sequence of
//! phases, from finder patterns to the stamped version block. Each phase
//! runs exactly once and in order; the finished matrix is frozen into a
//! [`QrCode`].

use crate::encoder::codewords::{build_codewords, encode_data_codewords, select_version};
use crate::encoder::config::EncodeOptions;
use crate::encoder::modes::Segment;
use crate::encoder::tables::raw_data_modules;
use crate::encoder::{format, function_patterns, mask, placement, version};
use crate::error::{Error, Result};
use crate::models::{ECLevel, MaskPattern, ModuleMatrix, QrCode, Version};
use tracing::debug;

/// Build phases in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Nothing placed yet
    Empty,
    /// Finders and separators placed
    FinderPatterns,
    /// Timing lines placed
    TimingPatterns,
    /// Alignment patterns placed
    AlignmentPatterns,
    /// Dark module placed
    DarkModule,
    /// Format areas reserved as light function modules
    FormatReserved,
    /// Version blocks reserved (skipped below version 7)
    VersionReserved,
    /// Codeword bits laid along the zig-zag path
    DataPlaced,
    /// Best mask chosen and applied
    Masked,
    /// Format word written
    FormatStamped,
    /// Version word written; matrix fully resolved
    Complete,
}

impl Phase {
    fn next(self) -> Self {
        match self {
            Phase::Empty => Phase::FinderPatterns,
            Phase::FinderPatterns => Phase::TimingPatterns,
            Phase::TimingPatterns => Phase::AlignmentPatterns,
            Phase::AlignmentPatterns => Phase::DarkModule,
            Phase::DarkModule => Phase::FormatReserved,
            Phase::FormatReserved => Phase::VersionReserved,
            Phase::VersionReserved => Phase::DataPlaced,
            Phase::DataPlaced => Phase::Masked,
            Phase::Masked => Phase::FormatStamped,
            Phase::FormatStamped | Phase::Complete => Phase::Complete,
        }
    }
}

/// Lays out one QR symbol from its final codeword sequence
#[derive(Debug, Clone)]
pub struct SymbolBuilder {
    version: Version,
    ec_level: ECLevel,
    codewords: Vec<u8>,
    matrix: ModuleMatrix,
    phase: Phase,
    mask: Option<MaskPattern>,
    parallel_masks: bool,
}

impl SymbolBuilder {
    /// Builder for interleaved data and parity `codewords`
    ///
    /// The codeword count must match the symbol's capacity exactly.
    pub fn new(version: Version, ec_level: ECLevel, codewords: Vec<u8>) -> Result<Self> {
        let expected = raw_data_modules(version) / 8;
        if codewords.len() != expected {
            return Err(Error::BlockLength {
                expected,
                actual: codewords.len(),
            });
        }
        Ok(Self {
            version,
            ec_level,
            codewords,
            matrix: ModuleMatrix::new(version.size()),
            phase: Phase::Empty,
            mask: None,
            parallel_masks: true,
        })
    }

    /// Score masks on the rayon pool (default) or serially
    pub fn parallel_masks(mut self, parallel: bool) -> Self {
        self.parallel_masks = parallel;
        self
    }

    /// Last completed phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Matrix in its current state
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// Mask chosen so far, once the masking phase has run
    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Run the next phase and return it
    pub fn advance(&mut self) -> Phase {
        if self.phase == Phase::Complete {
            return Phase::Complete;
        }
        let next = self.phase.next();
        match next {
            Phase::Empty => {}
            Phase::FinderPatterns => function_patterns::place_finder_patterns(&mut self.matrix),
            Phase::TimingPatterns => function_patterns::place_timing_patterns(&mut self.matrix),
            Phase::AlignmentPatterns => {
                function_patterns::place_alignment_patterns(&mut self.matrix, self.version)
            }
            Phase::DarkModule => function_patterns::place_dark_module(&mut self.matrix),
            Phase::FormatReserved => format::reserve(&mut self.matrix),
            Phase::VersionReserved => version::reserve(&mut self.matrix, self.version),
            Phase::DataPlaced => {
                let remainder = placement::place_codewords(&mut self.matrix, &self.codewords);
                debug!(
                    codewords = self.codewords.len(),
                    remainder_bits = remainder,
                    "data placed"
                );
            }
            Phase::Masked => {
                let (chosen, masked) = mask::select_mask(&self.matrix, self.parallel_masks);
                self.matrix = masked;
                self.mask = Some(chosen);
            }
            Phase::FormatStamped => {
                let chosen = self.mask.unwrap_or(MaskPattern::Pattern0);
                format::stamp(&mut self.matrix, self.ec_level, chosen);
            }
            Phase::Complete => version::stamp(&mut self.matrix, self.version),
        }
        self.phase = next;
        next
    }

    /// Run every remaining phase and freeze the symbol
    pub fn build(mut self) -> QrCode {
        while self.phase != Phase::Complete {
            self.advance();
        }
        let mask = self.mask.unwrap_or(MaskPattern::Pattern0);
        QrCode::from_parts(self.version, self.ec_level, mask, self.matrix)
    }
}

impl QrCode {
    /// Encode text in the densest mode that carries it
    pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<QrCode> {
        Self::encode_with(text, &EncodeOptions::new(ec_level))
    }

    /// Encode arbitrary bytes in byte mode
    pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<QrCode> {
        Self::encode_segment(&Segment::bytes(data), &EncodeOptions::new(ec_level))
    }

    /// Encode text with explicit options
    pub fn encode_with(text: &str, options: &EncodeOptions) -> Result<QrCode> {
        Self::encode_segment(&Segment::from_text(text)?, options)
    }

    /// Encode a prepared segment
    pub fn encode_segment(segment: &Segment, options: &EncodeOptions) -> Result<QrCode> {
        let ec_level = options.ec_level;
        let version = select_version(segment, ec_level)?;
        debug!(
            mode = segment.mode().name(),
            chars = segment.char_count(),
            version = version.number(),
            ec_level = ?ec_level,
            "segment encoded"
        );
        let data = encode_data_codewords(segment, version, ec_level)?;
        let codewords = build_codewords(&data, version, ec_level)?;
        let qr = SymbolBuilder::new(version, ec_level, codewords)?
            .parallel_masks(options.parallel_masks)
            .build();
        debug!(mask = qr.mask().index(), width = qr.width(), "symbol built");
        Ok(qr)
    }

    /// EC level and mask read back from the stamped format bits
    pub fn format_info(&self) -> Option<(ECLevel, MaskPattern)> {
        format::read(self.matrix())
    }

    /// Version read back from the version blocks (versions 7 and up)
    pub fn version_info(&self) -> Option<Version> {
        version::read(self.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Module;

    fn builder(text: &str, ec_level: ECLevel) -> SymbolBuilder {
        let segment = Segment::from_text(text).unwrap();
        let version = select_version(&segment, ec_level).unwrap();
        let data = encode_data_codewords(&segment, version, ec_level).unwrap();
        let codewords = build_codewords(&data, version, ec_level).unwrap();
        SymbolBuilder::new(version, ec_level, codewords).unwrap()
    }

    #[test]
    fn test_phases_run_in_order() {
        let mut b = builder("HELLO WORLD", ECLevel::Q);
        let mut seen = vec![b.phase()];
        while b.phase() != Phase::Complete {
            seen.push(b.advance());
        }
        assert_eq!(seen.len(), 11);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        // further calls stay terminal
        assert_eq!(b.advance(), Phase::Complete);
        assert!(b.matrix().is_resolved());
    }

    #[test]
    fn test_unset_until_data_placed() {
        let mut b = builder("12345", ECLevel::L);
        while b.phase() < Phase::VersionReserved {
            b.advance();
        }
        assert!(!b.matrix().is_resolved());
        assert!(b.mask().is_none());
        b.advance();
        assert_eq!(b.phase(), Phase::DataPlaced);
        assert!(b.matrix().is_resolved());
    }

    #[test]
    fn test_wrong_codeword_count() {
        let err = SymbolBuilder::new(Version::MIN, ECLevel::L, vec![0; 25]).unwrap_err();
        assert!(matches!(
            err,
            Error::BlockLength {
                expected: 26,
                actual: 25
            }
        ));
    }

    #[test]
    fn test_hello_world_symbol() {
        let qr = QrCode::encode_text("HELLO WORLD", ECLevel::Q).unwrap();
        assert_eq!(qr.version().number(), 1);
        assert_eq!(qr.width(), 21);
        assert_eq!(qr.format_info(), Some((ECLevel::Q, qr.mask())));
        assert_eq!(qr.version_info(), None);
        assert_eq!(qr.module(8, 13), Module::FunctionDark);
        assert!(qr.matrix().is_resolved());
    }

    #[test]
    fn test_version_info_stamped() {
        let qr = QrCode::encode_bytes(&[0x5A; 200], ECLevel::M).unwrap();
        assert!(qr.version().has_version_info());
        assert_eq!(qr.version_info(), Some(qr.version()));
        assert_eq!(qr.format_info(), Some((ECLevel::M, qr.mask())));
    }

    #[test]
    fn test_deterministic_across_mask_paths() {
        let text = "https://example.com/stripes?id=12345";
        let serial_opts = EncodeOptions::new(ECLevel::H).parallel_masks(false);
        let parallel_opts = EncodeOptions::new(ECLevel::H).parallel_masks(true);
        let serial = QrCode::encode_with(text, &serial_opts).unwrap();
        let parallel = QrCode::encode_with(text, &parallel_opts).unwrap();
        assert_eq!(serial, parallel);
        assert_eq!(serial, QrCode::encode_with(text, &serial_opts).unwrap());
    }

    #[test]
    fn test_failure_before_matrix() {
        assert!(matches!(
            QrCode::encode_bytes(&vec![0u8; 3000], ECLevel::L),
            Err(Error::DataTooLong { .. })
        ));
        assert!(matches!(
            QrCode::encode_text("漢字", ECLevel::L),
            Err(Error::Unencodable { .. })
        ));
    }
}
