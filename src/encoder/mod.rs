//! QR code encoding pipeline
//!
//! Content flows through these stages:
//! - Mode selection and payload packing ([`modes`])
//! - Version selection, padding, blocks, parity, interleaving ([`codewords`])
//! - Function patterns, zig-zag placement, masking, format and version
//!   stamping ([`symbol`])

/// Codeword assembly and interleaving
pub mod codewords;
/// Encode and render options with environment defaults
pub mod config;
/// Format information placement
pub mod format;
/// Finder, timing and alignment patterns
pub mod function_patterns;
/// Mask application and penalty scoring
pub mod mask;
/// Data segment encoders (numeric, alphanumeric, byte)
pub mod modes;
/// Zig-zag data placement
pub mod placement;
/// Phase-ordered symbol builder
pub mod symbol;
/// QR capacity and block tables
pub mod tables;
/// Version information placement
pub mod version;

pub use codewords::{
    add_error_correction, build_codewords, encode_data_codewords, interleave, select_version,
    split_into_blocks,
};
pub use config::{EncodeOptions, RenderOptions};
pub use modes::{Mode, Segment, encoding_length, select_mode};
pub use symbol::{Phase, SymbolBuilder};
