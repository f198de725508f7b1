//! Stripes - QR code and linear barcode generation
//!
//! A pure Rust barcode encoder. The QR pipeline selects a mode and version,
//! packs and pads the payload, adds Reed-Solomon parity over GF(256),
//! interleaves blocks, lays the bits around the function patterns and
//! picks the mask with the lowest penalty. Code 93, Code 128 and EAN are
//! available as linear symbologies, and any symbol can be rasterized or
//! drawn as SVG.
//!
//! # Example
//! ```
//! use stripes::{ECLevel, QrCode};
//!
//! let qr = QrCode::encode_text("HELLO WORLD", ECLevel::Q).unwrap();
//! assert_eq!(qr.version().number(), 1);
//! assert_eq!(qr.width(), 21);
//! ```
//!
//! The Reed-Solomon coder is usable on its own:
//! ```
//! use stripes::ReedSolomonCoder;
//!
//! let rs = ReedSolomonCoder::qr(4, 10).unwrap();
//! let mut block = rs.encode_systematic(&[1, 2, 3, 4]).unwrap();
//! block[2] ^= 0x55;
//! assert_eq!(rs.decode_block(&block, &[]).unwrap(), vec![1, 2, 3, 4]);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Bit buffers, Galois fields, Reed-Solomon and BCH codes
pub mod coding;
/// QR encoding pipeline (segments, codewords, symbol layout, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Linear symbologies and the symbology dispatcher
pub mod linear;
/// Core data structures (QrCode, ModuleMatrix, Version, ECLevel, ...)
pub mod models;
/// Image and SVG output
pub mod render;

pub use coding::{BitStream, GaloisField, ReedSolomonCoder};
pub use encoder::{EncodeOptions, Mode, RenderOptions, Segment, SymbolBuilder};
pub use error::{Error, ErrorKind, Result};
pub use linear::{Barcode, Code93, Code128, Code128Set, Ean, LinearSymbology, Symbology};
pub use models::{ECLevel, MaskPattern, Module, ModuleMatrix, QrCode, Version};
