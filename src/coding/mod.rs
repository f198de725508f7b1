//! Coding primitives shared by every symbology
//!
//! - Bit accumulation for segment payloads
//! - GF(2^m) arithmetic and polynomial helpers
//! - Reed-Solomon encoding and errors-and-erasures decoding
//! - BCH words protecting QR format and version information

/// BCH format and version words
pub mod bch;
/// Append-only MSB-first bit buffer
pub mod bitstream;
/// Galois field arithmetic
pub mod galois;
mod proptest;
/// Reed-Solomon coder
pub mod reed_solomon;

pub use bitstream::BitStream;
pub use galois::GaloisField;
pub use reed_solomon::ReedSolomonCoder;
