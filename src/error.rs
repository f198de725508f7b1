//! Error types for barcode generation and Reed-Solomon coding

use crate::models::ECLevel;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure category, used by callers that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field arithmetic on an undefined input
    Domain,
    /// Content does not fit any symbol, or is outside a mode's alphabet
    Capacity,
    /// Reed-Solomon decoding could not produce a verified result
    Uncorrectable,
    /// Caller passed parameters or content the API does not accept
    Usage,
    /// Writing the rendered symbol failed
    Output,
}

/// Errors that can occur while encoding, decoding, or rendering
#[derive(Error, Debug)]
pub enum Error {
    /// Field arithmetic on an undefined input (log or inverse of zero)
    #[error("Galois field domain error: {0}")]
    Domain(&'static str),

    /// Payload exceeds the capacity of version 40 at the requested level
    #[error("Data too long: {bits} bits exceed {capacity} available at EC level {ec_level:?}")]
    DataTooLong {
        /// Bits the payload needs at version 40
        bits: usize,
        /// Data bits version 40 offers
        capacity: usize,
        /// Requested error correction level
        ec_level: ECLevel,
    },

    /// Character outside the alphabet of the selected mode
    #[error("Cannot encode {character:?} in {mode} mode")]
    Unencodable {
        /// Offending character
        character: char,
        /// Mode name
        mode: &'static str,
    },

    /// Reed-Solomon decoding failed
    #[error("Uncorrectable codeword: {0}")]
    Uncorrectable(&'static str),

    /// Block passed to the coder has the wrong number of symbols
    #[error("Block length mismatch: expected {expected} symbols, got {actual}")]
    BlockLength {
        /// Symbols the coder needs
        expected: usize,
        /// Symbols it was given
        actual: usize,
    },

    /// Coder or field constructed with unusable parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Content rejected by a linear symbology
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Domain(_) => ErrorKind::Domain,
            Error::DataTooLong { .. } | Error::Unencodable { .. } => ErrorKind::Capacity,
            Error::Uncorrectable(_) => ErrorKind::Uncorrectable,
            Error::BlockLength { .. } | Error::InvalidParameters(_) | Error::InvalidInput(_) => {
                ErrorKind::Usage
            }
            Error::Image(_) | Error::Io(_) => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::Domain("log(0)").kind(), ErrorKind::Domain);
        assert_eq!(
            Error::Unencodable {
                character: 'a',
                mode: "alphanumeric"
            }
            .kind(),
            ErrorKind::Capacity
        );
        assert_eq!(
            Error::BlockLength {
                expected: 4,
                actual: 3
            }
            .kind(),
            ErrorKind::Usage
        );
        assert_eq!(Error::Uncorrectable("x").kind(), ErrorKind::Uncorrectable);
    }

    #[test]
    fn test_error_display() {
        let err = Error::DataTooLong {
            bits: 30000,
            capacity: 10208,
            ec_level: ECLevel::H,
        };
        let msg = err.to_string();
        assert!(msg.contains("30000"));
        assert!(msg.contains("H"));
    }
}
