/// Module states and the square module matrix
pub mod matrix;
/// QR symbol value types and the finished symbol
pub mod qr_code;

pub use matrix::{Module, ModuleMatrix};
pub use qr_code::{ECLevel, MaskPattern, QrCode, Version};
