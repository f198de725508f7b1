//! Format information placement and read-back
use crate::coding::bch;
use crate::models::{ECLevel, MaskPattern, Module, ModuleMatrix};

/// Module coordinates of format bit `i` (bit 0 least significant), two copies
///
/// The first copy wraps the top-left finder; the second is split between
/// the top-right finder (bits 0-7) and the bottom-left finder (bits 8-14).
pub fn bit_positions(width: usize, i: usize) -> [(usize, usize); 2] {
    let first = match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    };
    let second = if i < 8 {
        (width - 1 - i, 8)
    } else {
        (8, width - 15 + i)
    };
    [first, second]
}

/// Mark both format areas as light function modules
pub fn reserve(matrix: &mut ModuleMatrix) {
    let width = matrix.width();
    for i in 0..15 {
        for (x, y) in bit_positions(width, i) {
            matrix.set(x, y, Module::FunctionLight);
        }
    }
}

/// Write the 15-bit format word for `ec_level` and `mask` into both copies
pub fn stamp(matrix: &mut ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let word = bch::format_word(ec_level, mask);
    let width = matrix.width();
    for i in 0..15 {
        let dark = (word >> i) & 1 == 1;
        for (x, y) in bit_positions(width, i) {
            matrix.set(x, y, Module::function(dark));
        }
    }
}

/// Raw 15-bit word stored in one copy (0 or 1)
pub fn read_word(matrix: &ModuleMatrix, copy: usize) -> u16 {
    let width = matrix.width();
    (0..15).fold(0u16, |word, i| {
        let (x, y) = bit_positions(width, i)[copy];
        word | (matrix.is_dark(x, y) as u16) << i
    })
}

/// EC level and mask recovered from the stamped format bits
///
/// The first copy is tried before the second.
pub fn read(matrix: &ModuleMatrix) -> Option<(ECLevel, MaskPattern)> {
    (0..2).find_map(|copy| bch::decode_format_word(read_word(matrix, copy)))
}
