//! Version information blocks (versions 7-40)
use crate::coding::bch;
use crate::models::{Module, ModuleMatrix, Version};

/// Coordinates of version bit `i`: the block above the bottom-left
/// finder and its transpose left of the top-right finder
pub fn bit_positions(width: usize, i: usize) -> [(usize, usize); 2] {
    let a = width - 11 + i % 3;
    let b = i / 3;
    [(b, a), (a, b)]
}

/// Mark both 6x3 blocks as light function modules; no-op below version 7
pub fn reserve(matrix: &mut ModuleMatrix, version: Version) {
    if !version.has_version_info() {
        return;
    }
    let width = matrix.width();
    for i in 0..18 {
        for (x, y) in bit_positions(width, i) {
            matrix.set(x, y, Module::FunctionLight);
        }
    }
}

/// Write the 18-bit version word; no-op below version 7
pub fn stamp(matrix: &mut ModuleMatrix, version: Version) {
    if !version.has_version_info() {
        return;
    }
    let word = bch::version_word(version);
    let width = matrix.width();
    for i in 0..18 {
        let dark = (word >> i) & 1 == 1;
        for (x, y) in bit_positions(width, i) {
            matrix.set(x, y, Module::function(dark));
        }
    }
}

/// Raw 18-bit word from one block (0 or 1)
pub fn read_word(matrix: &ModuleMatrix, copy: usize) -> u32 {
    let width = matrix.width();
    (0..18).fold(0u32, |word, i| {
        let (x, y) = bit_positions(width, i)[copy];
        word | (matrix.is_dark(x, y) as u32) << i
    })
}

/// Version recovered from either block, if the symbol is large enough to carry one
pub fn read(matrix: &ModuleMatrix) -> Option<Version> {
    if matrix.width() < 45 {
        return None;
    }
    (0..2).find_map(|copy| bch::decode_version_word(read_word(matrix, copy)))
}
