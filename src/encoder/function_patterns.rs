//! Fixed patterns of a QR symbol: finders with separators, timing lines,
//! alignment patterns, the dark module, and the reserved format and
//! version areas.

use crate::encoder::tables::alignment_positions;
use crate::encoder::{format, version};
use crate::models::{Module, ModuleMatrix, Version};

/// Place every function pattern for `version` into an empty matrix
pub fn place_function_patterns(matrix: &mut ModuleMatrix, version: Version) {
    place_finder_patterns(matrix);
    place_timing_patterns(matrix);
    place_alignment_patterns(matrix, version);
    place_dark_module(matrix);
    format::reserve(matrix);
    version::reserve(matrix, version);
}

/// Three 7x7 finders in the corners, each with a one-module light separator
pub fn place_finder_patterns(matrix: &mut ModuleMatrix) {
    let width = matrix.width();
    for (left, top) in [(0, 0), (width - 7, 0), (0, width - 7)] {
        place_finder(matrix, left, top);
    }
}

fn place_finder(matrix: &mut ModuleMatrix, left: usize, top: usize) {
    for dy in -1i32..=7 {
        for dx in -1i32..=7 {
            let x = left as i32 + dx;
            let y = top as i32 + dy;
            if x < 0 || y < 0 {
                continue;
            }
            // Chebyshev distance from the finder center: 0-1 core, 2 light ring, 3 border, 4 separator
            let dist = (dx - 3).abs().max((dy - 3).abs());
            let dark = dist <= 1 || dist == 3;
            matrix.set(x as usize, y as usize, Module::function(dark));
        }
    }
}

/// Alternating modules along row 6 and column 6 between the finders
pub fn place_timing_patterns(matrix: &mut ModuleMatrix) {
    let width = matrix.width();
    for i in 8..width.saturating_sub(8) {
        let module = Module::function(i % 2 == 0);
        matrix.set(6, i, module);
        matrix.set(i, 6, module);
    }
}

/// 5x5 alignment patterns at every table position pair except the finder corners
pub fn place_alignment_patterns(matrix: &mut ModuleMatrix, version: Version) {
    let positions = alignment_positions(version);
    let Some(&last) = positions.last() else {
        return;
    };
    let first = positions[0];
    for &cy in positions {
        for &cx in positions {
            let corner = (cx == first && cy == first)
                || (cx == last && cy == first)
                || (cx == first && cy == last);
            if !corner {
                place_alignment(matrix, cx, cy);
            }
        }
    }
}

fn place_alignment(matrix: &mut ModuleMatrix, cx: usize, cy: usize) {
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let dark = dx.abs().max(dy.abs()) != 1;
            let x = (cx as i32 + dx) as usize;
            let y = (cy as i32 + dy) as usize;
            matrix.set(x, y, Module::function(dark));
        }
    }
}

/// Single always-dark module beside the bottom-left finder
pub fn place_dark_module(matrix: &mut ModuleMatrix) {
    let width = matrix.width();
    matrix.set(8, width - 8, Module::FunctionDark);
}
