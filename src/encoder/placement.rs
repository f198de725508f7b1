//! Zig-zag placement of codeword bits into the data area
use crate::models::{Module, ModuleMatrix};

/// Data module coordinates in placement order
///
/// Two-column strips are walked from the right edge, alternating upward
/// and downward, right column first within each row. Column 6 (the
/// vertical timing line) is skipped entirely.
pub fn data_positions(matrix: &ModuleMatrix) -> Vec<(usize, usize)> {
    let dimension = matrix.width();
    let mut positions = Vec::with_capacity(dimension * dimension);
    let mut upward = true;
    let mut col = dimension as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        let mut visit = |row: usize| {
            for c in [col, col - 1] {
                let x = c as usize;
                if !matrix.is_function(x, row) {
                    positions.push((x, row));
                }
            }
        };

        if upward {
            (0..dimension).rev().for_each(&mut visit);
        } else {
            (0..dimension).for_each(&mut visit);
        }

        upward = !upward;
        col -= 2;
    }

    positions
}

/// Write codeword bits MSB-first into the data area
///
/// Modules left over once the bits run out (remainder bits) become light
/// data modules. Returns the number of remainder modules.
pub fn place_codewords(matrix: &mut ModuleMatrix, codewords: &[u8]) -> usize {
    let positions = data_positions(matrix);
    let mut bits = codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1));
    let mut remainder = 0;
    for (x, y) in positions {
        match bits.next() {
            Some(dark) => matrix.set(x, y, Module::data(dark)),
            None => {
                matrix.set(x, y, Module::DataLight);
                remainder += 1;
            }
        }
    }
    remainder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::place_function_patterns;
    use crate::encoder::tables::raw_data_modules;
    use crate::models::Version;

    fn skeleton(n: u8) -> ModuleMatrix {
        let version = Version::new(n).unwrap();
        let mut matrix = ModuleMatrix::new(version.size());
        place_function_patterns(&mut matrix, version);
        matrix
    }

    #[test]
    fn test_walk_order_version_1() {
        let matrix = skeleton(1);
        let positions = data_positions(&matrix);
        assert_eq!(positions.len(), 208);
        // starts bottom-right, right column first, moving up
        assert_eq!(&positions[..4], &[(20, 20), (19, 20), (20, 19), (19, 19)]);
        // first strip turns at row 9, under the top-right format area
        assert_eq!(positions[23], (19, 9));
        assert_eq!(positions[24], (18, 9));
        // final module sits left of the bottom-left separator strip
        assert_eq!(positions.last(), Some(&(0, 12)));
        assert!(positions.iter().all(|&(x, _)| x != 6));
    }

    #[test]
    fn test_every_data_module_visited_once() {
        for n in [1u8, 5, 7, 22, 40] {
            let matrix = skeleton(n);
            let mut positions = data_positions(&matrix);
            let count = positions.len();
            positions.sort_unstable();
            positions.dedup();
            assert_eq!(positions.len(), count);
            assert_eq!(count, raw_data_modules(Version::new(n).unwrap()));
        }
    }

    #[test]
    fn test_remainder_modules_are_light_data() {
        let mut matrix = skeleton(2);
        // 2-L: 44 codewords fill 352 of 359 modules
        let remainder = place_codewords(&mut matrix, &[0xFF; 44]);
        assert_eq!(remainder, 7);
        assert!(matrix.is_resolved());
        let positions = data_positions(&skeleton(2));
        for &(x, y) in &positions[352..] {
            assert_eq!(matrix.get(x, y), Module::DataLight);
        }
        for &(x, y) in &positions[..352] {
            assert_eq!(matrix.get(x, y), Module::DataDark);
        }
    }
}
