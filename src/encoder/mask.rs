//! Data masking and mask selection
//!
//! Each of the eight patterns is applied to a copy of the unmasked symbol
//! and scored with the four penalty rules. The lowest score wins; ties go
//! to the lowest pattern index.

use crate::models::{MaskPattern, ModuleMatrix};
use rayon::prelude::*;
use tracing::{debug, trace};

/// XOR `mask` over every data module; function modules are left alone
pub fn apply_mask(matrix: &mut ModuleMatrix, mask: MaskPattern) {
    let width = matrix.width();
    for y in 0..width {
        for x in 0..width {
            if mask.is_masked(y, x) {
                matrix.toggle_data(x, y);
            }
        }
    }
}

/// Penalty breakdown for one masked symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Penalty {
    /// Runs of five or more same-colored modules
    pub runs: i64,
    /// 2x2 single-color blocks
    pub blocks: i64,
    /// Finder-like 1:1:3:1:1 patterns next to four light modules
    pub finder_like: i64,
    /// Dark/light balance term
    pub balance: i64,
}

impl Penalty {
    /// Sum of the four rules
    pub fn total(&self) -> i64 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Score a masked symbol; lower is better
pub fn penalty(matrix: &ModuleMatrix) -> Penalty {
    let width = matrix.width();
    let rows: Vec<Vec<bool>> = matrix
        .rows()
        .map(|row| row.iter().map(|m| m.is_dark()).collect())
        .collect();
    let cols: Vec<Vec<bool>> = (0..width)
        .map(|x| rows.iter().map(|row| row[x]).collect())
        .collect();

    let runs = rows.iter().chain(&cols).map(|line| run_penalty(line)).sum();
    let finder_like = rows
        .iter()
        .chain(&cols)
        .map(|line| finder_penalty(line))
        .sum();

    Penalty {
        runs,
        blocks: block_penalty(&rows),
        finder_like,
        balance: balance_penalty(matrix.dark_count(), width * width),
    }
}

// run of n >= 5 costs n - 2
fn run_penalty(line: &[bool]) -> i64 {
    let mut score = 0;
    let mut run = 0i64;
    let mut last = None;
    for &dark in line {
        if last == Some(dark) {
            run += 1;
        } else {
            if run >= 5 {
                score += run - 2;
            }
            run = 1;
            last = Some(dark);
        }
    }
    if run >= 5 {
        score += run - 2;
    }
    score
}

fn block_penalty(rows: &[Vec<bool>]) -> i64 {
    let mut score = 0;
    for pair in rows.windows(2) {
        let (top, bottom) = (&pair[0], &pair[1]);
        for x in 0..top.len().saturating_sub(1) {
            let color = top[x];
            if top[x + 1] == color && bottom[x] == color && bottom[x + 1] == color {
                score += 3;
            }
        }
    }
    score
}

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

fn finder_penalty(line: &[bool]) -> i64 {
    let width = line.len();
    let all_light = |range: std::ops::Range<usize>| line[range].iter().all(|&d| !d);
    let mut score = 0;
    for i in 4..width.saturating_sub(7) {
        if line[i..i + 7] != FINDER_LIKE {
            continue;
        }
        if all_light(i - 4..i) || (i + 11 < width && all_light(i + 7..i + 11)) {
            score += 40;
        }
    }
    score
}

// Integer ratio, so every practical symbol lands on the same constant
fn balance_penalty(dark: usize, total: usize) -> i64 {
    let ratio = (dark / total.max(1)) as i64;
    let lower = 20 * ratio - 10;
    let upper = lower + 1;
    10 * lower.max(upper)
}

fn score_mask(matrix: &ModuleMatrix, mask: MaskPattern) -> (i64, ModuleMatrix) {
    let mut candidate = matrix.clone();
    apply_mask(&mut candidate, mask);
    let score = penalty(&candidate);
    trace!(
        mask = mask.index(),
        runs = score.runs,
        blocks = score.blocks,
        finder_like = score.finder_like,
        balance = score.balance,
        "mask penalty"
    );
    (score.total(), candidate)
}

// First index holding the minimum; only a strictly lower score replaces it
fn lowest_score_index(scores: &[i64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score < scores[best] {
            best = i;
        }
    }
    best
}

/// Pick the best mask for an unmasked symbol and return it applied
///
/// With `parallel` the eight candidates are scored on the rayon pool; all
/// scores are collected before choosing, so both paths agree.
pub fn select_mask(matrix: &ModuleMatrix, parallel: bool) -> (MaskPattern, ModuleMatrix) {
    let scored: Vec<(i64, ModuleMatrix)> = if parallel {
        MaskPattern::ALL
            .par_iter()
            .map(|&mask| score_mask(matrix, mask))
            .collect()
    } else {
        MaskPattern::ALL
            .iter()
            .map(|&mask| score_mask(matrix, mask))
            .collect()
    };

    let scores: Vec<i64> = scored.iter().map(|(s, _)| *s).collect();
    let best = lowest_score_index(&scores);
    debug!(?scores, winner = best, parallel, "mask selected");

    let mask = MaskPattern::ALL[best];
    let masked = scored
        .into_iter()
        .nth(best)
        .map(|(_, m)| m)
        .unwrap_or_else(|| matrix.clone());
    (mask, masked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Module;

    fn line(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty(&line("1111")), 0);
        assert_eq!(run_penalty(&line("11111")), 3);
        assert_eq!(run_penalty(&line("0111111")), 4);
        // trailing run counts too
        assert_eq!(run_penalty(&line("10000000")), 5);
        assert_eq!(run_penalty(&line("000001111110")), 3 + 4);
    }

    #[test]
    fn test_block_penalty() {
        let rows = vec![line("110"), line("110"), line("001")];
        assert_eq!(block_penalty(&rows), 3);
        let rows = vec![line("000"), line("000")];
        assert_eq!(block_penalty(&rows), 6);
    }

    #[test]
    fn test_finder_penalty() {
        assert_eq!(finder_penalty(&line("000010111010")), 40);
        assert_eq!(finder_penalty(&line("1000101110100001")), 40);
        assert_eq!(finder_penalty(&line("1001101110110011")), 0);
        // the pattern alone, with nothing light before it, is not enough
        assert_eq!(finder_penalty(&line("10111010")), 0);
    }

    #[test]
    fn test_balance_penalty_integer_ratio() {
        assert_eq!(balance_penalty(200, 441), -90);
        assert_eq!(balance_penalty(0, 441), -90);
        assert_eq!(balance_penalty(441, 441), 110);
    }

    #[test]
    fn test_lowest_score_prefers_first_index() {
        assert_eq!(lowest_score_index(&[5, 3, 3, 9]), 1);
        assert_eq!(lowest_score_index(&[7, 7, 7, 7, 7, 7, 7, 7]), 0);
        assert_eq!(lowest_score_index(&[4, 9, 2, 8, 2, 2, 6, 2]), 2);
        assert_eq!(lowest_score_index(&[-90, -90, -91, -91]), 2);
    }

    #[test]
    fn test_equal_scores_select_pattern0() {
        // nothing maskable, so every candidate scores the same
        let mut matrix = ModuleMatrix::new(21);
        for y in 0..21 {
            for x in 0..21 {
                matrix.set(x, y, Module::function((x + 2 * y) % 3 == 0));
            }
        }
        for parallel in [false, true] {
            let (mask, masked) = select_mask(&matrix, parallel);
            assert_eq!(mask, MaskPattern::Pattern0);
            assert_eq!(masked, matrix);
        }
    }

    #[test]
    fn test_apply_mask_skips_function_modules() {
        let mut matrix = ModuleMatrix::new(4);
        matrix.set(0, 0, Module::FunctionLight);
        matrix.set(1, 0, Module::DataLight);
        matrix.set(2, 0, Module::DataLight);
        apply_mask(&mut matrix, MaskPattern::Pattern0);
        // (x=0,y=0) is masked but a function module
        assert_eq!(matrix.get(0, 0), Module::FunctionLight);
        assert_eq!(matrix.get(1, 0), Module::DataLight);
        assert_eq!(matrix.get(2, 0), Module::DataDark);
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let mut matrix = ModuleMatrix::new(21);
        for y in 0..21 {
            for x in 0..21 {
                matrix.set(x, y, Module::data((x * 7 + y * 3) % 5 == 0));
            }
        }
        let serial = select_mask(&matrix, false);
        let parallel = select_mask(&matrix, true);
        assert_eq!(serial.0, parallel.0);
        assert_eq!(serial.1, parallel.1);
    }
}
