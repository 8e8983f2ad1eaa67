//! Scoring module - fixed line-clear table, drop points and level progression
//!
//! `level` has one definition, [`level_for_lines`]. Line clears are scored
//! with the level in effect *before* the cleared lines are counted.

use crate::types::{BASE_DROP_MS, HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in one lock at `level`
///
/// Counts outside the table (0, or more than 4) score nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Points for a hard drop that travelled `cells` rows
pub fn hard_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Level for a running total of cleared lines (starts at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds per row
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS / level.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);

        assert_eq!(line_clear_score(1, 3), 300);
        assert_eq!(line_clear_score(4, 5), 4000);
    }

    #[test]
    fn test_out_of_table_clears_score_nothing() {
        assert_eq!(line_clear_score(5, 1), 0);
        assert_eq!(line_clear_score(20, 9), 0);
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0), 0);
        assert_eq!(hard_drop_score(16), 32);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 500);
        assert_eq!(drop_interval_ms(3), 333);
        assert_eq!(drop_interval_ms(0), 1000);
    }
}
