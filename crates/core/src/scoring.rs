//! Scoring module - classic line-clear scoring, level thresholds and gravity
//!
//! All three are table lookups or closed forms; nothing here depends on game state.

use crate::types::{GRAVITY_TABLE, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS_PER_ROW};

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4, anything else scores 0)
/// level: current level (0-based)
pub fn calculate_score(lines: usize, level: u32) -> u32 {
    if lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Cumulative line count that triggers the next level-up
///
/// The first level-up from the start level needs `start_level * 10 + 10` lines;
/// after that every level needs the total to reach `(level + 1) * 10`.
pub fn lines_for_next_level(start_level: u32, current_level: u32) -> u32 {
    if current_level == start_level {
        start_level
            .saturating_mul(LINES_PER_LEVEL)
            .saturating_add(LINES_PER_LEVEL)
    } else {
        current_level
            .saturating_add(1)
            .saturating_mul(LINES_PER_LEVEL)
    }
}

/// Level reached after `total_lines` cumulative lines, starting from `level`
///
/// Saturates at `u32::MAX`.
pub fn advance_level(start_level: u32, mut level: u32, total_lines: u32) -> u32 {
    while total_lines >= lines_for_next_level(start_level, level) {
        match level.checked_add(1) {
            Some(next) => level = next,
            None => break,
        }
    }
    level
}

/// Frames per row at a level; levels past the table use its last entry
pub fn gravity_frames(level: u32) -> u32 {
    let idx = (level as usize).min(GRAVITY_TABLE.len() - 1);
    GRAVITY_TABLE[idx]
}

/// Calculate soft drop score (+1 per row descended)
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows * SOFT_DROP_POINTS_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_score(1, 0), 40);
        assert_eq!(calculate_score(2, 0), 100);
        assert_eq!(calculate_score(3, 0), 300);
        assert_eq!(calculate_score(4, 0), 1200);

        // Level 9
        assert_eq!(calculate_score(4, 9), 12000);
        assert_eq!(calculate_score(1, 5), 40 * 6);
    }

    #[test]
    fn test_invalid_line_counts_score_zero() {
        assert_eq!(calculate_score(0, 0), 0);
        assert_eq!(calculate_score(0, 18), 0);
        assert_eq!(calculate_score(5, 3), 0);
        assert_eq!(calculate_score(usize::MAX, 3), 0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(lines_for_next_level(0, 0), 10);
        assert_eq!(lines_for_next_level(0, 1), 20);
        assert_eq!(lines_for_next_level(5, 5), 60);
        assert_eq!(lines_for_next_level(5, 6), 70);
    }

    #[test]
    fn test_advance_level() {
        assert_eq!(advance_level(0, 0, 9), 0);
        assert_eq!(advance_level(0, 0, 10), 1);
        assert_eq!(advance_level(0, 0, 25), 2);
        // Start level 5 holds until 60 lines
        assert_eq!(advance_level(5, 5, 59), 5);
        assert_eq!(advance_level(5, 5, 60), 6);
    }

    #[test]
    fn test_advance_level_saturates() {
        assert_eq!(advance_level(0, u32::MAX - 1, u32::MAX), u32::MAX);
        assert_eq!(advance_level(u32::MAX, u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_gravity_table_lookup() {
        assert_eq!(gravity_frames(0), 48);
        assert_eq!(gravity_frames(9), 6);
        assert_eq!(gravity_frames(18), 3);
        assert_eq!(gravity_frames(19), 2);
        assert_eq!(gravity_frames(29), 1);
        assert_eq!(gravity_frames(200), 1);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(0), 0);
        assert_eq!(calculate_drop_score(10), 10);
    }
}
