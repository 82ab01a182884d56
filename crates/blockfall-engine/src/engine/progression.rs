use std::time::Duration;

use crate::core::piece::PieceKind;

/// Milliseconds between gravity steps, indexed by level.
///
/// Levels above [`MAX_SPEED_LEVEL`] reuse the last entry.
pub const FALL_INTERVALS_MS: [u32; 30] = [
    800, 716, 633, 550, 466, 383, 300, 216, 133, 100, 83, 83, 83, 66, 66, 66, 50, 50, 50, 33, 33,
    33, 33, 33, 33, 33, 33, 33, 33, 16,
];

pub const MAX_SPEED_LEVEL: u32 = 29;

/// Base points for clearing 0..=4 rows at once, multiplied by `level + 1`.
pub const LINE_CLEAR_POINTS: [u64; 5] = [0, 40, 100, 300, 1200];

/// Rows that must be destroyed per level-up.
pub const LINES_PER_LEVEL: usize = 10;

/// Level, speed, score and statistics of one game.
///
/// Points are first accumulated as *earned* and only folded into the
/// visible score by [`Self::update_score`], once per landing.
///
/// # Example
///
/// ```
/// use blockfall_engine::Progression;
///
/// let mut progression = Progression::new(2);
/// progression.award_line_clear(4);
/// assert_eq!(progression.update_score(), 3600);
/// assert_eq!(progression.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    level: u32,
    fall_interval_ms: u32,
    destroyed_lines: usize,
    score: u64,
    earned_points: u64,
    piece_counts: [u32; PieceKind::LEN],
    line_cleared_counter: [u32; 5],
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0)
    }
}

fn fall_interval_for(level: u32) -> u32 {
    FALL_INTERVALS_MS[level.min(MAX_SPEED_LEVEL) as usize]
}

impl Progression {
    #[must_use]
    pub fn new(start_level: u32) -> Self {
        Self {
            level: start_level,
            fall_interval_ms: fall_interval_for(start_level),
            destroyed_lines: 0,
            score: 0,
            earned_points: 0,
            piece_counts: [0; PieceKind::LEN],
            line_cleared_counter: [0; 5],
        }
    }

    /// Like [`Self::new`], but as if `destroyed_lines` rows had already been
    /// cleared at the starting level.
    #[must_use]
    pub fn with_destroyed_lines(start_level: u32, destroyed_lines: usize) -> Self {
        Self {
            destroyed_lines,
            ..Self::new(start_level)
        }
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.fall_interval_ms))
    }

    #[must_use]
    pub const fn destroyed_lines(&self) -> usize {
        self.destroyed_lines
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Points not yet folded into [`Self::score`].
    #[must_use]
    pub const fn earned_points(&self) -> u64 {
        self.earned_points
    }

    /// Landed pieces per kind, indexed by [`PieceKind::id`].
    #[must_use]
    pub const fn piece_counts(&self) -> &[u32; PieceKind::LEN] {
        &self.piece_counts
    }

    #[must_use]
    pub const fn piece_count(&self, kind: PieceKind) -> u32 {
        self.piece_counts[kind.id() as usize]
    }

    #[must_use]
    pub fn total_pieces(&self) -> u32 {
        self.piece_counts.iter().sum()
    }

    /// Landings per number of rows cleared at once.
    ///
    /// - `[0]`: landings that cleared nothing
    /// - `[1]`: singles
    /// - `[2]`: doubles
    /// - `[3]`: triples
    /// - `[4]`: tetrises
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u32; 5] {
        &self.line_cleared_counter
    }

    pub fn update_level_and_speed(&mut self, increment: u32) {
        self.level = self.level.saturating_add(increment);
        self.fall_interval_ms = fall_interval_for(self.level);
    }

    /// Adds `lines` to the destroyed total and levels up once if that
    /// crossed a multiple of [`LINES_PER_LEVEL`]. Returns whether it did.
    pub fn update_destroyed_lines(&mut self, lines: usize) -> bool {
        let before = self.destroyed_lines / LINES_PER_LEVEL;
        self.destroyed_lines += lines;
        let after = self.destroyed_lines / LINES_PER_LEVEL;
        if after > before {
            self.update_level_and_speed(1);
            return true;
        }
        false
    }

    /// Earns points for `lines` rows cleared by one landing at the current
    /// level. Counts above 4 are clamped.
    pub fn award_line_clear(&mut self, lines: usize) {
        let lines = lines.min(LINE_CLEAR_POINTS.len() - 1);
        self.earned_points += LINE_CLEAR_POINTS[lines] * (u64::from(self.level) + 1);
        self.line_cleared_counter[lines] += 1;
    }

    pub fn award_soft_drop(&mut self) {
        self.earned_points += 1;
    }

    /// Folds earned points into the score and returns the new score.
    pub fn update_score(&mut self) -> u64 {
        self.score += self.earned_points;
        self.earned_points = 0;
        self.score
    }

    pub fn update_statistics(&mut self, kind: PieceKind) {
        self.piece_counts[kind.id() as usize] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod speed {
        use super::*;

        #[test]
        fn test_interval_follows_level() {
            let mut progression = Progression::new(0);
            assert_eq!(progression.fall_interval_ms(), 800);
            progression.update_level_and_speed(9);
            assert_eq!(progression.level(), 9);
            assert_eq!(progression.fall_interval_ms(), 100);
            assert_eq!(progression.fall_interval(), Duration::from_millis(100));
        }

        #[test]
        fn test_levels_beyond_table_reuse_last_entry() {
            assert_eq!(Progression::new(29).fall_interval_ms(), 16);
            assert_eq!(Progression::new(45).fall_interval_ms(), 16);
        }

        #[test]
        fn test_table_never_speeds_down() {
            assert!(FALL_INTERVALS_MS.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    mod lines {
        use super::*;

        #[test]
        fn test_level_up_on_crossing_ten() {
            let mut progression = Progression::with_destroyed_lines(0, 9);
            assert!(progression.update_destroyed_lines(1));
            assert_eq!(progression.level(), 1);
            assert_eq!(progression.fall_interval_ms(), FALL_INTERVALS_MS[1]);
            assert_eq!(progression.destroyed_lines(), 10);
        }

        #[test]
        fn test_no_level_up_within_decade() {
            let mut progression = Progression::new(3);
            assert!(!progression.update_destroyed_lines(4));
            assert!(!progression.update_destroyed_lines(4));
            assert_eq!(progression.level(), 3);
        }

        #[test]
        fn test_single_level_up_per_update() {
            let mut progression = Progression::with_destroyed_lines(0, 8);
            // 8 -> 22 crosses two multiples of ten but levels up once.
            progression.update_destroyed_lines(14);
            assert_eq!(progression.level(), 1);
            // The next crossing is compared against 22 / 10.
            assert!(!progression.update_destroyed_lines(7));
            assert!(progression.update_destroyed_lines(1));
            assert_eq!(progression.level(), 2);
        }

        #[test]
        fn test_start_level_is_independent_of_lines() {
            let mut progression = Progression::new(5);
            assert!(progression.update_destroyed_lines(10));
            assert_eq!(progression.level(), 6);
        }
    }

    mod score {
        use super::*;

        #[test]
        fn test_line_clear_points_scale_with_level() {
            let mut progression = Progression::new(0);
            progression.award_line_clear(1);
            assert_eq!(progression.earned_points(), 40);

            let mut progression = Progression::new(1);
            progression.award_line_clear(2);
            assert_eq!(progression.earned_points(), 200);
        }

        #[test]
        fn test_score_only_changes_on_update() {
            let mut progression = Progression::new(0);
            progression.award_soft_drop();
            progression.award_soft_drop();
            progression.award_line_clear(3);
            assert_eq!(progression.score(), 0);

            assert_eq!(progression.update_score(), 302);
            assert_eq!(progression.earned_points(), 0);
            assert_eq!(progression.update_score(), 302);
        }

        #[test]
        fn test_histogram() {
            let mut progression = Progression::new(0);
            for lines in [0, 1, 1, 4, 0, 0] {
                progression.award_line_clear(lines);
            }
            assert_eq!(progression.line_cleared_counter(), &[3, 2, 0, 0, 1]);
        }

        #[test]
        fn test_statistics_per_kind() {
            let mut progression = Progression::new(0);
            progression.update_statistics(PieceKind::T);
            progression.update_statistics(PieceKind::T);
            progression.update_statistics(PieceKind::I);
            assert_eq!(progression.piece_count(PieceKind::T), 2);
            assert_eq!(progression.piece_count(PieceKind::I), 1);
            assert_eq!(progression.piece_count(PieceKind::O), 0);
            assert_eq!(progression.total_pieces(), 3);
        }
    }
}
