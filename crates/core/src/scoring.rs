//! Scoring module - a score board fed by glass events
//!
//! [`PlayerScores`] is a [`GlassEventListener`]: share it with the glass through an
//! `Rc` and read the totals back from the same handle.

use std::cell::Cell;

use tracing::info;

use crate::figure::Figure;
use crate::glass::GlassEventListener;
use crate::types::{FIGURE_DROP_SCORE, LINE_SCORES};

/// Points for `lines` rows removed by one landing
pub fn calculate_lines_score(lines: u32) -> u32 {
    let fours = lines / 4;
    let rest = (lines % 4) as usize;
    fours
        .saturating_mul(LINE_SCORES[4])
        .saturating_add(LINE_SCORES[rest])
}

/// Running score of one player
#[derive(Debug, Default)]
pub struct PlayerScores {
    score: Cell<u32>,
    lines: Cell<u32>,
    figures: Cell<u32>,
}

impl PlayerScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    /// Rows removed since the last overflow
    pub fn lines(&self) -> u32 {
        self.lines.get()
    }

    /// Figures landed since the last overflow
    pub fn figures(&self) -> u32 {
        self.figures.get()
    }

    fn add(&self, points: u32) {
        self.score.set(self.score.get().saturating_add(points));
    }
}

impl GlassEventListener for PlayerScores {
    fn figure_dropped(&self, _figure: &Figure) {
        self.figures.set(self.figures.get() + 1);
        self.add(FIGURE_DROP_SCORE);
    }

    fn lines_removed(&self, count: u32) {
        self.lines.set(self.lines.get() + count);
        self.add(calculate_lines_score(count));
    }

    fn glass_overflown(&self) {
        info!(
            score = self.score.get(),
            lines = self.lines.get(),
            "glass overflown, score reset"
        );
        self.score.set(0);
        self.lines.set(0);
        self.figures.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_score_table() {
        assert_eq!(calculate_lines_score(0), 0);
        assert_eq!(calculate_lines_score(1), 100);
        assert_eq!(calculate_lines_score(2), 300);
        assert_eq!(calculate_lines_score(3), 700);
        assert_eq!(calculate_lines_score(4), 1500);
        assert_eq!(calculate_lines_score(5), 1600);
        assert_eq!(calculate_lines_score(8), 3000);
    }

    #[test]
    fn test_scores_accumulate() {
        let scores = PlayerScores::new();
        scores.figure_dropped(&Figure::point());
        scores.figure_dropped(&Figure::point());
        scores.lines_removed(2);

        assert_eq!(scores.figures(), 2);
        assert_eq!(scores.lines(), 2);
        assert_eq!(scores.score(), 2 * FIGURE_DROP_SCORE + 300);
    }

    #[test]
    fn test_overflow_resets() {
        let scores = PlayerScores::new();
        scores.figure_dropped(&Figure::point());
        scores.lines_removed(1);

        scores.glass_overflown();

        assert_eq!(scores.score(), 0);
        assert_eq!(scores.lines(), 0);
        assert_eq!(scores.figures(), 0);
    }
}
