use serde::{Deserialize, Serialize};

use crate::glass::Glass;
use crate::types::Plot;

/// Read-only picture of a glass for presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassSnapshot {
    pub width: u32,
    pub height: u32,
    pub dropped: Vec<Plot>,
    pub current: Vec<Plot>,
    pub game_over: bool,
}

impl GlassSnapshot {
    pub fn capture<G: Glass + ?Sized>(glass: &G, game_over: bool) -> Self {
        Self {
            width: glass.width(),
            height: glass.height(),
            dropped: glass.dropped_plots(),
            current: glass.current_figure_plots(),
            game_over,
        }
    }

    /// Rows top to bottom, `.` for empty, `#` for landed and `@` for falling cells
    pub fn to_ascii(&self) -> Vec<String> {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut grid = vec![vec!['.'; width]; height];
        let layers = [(&self.dropped, '#'), (&self.current, '@')];
        for (plots, mark) in layers {
            for plot in plots.iter() {
                if let Some(cell) = grid
                    .get_mut(plot.y as usize)
                    .and_then(|row| row.get_mut(plot.x as usize))
                {
                    *cell = mark;
                }
            }
        }
        grid.iter().rev().map(|row| row.iter().collect()).collect()
    }
}
