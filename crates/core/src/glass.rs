//! Glass module - the playing field and its collision authority
//!
//! The glass is a `width x height` grid of cells stored as a flat row-major vector.
//! Row 0 is the floor and rows grow upward. Row `height` is the spawn row: it is never
//! occupied, and a figure may overlap it while it waits to enter the field.
//!
//! The glass decides whether a placement is legal ([`Glass::accept`]), lands figures
//! ([`Glass::drop`]), removes full rows and tells its listeners about it.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::figure::Figure;
use crate::types::{Cell, Plot};

/// Receives glass lifecycle notifications
///
/// Listeners are shared with the glass and notified synchronously, in registration
/// order. A listener must not call back into the glass while being notified.
pub trait GlassEventListener {
    /// A figure was merged into the glass
    fn figure_dropped(&self, figure: &Figure);

    /// Full rows were removed by a single landing
    fn lines_removed(&self, count: u32);

    /// The glass was emptied (game over or reset)
    fn glass_overflown(&self);
}

/// Collision and landing authority driven by the game stepper
pub trait Glass {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Whether every cell of `figure` with its pivot at `(x, y)` is inside the glass
    /// (the spawn row included) and free
    fn accept(&self, figure: &Figure, x: i32, y: i32) -> bool;

    /// Record where the falling figure is now, for rendering only
    fn figure_at(&mut self, figure: &Figure, x: i32, y: i32);

    /// Land `figure` from `(x, y)`, returning false when nothing was merged
    fn drop(&mut self, figure: &Figure, x: i32, y: i32) -> bool;

    /// Clear every cell and report an overflow
    fn empty(&mut self);

    fn is_empty(&self) -> bool;

    /// Landed cells
    fn dropped_plots(&self) -> Vec<Plot>;

    /// Cells of the falling figure as last reported through [`Glass::figure_at`]
    fn current_figure_plots(&self) -> Vec<Plot>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlassError {
    #[error("glass dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// The standard glass implementation
pub struct TetrisGlass {
    width: u32,
    height: u32,
    /// Flat array of cells, row-major order (y * width + x), row 0 at the floor
    cells: Vec<Cell>,
    current: Vec<Plot>,
    listeners: Vec<Rc<dyn GlassEventListener>>,
}

impl TetrisGlass {
    /// Create an empty glass notifying `listeners` in the given order
    pub fn new(
        width: u32,
        height: u32,
        listeners: Vec<Rc<dyn GlassEventListener>>,
    ) -> Result<Self, GlassError> {
        if width == 0 || height == 0 {
            return Err(GlassError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
            current: Vec::new(),
            listeners,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells[start..start + width].iter().all(|cell| cell.is_some())
    }

    /// Whether the figure could occupy `(x, y)` while falling: inside the side walls,
    /// above the floor and not overlapping landed cells. Rows above the field are free.
    fn fits(&self, figure: &Figure, x: i32, y: i32) -> bool {
        figure.cells_at(x, y).all(|(column, row)| {
            column >= 0
                && column < self.width as i32
                && row >= 0
                && (row >= self.height as i32 || !self.is_occupied(column, row))
        })
    }

    /// Remove all full rows, compacting the rows above them downward
    /// Two-pointer pass from the floor up; returns the number of rows removed
    fn clear_full_rows(&mut self) -> u32 {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut removed = 0;
        let mut write_y = 0;

        for read_y in 0..height {
            if self.is_row_full(read_y) {
                removed += 1;
            } else {
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
                write_y += 1;
            }
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }

        removed
    }
}

impl Glass for TetrisGlass {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn accept(&self, figure: &Figure, x: i32, y: i32) -> bool {
        self.fits(figure, x, y)
            && figure
                .cells_at(x, y)
                .all(|(_, row)| row <= self.height as i32)
    }

    fn figure_at(&mut self, figure: &Figure, x: i32, y: i32) {
        let color = figure.color();
        let (width, height) = (self.width as i32, self.height as i32);
        self.current = figure
            .cells_at(x, y)
            .filter(|&(column, row)| (0..width).contains(&column) && (0..height).contains(&row))
            .map(|(column, row)| Plot::new(column, row, color))
            .collect();
    }

    fn drop(&mut self, figure: &Figure, x: i32, y: i32) -> bool {
        if !self.fits(figure, x, y) {
            trace!(x, y, "drop ignored: start position blocked or outside");
            return false;
        }

        let mut landing_y = y;
        while self.fits(figure, x, landing_y - 1) {
            landing_y -= 1;
        }

        if figure
            .cells_at(x, landing_y)
            .any(|(_, row)| row >= self.height as i32)
        {
            debug!(x, landing_y, "drop ignored: figure does not fit inside the glass");
            return false;
        }

        let color = figure.color();
        for (column, row) in figure.cells_at(x, landing_y) {
            if let Some(idx) = self.index(column, row) {
                self.cells[idx] = Some(color);
            }
        }

        let removed = self.clear_full_rows();
        debug!(kind = figure.kind().as_str(), x, landing_y, removed, "figure landed");

        for listener in &self.listeners {
            listener.figure_dropped(figure);
        }
        if removed > 0 {
            for listener in &self.listeners {
                listener.lines_removed(removed);
            }
        }
        true
    }

    fn empty(&mut self) {
        debug!(listeners = self.listeners.len(), "glass emptied");
        for cell in &mut self.cells {
            *cell = None;
        }
        for listener in &self.listeners {
            listener.glass_overflown();
        }
    }

    fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    fn dropped_plots(&self) -> Vec<Plot> {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.map(|color| Plot::new((idx % width) as i32, (idx / width) as i32, color))
            })
            .collect()
    }

    fn current_figure_plots(&self) -> Vec<Plot> {
        self.current.clone()
    }
}

impl fmt::Debug for TetrisGlass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TetrisGlass")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("occupied", &self.cells.iter().filter(|c| c.is_some()).count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FigureType, PlotColor};

    fn glass() -> TetrisGlass {
        TetrisGlass::new(10, 20, Vec::new()).unwrap()
    }

    fn fill_row(glass: &mut TetrisGlass, y: i32, except: Option<i32>) {
        for x in 0..glass.width() as i32 {
            if Some(x) != except {
                let idx = glass.index(x, y).unwrap();
                glass.cells[idx] = Some(PlotColor::Red);
            }
        }
    }

    #[test]
    fn test_index_calculation() {
        let glass = glass();
        assert_eq!(glass.index(0, 0), Some(0));
        assert_eq!(glass.index(9, 0), Some(9));
        assert_eq!(glass.index(0, 1), Some(10));
        assert_eq!(glass.index(9, 19), Some(199));
        assert_eq!(glass.index(-1, 0), None);
        assert_eq!(glass.index(10, 0), None);
        assert_eq!(glass.index(0, 20), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            TetrisGlass::new(0, 20, Vec::new()).unwrap_err(),
            GlassError::InvalidDimensions {
                width: 0,
                height: 20
            }
        );
        assert!(TetrisGlass::new(10, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_clear_full_rows_compacts_downward() {
        let mut glass = glass();
        fill_row(&mut glass, 0, None);
        fill_row(&mut glass, 1, Some(3));
        fill_row(&mut glass, 2, None);
        let idx = glass.index(7, 3).unwrap();
        glass.cells[idx] = Some(PlotColor::Blue);

        assert_eq!(glass.clear_full_rows(), 2);

        // Row 1 dropped to the floor, row 3 to row 1
        assert!(!glass.is_occupied(3, 0));
        assert!(glass.is_occupied(4, 0));
        assert_eq!(glass.get(7, 1), Some(Some(PlotColor::Blue)));
        assert!(!glass.is_occupied(7, 2));
        assert!(!glass.is_occupied(7, 3));
    }

    #[test]
    fn test_accept_allows_spawn_row_only() {
        let glass = glass();
        let point = Figure::point();
        assert!(glass.accept(&point, 0, 20));
        assert!(!glass.accept(&point, 0, 21));

        let two_rows = Figure::parse(FigureType::I, 0, 1, &["#", "#"]).unwrap();
        assert!(glass.accept(&two_rows, 0, 19));
        assert!(!glass.accept(&two_rows, 0, 20));
    }

    #[test]
    fn test_drop_from_spawn_row_lands_on_floor() {
        let mut glass = glass();
        assert!(glass.drop(&Figure::standard(FigureType::O), 4, 20));
        assert!(glass.is_occupied(4, 0));
        assert!(glass.is_occupied(5, 1));
        assert_eq!(glass.dropped_plots().len(), 4);
    }

    #[test]
    fn test_figure_at_hides_spawn_row_cells() {
        let mut glass = glass();
        let vertical = Figure::standard(FigureType::I);
        glass.figure_at(&vertical, 4, 19);
        let plots = glass.current_figure_plots();
        assert_eq!(plots.len(), 3);
        assert!(plots.iter().all(|p| p.y < 20 && p.color == PlotColor::Cyan));
    }
}
