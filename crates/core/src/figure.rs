//! Figure module - immutable figure shapes and their rotation
//!
//! A figure is a set of occupied cells in a small local box, anchored to a pivot cell.
//! Rows are stored as bit patterns, top row first, with the most significant bit of the
//! box being its leftmost column.
//!
//! Placing a figure with its pivot at glass coordinates `(x, y)` maps local cell
//! `(column, row)` to `(x + column - pivot_column, y - (row - pivot_row))`, since glass
//! rows grow upward while local rows grow downward.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{FigureType, PlotColor};

/// Maximum width and height of a figure's local box
pub const MAX_FIGURE_SIZE: usize = 32;

/// Row bit patterns of a figure, top row first
pub type RowCodes = ArrayVec<u32, MAX_FIGURE_SIZE>;

/// Construction errors for [`Figure::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FigureError {
    #[error("figure has no occupied cells")]
    Empty,
    #[error("figure box {width}x{height} exceeds {} cells per side", MAX_FIGURE_SIZE)]
    TooLarge { width: usize, height: usize },
    #[error("pivot ({column}, {row}) lies outside the {width}x{height} figure box")]
    PivotOutside {
        column: usize,
        row: usize,
        width: usize,
        height: usize,
    },
}

/// Immutable figure shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Figure {
    kind: FigureType,
    rows: RowCodes,
    width: u8,
    pivot_column: u8,
    pivot_row: u8,
    left: u8,
    right: u8,
    top: u8,
    bottom: u8,
}

impl Figure {
    /// Parse a figure from text rows, `#` marking occupied cells
    ///
    /// # Examples
    ///
    /// ```
    /// use glass_tetris_core::Figure;
    /// use glass_tetris_core::types::FigureType;
    ///
    /// let figure = Figure::parse(FigureType::J, 1, 1, &[" #", " #", "##"]).unwrap();
    /// assert_eq!(figure.rows(), &[0b01, 0b01, 0b11]);
    /// assert_eq!(figure.extents(), (1, 0, 1, 1));
    /// ```
    pub fn parse(
        kind: FigureType,
        pivot_column: usize,
        pivot_row: usize,
        lines: &[&str],
    ) -> Result<Self, FigureError> {
        let height = lines.len();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        if width > MAX_FIGURE_SIZE || height > MAX_FIGURE_SIZE {
            return Err(FigureError::TooLarge { width, height });
        }
        if pivot_column >= width || pivot_row >= height {
            return Err(FigureError::PivotOutside {
                column: pivot_column,
                row: pivot_row,
                width,
                height,
            });
        }

        let mut rows = RowCodes::new();
        for line in lines {
            let code = line
                .chars()
                .enumerate()
                .filter(|&(_, c)| c == '#')
                .fold(0u32, |acc, (i, _)| acc | 1 << (width - 1 - i));
            rows.push(code);
        }

        if rows.iter().all(|&code| code == 0) {
            return Err(FigureError::Empty);
        }

        Ok(Self::from_parts(
            kind,
            rows,
            width as u8,
            pivot_column as u8,
            pivot_row as u8,
        ))
    }

    /// Single-cell figure
    pub fn point() -> Self {
        Self::from_codes(FigureType::I, 1, (0, 0), &[0b1])
    }

    /// The standard tetromino of the given kind in its spawn orientation
    pub fn standard(kind: FigureType) -> Self {
        match kind {
            // Vertical bar, pivot on the second cell from the top
            FigureType::I => Self::from_codes(kind, 1, (0, 1), &[0b1, 0b1, 0b1, 0b1]),
            FigureType::O => Self::from_codes(kind, 2, (0, 0), &[0b11, 0b11]),
            FigureType::T => Self::from_codes(kind, 3, (1, 0), &[0b111, 0b010]),
            FigureType::S => Self::from_codes(kind, 3, (1, 0), &[0b011, 0b110]),
            FigureType::Z => Self::from_codes(kind, 3, (1, 0), &[0b110, 0b011]),
            FigureType::J => Self::from_codes(kind, 2, (1, 1), &[0b01, 0b01, 0b11]),
            FigureType::L => Self::from_codes(kind, 2, (0, 1), &[0b10, 0b10, 0b11]),
        }
    }

    fn from_codes(kind: FigureType, width: u8, pivot: (u8, u8), codes: &[u32]) -> Self {
        let rows = codes.iter().copied().collect();
        Self::from_parts(kind, rows, width, pivot.0, pivot.1)
    }

    fn from_parts(
        kind: FigureType,
        rows: RowCodes,
        width: u8,
        pivot_column: u8,
        pivot_row: u8,
    ) -> Self {
        let mut figure = Self {
            kind,
            rows,
            width,
            pivot_column,
            pivot_row,
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        };

        let (pc, pr) = (pivot_column as i32, pivot_row as i32);
        let (mut left, mut right, mut top, mut bottom) = (0, 0, 0, 0);
        for (column, row) in figure.local_cells() {
            left = left.max(pc - column);
            right = right.max(column - pc);
            top = top.max(pr - row);
            bottom = bottom.max(row - pr);
        }
        figure.left = left as u8;
        figure.right = right as u8;
        figure.top = top as u8;
        figure.bottom = bottom as u8;
        figure
    }

    pub fn kind(&self) -> FigureType {
        self.kind
    }

    pub fn color(&self) -> PlotColor {
        self.kind.color()
    }

    /// Row bit patterns, top row first
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Width of the local box
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Height of the local box
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Pivot as (column, row) inside the local box
    pub fn pivot(&self) -> (u32, u32) {
        (self.pivot_column as u32, self.pivot_row as u32)
    }

    /// Distances from the pivot to the farthest occupied cell: (left, right, top, bottom)
    pub fn extents(&self) -> (u32, u32, u32, u32) {
        (
            self.left as u32,
            self.right as u32,
            self.top as u32,
            self.bottom as u32,
        )
    }

    pub fn left(&self) -> u32 {
        self.left as u32
    }

    pub fn right(&self) -> u32 {
        self.right as u32
    }

    pub fn top(&self) -> u32 {
        self.top as u32
    }

    pub fn bottom(&self) -> u32 {
        self.bottom as u32
    }

    /// Occupied cells as local (column, row), row 0 on top
    fn local_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width as i32;
        self.rows.iter().enumerate().flat_map(move |(row, &code)| {
            (0..width)
                .filter(move |&column| code >> (width - 1 - column) & 1 == 1)
                .map(move |column| (column, row as i32))
        })
    }

    /// Occupied cells in glass coordinates with the pivot at `(x, y)`
    pub fn cells_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (pc, pr) = (self.pivot_column as i32, self.pivot_row as i32);
        self.local_cells()
            .map(move |(column, row)| (x + column - pc, y - (row - pr)))
    }

    /// Rotate 90° clockwise around the pivot
    ///
    /// The local box is transposed and mirrored: a cell at local `(column, row)` of a
    /// box `height` rows tall moves to `(height - 1 - row, column)`.
    pub fn rotate(&self) -> Self {
        let height = self.rows.len();
        let width = self.width as usize;

        let mut rows = RowCodes::new();
        for column in 0..width {
            let mut code = 0u32;
            for (row, &old) in self.rows.iter().enumerate() {
                if old >> (width - 1 - column) & 1 == 1 {
                    code |= 1 << row;
                }
            }
            rows.push(code);
        }

        Self::from_parts(
            self.kind,
            rows,
            height as u8,
            (height - 1 - self.pivot_row as usize) as u8,
            self.pivot_column,
        )
    }

    /// Rotate `times` quarter turns clockwise; negative values turn counter-clockwise
    pub fn rotate_times(&self, times: i32) -> Self {
        let mut figure = self.clone();
        for _ in 0..times.rem_euclid(4) {
            figure = figure.rotate();
        }
        figure
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::point()
    }
}
