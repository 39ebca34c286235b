//! Shared types - figure kinds, plot colors and glass dimensions
//!
//! Pure data structures used by the glass, the game stepper and any presentation
//! layer reading plots out of the glass.
//!
//! # Glass Coordinates
//!
//! - **Columns**: `x` ranges `0..width` (left to right)
//! - **Rows**: `y` ranges `0..height`, row 0 is the floor and `y` grows upward
//! - **Spawn row**: row `height`, directly above the visible field
//!
//! # Examples
//!
//! ```
//! use glass_tetris_types::{FigureType, PlotColor, GLASS_HEIGHT, GLASS_WIDTH};
//!
//! let kind = FigureType::from_str("t").unwrap();
//! assert_eq!(kind, FigureType::T);
//! assert_eq!(kind.color(), PlotColor::Magenta);
//!
//! assert_eq!(GLASS_WIDTH, 10);
//! assert_eq!(GLASS_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default glass width in cells (10 columns)
pub const GLASS_WIDTH: u32 = 10;

/// Default glass height in cells (20 rows)
pub const GLASS_HEIGHT: u32 = 20;

/// Points for every figure that lands
pub const FIGURE_DROP_SCORE: u32 = 10;

/// Points for rows removed by a single landing
///
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 700 points
/// - 4 lines: 1500 points
///
/// Landings removing more than four rows score each full group of four at the
/// four-line rate plus the remainder from this table.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// The seven figure kinds
///
/// Each kind carries a distinct plot color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl FigureType {
    /// All kinds in bag order
    pub const ALL: [FigureType; 7] = [
        FigureType::I,
        FigureType::O,
        FigureType::T,
        FigureType::S,
        FigureType::Z,
        FigureType::J,
        FigureType::L,
    ];

    /// Parse figure kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use glass_tetris_types::FigureType;
    ///
    /// assert_eq!(FigureType::from_str("i"), Some(FigureType::I));
    /// assert_eq!(FigureType::from_str("J"), Some(FigureType::J));
    /// assert_eq!(FigureType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(FigureType::I),
            "o" => Some(FigureType::O),
            "t" => Some(FigureType::T),
            "s" => Some(FigureType::S),
            "z" => Some(FigureType::Z),
            "j" => Some(FigureType::J),
            "l" => Some(FigureType::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FigureType::I => "i",
            FigureType::O => "o",
            FigureType::T => "t",
            FigureType::S => "s",
            FigureType::Z => "z",
            FigureType::J => "j",
            FigureType::L => "l",
        }
    }

    /// Plot color used for cells of this kind
    pub fn color(&self) -> PlotColor {
        match self {
            FigureType::I => PlotColor::Cyan,
            FigureType::O => PlotColor::Yellow,
            FigureType::T => PlotColor::Magenta,
            FigureType::S => PlotColor::Green,
            FigureType::Z => PlotColor::Red,
            FigureType::J => PlotColor::Blue,
            FigureType::L => PlotColor::Orange,
        }
    }
}

/// Color marker of an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotColor {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

/// A single colored cell at absolute glass coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plot {
    pub x: i32,
    pub y: i32,
    pub color: PlotColor,
}

impl Plot {
    pub fn new(x: i32, y: i32, color: PlotColor) -> Self {
        Self { x, y, color }
    }
}

/// A cell of the glass
///
/// - `None`: Empty cell
/// - `Some(PlotColor)`: Occupied by a landed figure
pub type Cell = Option<PlotColor>;
