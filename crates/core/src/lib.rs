//! Core game logic - figures, the glass and figure sources
//!
//! This crate holds the rules of the falling-block game with no dependency on any
//! presentation or I/O layer:
//!
//! - **Deterministic**: the same seed produces the same figure sequence
//! - **Testable**: every rule is exercised through plain values and fake listeners
//! - **Single-threaded**: listeners are shared through `Rc` and notified in order
//!
//! # Module Structure
//!
//! - [`figure`]: immutable figure shapes, extents and rotation
//! - [`glass`]: the playing field, placement checks, landing and row removal
//! - [`rng`]: figure queues (7-bag randomizer, scripted sequences)
//! - [`scoring`]: a score board listening to glass events
//! - [`snapshot`]: serializable read-only view of a glass
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use glass_tetris_core::{Figure, Glass, GlassEventListener, PlayerScores, TetrisGlass};
//! use glass_tetris_core::types::FigureType;
//!
//! let scores = Rc::new(PlayerScores::new());
//! let listeners: Vec<Rc<dyn GlassEventListener>> = vec![scores.clone()];
//! let mut glass = TetrisGlass::new(10, 20, listeners).unwrap();
//!
//! let figure = Figure::standard(FigureType::O);
//! assert!(glass.accept(&figure, 4, 20));
//! assert!(glass.drop(&figure, 4, 20));
//! assert_eq!(scores.figures(), 1);
//! ```

pub mod figure;
pub mod glass;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use glass_tetris_types as types;

// Re-export commonly used types for convenience
pub use figure::{Figure, FigureError, MAX_FIGURE_SIZE};
pub use glass::{Glass, GlassError, GlassEventListener, TetrisGlass};
pub use rng::{FigureQueue, RandomFigureQueue, ScriptedFigureQueue, SimpleRng};
pub use scoring::{calculate_lines_score, PlayerScores};
pub use snapshot::GlassSnapshot;
