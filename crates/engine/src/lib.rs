//! Game engine - the tick-driven stepper on top of the core glass
//!
//! [`TetrisGame`] owns a [`FigureQueue`](glass_tetris_core::FigureQueue) and a
//! [`Glass`](glass_tetris_core::Glass). The caller paces the game by calling
//! [`TetrisGame::tick`]; moves, rotation and forced drops are requested in between.
//!
//! # Example
//!
//! ```
//! use glass_tetris_core::{RandomFigureQueue, TetrisGlass};
//! use glass_tetris_engine::TetrisGame;
//!
//! let glass = TetrisGlass::new(10, 20, Vec::new()).unwrap();
//! let mut game = TetrisGame::new(RandomFigureQueue::new(12345), glass);
//!
//! game.move_left(2);
//! game.tick();
//! game.drop();
//! game.tick();
//!
//! assert!(!game.is_game_over());
//! ```

pub mod game;

pub use game::{GameStatus, TetrisGame};
