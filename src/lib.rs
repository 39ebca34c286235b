//! Glass Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one roof: `glass_tetris::{core, engine, types}`.

pub use glass_tetris_core as core;
pub use glass_tetris_engine as engine;
pub use glass_tetris_types as types;
