//! RNG module - figure sources
//!
//! [`FigureQueue`] is what the game stepper pulls new figures from. Two sources ship
//! with the crate:
//!
//! - [`RandomFigureQueue`]: the "7-bag" randomizer. Each bag holds one of each kind
//!   (I, O, T, S, Z, J, L), shuffled; the bag is drained before a new one is drawn.
//! - [`ScriptedFigureQueue`]: a fixed sequence, for replays and tests.
//!
//! Also provides a simple LCG for deterministic shuffling.

use crate::figure::Figure;
use crate::types::FigureType;

/// Supplies the next figure to the game
///
/// Called once when the game is created and once after every landing. A queue is
/// never exhausted.
pub trait FigureQueue {
    fn next(&mut self) -> Figure;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag figure generator
#[derive(Debug, Clone)]
pub struct RandomFigureQueue {
    bag: [FigureType; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl RandomFigureQueue {
    /// Create a new queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: FigureType::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = FigureType::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next kind without drawing it
    ///
    /// Once the bag is drained the next bag is previewed with a copy of the RNG, so the
    /// preview always matches the following draw.
    pub fn peek(&self) -> FigureType {
        if let Some(&kind) = self.bag.get(self.bag_index) {
            return kind;
        }

        let mut preview_rng = self.rng.clone();
        let mut next_bag = FigureType::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Draw the next kind from the bag
    pub fn draw(&mut self) -> FigureType {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    #[cfg(test)]
    fn current_bag(&self) -> &[FigureType] {
        &self.bag[self.bag_index..]
    }
}

impl Default for RandomFigureQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FigureQueue for RandomFigureQueue {
    fn next(&mut self) -> Figure {
        Figure::standard(self.draw())
    }
}

/// Plays back a fixed list of figures; the last one repeats once the list runs out
#[derive(Debug, Clone)]
pub struct ScriptedFigureQueue {
    figures: Vec<Figure>,
    index: usize,
}

impl ScriptedFigureQueue {
    /// An empty script yields single-cell figures.
    pub fn new(figures: Vec<Figure>) -> Self {
        Self { figures, index: 0 }
    }

    pub fn from_kinds(kinds: &[FigureType]) -> Self {
        Self::new(kinds.iter().map(|&kind| Figure::standard(kind)).collect())
    }

    /// Number of figures handed out so far
    pub fn served(&self) -> usize {
        self.index
    }
}

impl FigureQueue for ScriptedFigureQueue {
    fn next(&mut self) -> Figure {
        let last = self.figures.len().saturating_sub(1);
        let figure = self
            .figures
            .get(self.index.min(last))
            .cloned()
            .unwrap_or_default();
        self.index += 1;
        figure
    }
}
