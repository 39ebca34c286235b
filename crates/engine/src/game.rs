//! Game stepper - moves one figure through the glass, tick by tick
//!
//! The stepper owns the falling figure and its pivot position. Moves and forced drops
//! are queued and only take effect on the next [`TetrisGame::tick`]; rotation is
//! applied at once when the glass accepts it.
//!
//! Each tick:
//! 1. The queued horizontal move is applied, clamped by the figure's side extents.
//! 2. A forced drop lands the figure straight away (keeping the move when legal).
//! 3. Otherwise the figure descends one row, with or without the move; when neither
//!    fits the glass lands it and a new figure spawns above the field.
//! 4. A landing that merges nothing, or a spawn the glass rejects, empties the glass
//!    and ends the game.

use tracing::{debug, info};

use glass_tetris_core::{Figure, FigureQueue, Glass, GlassSnapshot};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: every operation is ignored
    GameOver,
}

/// The falling figure and the input queued for the next tick
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveFigure {
    figure: Figure,
    x: i32,
    y: i32,
    pending_dx: i32,
    force_drop: bool,
}

impl ActiveFigure {
    fn spawn<G: Glass>(glass: &G, figure: Figure) -> Self {
        let x = (glass.width() as i32 / 2 - 1).max(0);
        let y = glass.height() as i32 - figure.top() as i32;
        Self {
            figure,
            x,
            y,
            pending_dx: 0,
            force_drop: false,
        }
    }
}

/// Tick-driven game over a figure queue and a glass
#[derive(Debug)]
pub struct TetrisGame<Q, G> {
    queue: Q,
    glass: G,
    active: ActiveFigure,
    status: GameStatus,
}

impl<Q: FigureQueue, G: Glass> TetrisGame<Q, G> {
    /// Take the first figure and report it at the spawn position
    pub fn new(mut queue: Q, mut glass: G) -> Self {
        let active = ActiveFigure::spawn(&glass, queue.next());
        glass.figure_at(&active.figure, active.x, active.y);
        debug!(
            kind = active.figure.kind().as_str(),
            x = active.x,
            y = active.y,
            "game started"
        );

        Self {
            queue,
            glass,
            active,
            status: GameStatus::Running,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// The falling figure
    pub fn figure(&self) -> &Figure {
        &self.active.figure
    }

    /// Pivot of the falling figure
    pub fn position(&self) -> (i32, i32) {
        (self.active.x, self.active.y)
    }

    pub fn glass(&self) -> &G {
        &self.glass
    }

    pub fn glass_mut(&mut self) -> &mut G {
        &mut self.glass
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn snapshot(&self) -> GlassSnapshot {
        GlassSnapshot::capture(&self.glass, self.is_game_over())
    }

    /// Queue a move `delta` columns to the left for the next tick
    pub fn move_left(&mut self, delta: i32) {
        if self.status == GameStatus::Running {
            self.active.pending_dx = self.active.pending_dx.saturating_sub(delta);
        }
    }

    /// Queue a move `delta` columns to the right for the next tick
    pub fn move_right(&mut self, delta: i32) {
        if self.status == GameStatus::Running {
            self.active.pending_dx = self.active.pending_dx.saturating_add(delta);
        }
    }

    /// Rotate `times` quarter turns clockwise if the glass accepts the result in place
    pub fn rotate(&mut self, times: i32) {
        if self.status != GameStatus::Running {
            return;
        }

        let rotated = self.active.figure.rotate_times(times);
        let (x, y) = (self.active.x, self.active.y);
        if self.glass.accept(&rotated, x, y) {
            self.glass.figure_at(&rotated, x, y);
            self.active.figure = rotated;
        }
    }

    /// Land the figure on the next tick instead of descending one row
    pub fn drop(&mut self) {
        if self.status == GameStatus::Running {
            self.active.force_drop = true;
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        let (x, y) = (self.active.x, self.active.y);
        let target_x = self.target_x();
        self.active.pending_dx = 0;

        if std::mem::take(&mut self.active.force_drop) {
            if self.glass.accept(&self.active.figure, target_x, y) {
                self.active.x = target_x;
            }
            self.land();
            return;
        }

        let target_y = y - 1;
        if self.glass.accept(&self.active.figure, target_x, target_y) {
            self.move_to(target_x, target_y);
        } else if self.glass.accept(&self.active.figure, x, target_y) {
            self.move_to(x, target_y);
        } else {
            self.land();
        }
    }

    /// Pending horizontal target, kept clear of the walls by the figure's side extents
    fn target_x(&self) -> i32 {
        let active = &self.active;
        if active.pending_dx == 0 {
            return active.x;
        }

        let min_x = active.figure.left() as i32;
        let max_x = self.glass.width() as i32 - 1 - active.figure.right() as i32;
        active.x.saturating_add(active.pending_dx).min(max_x).max(min_x)
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.active.x = x;
        self.active.y = y;
        self.glass.figure_at(&self.active.figure, x, y);
    }

    fn land(&mut self) {
        let (x, y) = (self.active.x, self.active.y);
        let landed = self.glass.drop(&self.active.figure, x, y);

        let next = ActiveFigure::spawn(&self.glass, self.queue.next());
        if !landed || !self.glass.accept(&next.figure, next.x, next.y) {
            info!(landed, x, y, "glass overflown, game over");
            self.glass.empty();
            self.status = GameStatus::GameOver;
        } else {
            debug!(
                kind = next.figure.kind().as_str(),
                x = next.x,
                y = next.y,
                "figure spawned"
            );
        }

        self.glass.figure_at(&next.figure, next.x, next.y);
        if self.status == GameStatus::Running {
            self.active = next;
        }
    }
}
