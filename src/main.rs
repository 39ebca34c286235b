//! Headless game runner (default binary).
//!
//! Plays a seeded game with a simple column-cycling driver until the glass overflows
//! or the tick cap is reached, then prints the final glass and score.

use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use glass_tetris::core::{
    Figure, Glass, GlassEventListener, PlayerScores, RandomFigureQueue, TetrisGlass,
};
use glass_tetris::engine::TetrisGame;
use glass_tetris::types::{GLASS_HEIGHT, GLASS_WIDTH};

/// Run a falling-block game without a screen.
#[derive(Debug, Parser)]
#[command(name = "glass-sim", version, about)]
struct Args {
    /// Glass width in columns.
    #[arg(long, default_value_t = GLASS_WIDTH, value_name = "COLS")]
    width: u32,

    /// Glass height in rows.
    #[arg(long, default_value_t = GLASS_HEIGHT, value_name = "ROWS")]
    height: u32,

    /// Seed of the 7-bag figure queue.
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Stop after this many ticks even if the game is still running.
    #[arg(long, default_value_t = 10_000, value_name = "N")]
    max_ticks: u32,

    /// Print the final glass snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Logs every glass event
struct EventLog;

impl GlassEventListener for EventLog {
    fn figure_dropped(&self, figure: &Figure) {
        debug!(kind = figure.kind().as_str(), "figure dropped");
    }

    fn lines_removed(&self, count: u32) {
        info!(count, "lines removed");
    }

    fn glass_overflown(&self) {
        info!("glass overflown");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let scores = Rc::new(PlayerScores::new());
    let listeners: Vec<Rc<dyn GlassEventListener>> = vec![Rc::new(EventLog), scores.clone()];
    let glass = TetrisGlass::new(args.width, args.height, listeners)
        .context("invalid glass dimensions")?;
    let mut game = TetrisGame::new(RandomFigureQueue::new(args.seed), glass);

    info!(
        width = args.width,
        height = args.height,
        seed = args.seed,
        "starting game"
    );

    let outcome = play(&mut game, &scores, args.max_ticks);
    info!(
        ticks = outcome.ticks,
        game_over = game.is_game_over(),
        score = outcome.score,
        lines = outcome.lines,
        "game finished"
    );

    let snapshot = game.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for row in snapshot.to_ascii() {
            println!("{row}");
        }
        println!(
            "ticks: {}  score: {}  lines: {}",
            outcome.ticks, outcome.score, outcome.lines
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Outcome {
    ticks: u32,
    score: u32,
    lines: u32,
}

/// Drive the game until it ends or `max_ticks` have passed
///
/// Each new figure is turned by its sequence number and steered toward a column that
/// cycles across the glass; otherwise every fourth tick forces a drop.
fn play(
    game: &mut TetrisGame<RandomFigureQueue, TetrisGlass>,
    scores: &PlayerScores,
    max_ticks: u32,
) -> Outcome {
    let width = game.glass().width();
    let mut last_piece = None;
    let mut ticks = 0;
    let mut before_last_tick = (scores.score(), scores.lines());
    while ticks < max_ticks && !game.is_game_over() {
        let piece = scores.figures();
        before_last_tick = (scores.score(), scores.lines());

        if last_piece != Some(piece) {
            last_piece = Some(piece);
            debug!(piece, next = game.queue().peek().as_str(), "steering new figure");
            game.rotate(piece as i32 % 4);
            let target = (piece * 3 % width) as i32;
            let (x, _) = game.position();
            if target < x {
                game.move_left(x - target);
            } else {
                game.move_right(target - x);
            }
        } else if ticks % 4 == 3 {
            game.drop();
        }

        game.tick();
        ticks += 1;
    }

    let (score, lines) = final_totals(before_last_tick, scores, game.is_game_over());
    Outcome {
        ticks,
        score,
        lines,
    }
}

/// Score and lines to report once play stops
///
/// Scores reset on overflow, so a game that just ended reports the totals from
/// before its final tick.
fn final_totals(before_last_tick: (u32, u32), scores: &PlayerScores, game_over: bool) -> (u32, u32) {
    if game_over {
        before_last_tick
    } else {
        (scores.score(), scores.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_tetris::types::FIGURE_DROP_SCORE;

    fn new_game(seed: u32) -> (TetrisGame<RandomFigureQueue, TetrisGlass>, Rc<PlayerScores>) {
        let scores = Rc::new(PlayerScores::new());
        let listeners: Vec<Rc<dyn GlassEventListener>> = vec![scores.clone()];
        let glass = TetrisGlass::new(10, 20, listeners).unwrap();
        (TetrisGame::new(RandomFigureQueue::new(seed), glass), scores)
    }

    #[test]
    fn test_totals_count_last_landing_when_stopped_early() {
        let scores = PlayerScores::new();
        let before = (scores.score(), scores.lines());
        scores.figure_dropped(&Figure::point());
        scores.lines_removed(1);

        assert_eq!(final_totals(before, &scores, false), (FIGURE_DROP_SCORE + 100, 1));
    }

    #[test]
    fn test_totals_survive_overflow_reset() {
        let scores = PlayerScores::new();
        scores.figure_dropped(&Figure::point());
        let before = (scores.score(), scores.lines());
        scores.glass_overflown();

        assert_eq!(final_totals(before, &scores, true), (FIGURE_DROP_SCORE, 0));
    }

    #[test]
    fn test_tick_cap_reports_live_scores() {
        for max_ticks in 1..300 {
            let (mut game, scores) = new_game(3);
            let outcome = play(&mut game, &scores, max_ticks);
            if game.is_game_over() {
                break;
            }
            assert_eq!(outcome.ticks, max_ticks);
            assert_eq!((outcome.score, outcome.lines), (scores.score(), scores.lines()));
        }
    }

    #[test]
    fn test_play_until_game_over() {
        let (mut game, scores) = new_game(1);
        let outcome = play(&mut game, &scores, 10_000);

        assert!(game.is_game_over());
        assert!(outcome.ticks < 10_000);
        assert!(outcome.score > 0);
        assert_eq!(scores.score(), 0);
    }
}
