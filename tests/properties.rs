//! Property tests for figure geometry and glass invariants
//!
//! - Four quarter turns give back the same figure, pivot included.
//! - Rotation never gains or loses cells.
//! - On an empty glass a figure is accepted exactly while its extents stay inside
//!   the walls.
//! - Whatever the input, a tick never leaves a full row behind, and a finished game
//!   always leaves an empty glass.

use proptest::prelude::*;

use glass_tetris::core::{Figure, Glass, RandomFigureQueue, TetrisGlass};
use glass_tetris::engine::TetrisGame;
use glass_tetris::types::FigureType;

const WIDTH: i32 = 10;
const HEIGHT: i32 = 20;

/// Figures up to 6x6 with at least one cell and the pivot anywhere in the box
fn arb_figure() -> impl Strategy<Value = Figure> {
    (1usize..=6, 1usize..=6)
        .prop_flat_map(|(width, height)| {
            (
                prop::collection::vec(prop::collection::vec(any::<bool>(), width), height),
                0..width,
                0..height,
            )
        })
        .prop_filter("figure needs a cell", |(cells, _, _)| {
            cells.iter().flatten().any(|&c| c)
        })
        .prop_map(|(cells, pivot_column, pivot_row)| {
            let lines: Vec<String> = cells
                .iter()
                .map(|row| row.iter().map(|&c| if c { '#' } else { ' ' }).collect())
                .collect();
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            Figure::parse(FigureType::T, pivot_column, pivot_row, &lines).unwrap()
        })
}

#[derive(Debug, Clone, Copy)]
enum Input {
    Left(i32),
    Right(i32),
    Rotate(i32),
    Drop,
    Idle,
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (1i32..4).prop_map(Input::Left),
        (1i32..4).prop_map(Input::Right),
        (-2i32..=3).prop_map(Input::Rotate),
        Just(Input::Drop),
        Just(Input::Idle),
    ]
}

proptest! {
    #[test]
    fn four_rotations_are_identity(figure in arb_figure()) {
        prop_assert_eq!(figure.rotate().rotate().rotate().rotate(), figure.clone());
        prop_assert_eq!(figure.rotate_times(-1), figure.rotate_times(3));
    }

    #[test]
    fn rotation_keeps_cell_count(figure in arb_figure(), times in -4i32..8) {
        let rotated = figure.rotate_times(times);
        prop_assert_eq!(rotated.cells_at(0, 0).count(), figure.cells_at(0, 0).count());
    }

    #[test]
    fn accept_follows_side_extents(figure in arb_figure()) {
        // Extents are measured from the pivot, so it must sit within the occupied columns
        let columns: Vec<i32> = figure.cells_at(0, 0).map(|(column, _)| column).collect();
        prop_assume!(columns.iter().min() <= Some(&0) && columns.iter().max() >= Some(&0));

        let glass = TetrisGlass::new(WIDTH as u32, HEIGHT as u32, Vec::new()).unwrap();
        let y = HEIGHT / 2;
        let leftmost = figure.left() as i32;
        let rightmost = WIDTH - 1 - figure.right() as i32;

        prop_assert!(glass.accept(&figure, leftmost, y));
        prop_assert!(!glass.accept(&figure, leftmost - 1, y));
        prop_assert!(glass.accept(&figure, rightmost, y));
        prop_assert!(!glass.accept(&figure, rightmost + 1, y));
    }

    #[test]
    fn accept_follows_vertical_extents(figure in arb_figure()) {
        // Measured from the pivot, as for the side extents
        let rows: Vec<i32> = figure.cells_at(0, 0).map(|(_, row)| row).collect();
        prop_assume!(rows.iter().min() <= Some(&0) && rows.iter().max() >= Some(&0));

        let glass = TetrisGlass::new(WIDTH as u32, HEIGHT as u32, Vec::new()).unwrap();
        let x = figure.left() as i32;
        let lowest = figure.bottom() as i32;
        // The spawn row at HEIGHT is the highest row a cell may take
        let highest = HEIGHT - figure.top() as i32;

        prop_assert!(glass.accept(&figure, x, lowest));
        prop_assert!(!glass.accept(&figure, x, lowest - 1));
        prop_assert!(glass.accept(&figure, x, highest));
        prop_assert!(!glass.accept(&figure, x, highest + 1));
    }

    #[test]
    fn ticks_never_leave_full_rows(
        seed in any::<u32>(),
        inputs in prop::collection::vec(arb_input(), 1..400),
    ) {
        let glass = TetrisGlass::new(WIDTH as u32, HEIGHT as u32, Vec::new()).unwrap();
        let mut game = TetrisGame::new(RandomFigureQueue::new(seed), glass);

        for input in inputs {
            match input {
                Input::Left(n) => game.move_left(n),
                Input::Right(n) => game.move_right(n),
                Input::Rotate(n) => game.rotate(n),
                Input::Drop => game.drop(),
                Input::Idle => {}
            }
            game.tick();

            for row in 0..HEIGHT as usize {
                prop_assert!(!game.glass().is_row_full(row));
            }
            for plot in game.glass().current_figure_plots() {
                prop_assert!((0..WIDTH).contains(&plot.x));
                prop_assert!((0..HEIGHT).contains(&plot.y));
            }
            if game.is_game_over() {
                prop_assert!(game.glass().is_empty());
                break;
            }
        }
    }
}
