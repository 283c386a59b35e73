//! Pure legality, win and draw checks over a grid snapshot.
//!
//! These functions assume a valid, in-bounds, empty target — range and
//! occupancy rejection is the match state's job. They hold no state
//! and never mutate the grid they are given; checks that evaluate a
//! hypothetical placement work on a copy.

use crate::grid::{Grid, Stone};

/// The four axes a run can lie on: horizontal, vertical, and the two
/// diagonals. Each axis is walked in both directions from the placed
/// stone.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// `true` iff placing `stone` at `(x, y)` produces a run of **exactly**
/// five same-color stones along some axis.
///
/// This is an exact-match rule: a run of six or more (an overline) does
/// not win, though a different axis through the same placement may
/// still make exactly five.
pub fn would_win(grid: &Grid, x: u8, y: u8, stone: Stone) -> bool {
    let (x, y) = (i32::from(x), i32::from(y));
    AXES.iter().any(|&(dx, dy)| {
        let run = 1
            + count_run(grid, x, y, dx, dy, stone)
            + count_run(grid, x, y, -dx, -dy, stone);
        run == 5
    })
}

/// `true` iff placing `stone` at `(x, y)` is a forbidden double-three.
///
/// Applies only to the first mover (black): the placement is simulated
/// on a copy, then each axis is checked for a contiguous run of exactly
/// three whose both ends are open (in-bounds and empty). Two or more
/// such open threes make the move forbidden. White has no restriction.
pub fn is_forbidden(grid: &Grid, x: u8, y: u8, stone: Stone) -> bool {
    if !stone.slot().is_first_mover() {
        return false;
    }

    let simulated = grid.with_stone(x, y, stone);
    let (x, y) = (i32::from(x), i32::from(y));

    let open_threes = AXES
        .iter()
        .filter(|&&(dx, dy)| {
            let run = 1
                + count_run(&simulated, x, y, dx, dy, stone)
                + count_run(&simulated, x, y, -dx, -dy, stone);
            run == 3
                && open_end(&simulated, x, y, dx, dy, stone)
                && open_end(&simulated, x, y, -dx, -dy, stone)
        })
        .count();

    open_threes >= 2
}

/// `true` iff no empty cell remains (the draw condition).
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().all(|cell| cell.is_some())
}

/// Counts contiguous same-color stones from `(x, y)` exclusive, walking
/// in direction `(dx, dy)`.
fn count_run(grid: &Grid, x: i32, y: i32, dx: i32, dy: i32, stone: Stone) -> i32 {
    let mut count = 0;
    let (mut nx, mut ny) = (x + dx, y + dy);
    while grid.stone_at(nx, ny) == Some(stone) {
        count += 1;
        nx += dx;
        ny += dy;
    }
    count
}

/// Walks past the contiguous run from `(x, y)` in direction `(dx, dy)`
/// and reports whether the cell just beyond it is in-bounds and empty.
fn open_end(grid: &Grid, x: i32, y: i32, dx: i32, dy: i32, stone: Stone) -> bool {
    let (mut nx, mut ny) = (x + dx, y + dy);
    while grid.stone_at(nx, ny) == Some(stone) {
        nx += dx;
        ny += dy;
    }
    grid.is_empty_at(nx, ny)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid with black stones at the given coordinates.
    fn black_at(coords: &[(u8, u8)]) -> Grid {
        let mut grid = Grid::new();
        for &(x, y) in coords {
            grid = grid.with_stone(x, y, Stone::Black);
        }
        grid
    }

    fn white_at(grid: Grid, coords: &[(u8, u8)]) -> Grid {
        let mut grid = grid;
        for &(x, y) in coords {
            grid = grid.with_stone(x, y, Stone::White);
        }
        grid
    }

    // =====================================================================
    // would_win
    // =====================================================================

    #[test]
    fn test_would_win_exact_five_horizontal() {
        // Stones at (0,0)-(3,0); placing (4,0) completes exactly five.
        let grid = black_at(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert!(would_win(&grid.with_stone(4, 0, Stone::Black), 4, 0, Stone::Black));
    }

    #[test]
    fn test_would_win_overline_is_not_a_win() {
        // (0,0)-(3,0) plus (5,0): placing (4,0) joins them into six.
        let grid = black_at(&[(0, 0), (1, 0), (2, 0), (3, 0), (5, 0)]);
        let placed = grid.with_stone(4, 0, Stone::Black);
        assert!(!would_win(&placed, 4, 0, Stone::Black));
    }

    #[test]
    fn test_would_win_five_in_middle_of_run() {
        // The completing stone can land anywhere in the run, not just
        // at an end: (3,3) (4,3) _ (6,3) (7,3), then place (5,3).
        let grid = black_at(&[(3, 3), (4, 3), (6, 3), (7, 3)]);
        let placed = grid.with_stone(5, 3, Stone::Black);
        assert!(would_win(&placed, 5, 3, Stone::Black));
    }

    #[test]
    fn test_would_win_vertical_and_both_diagonals() {
        let vertical = black_at(&[(7, 2), (7, 3), (7, 4), (7, 5)]);
        assert!(would_win(
            &vertical.with_stone(7, 6, Stone::Black),
            7,
            6,
            Stone::Black
        ));

        let down_right = black_at(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert!(would_win(
            &down_right.with_stone(5, 5, Stone::Black),
            5,
            5,
            Stone::Black
        ));

        let up_right = black_at(&[(1, 5), (2, 4), (3, 3), (4, 2)]);
        assert!(would_win(
            &up_right.with_stone(5, 1, Stone::Black),
            5,
            1,
            Stone::Black
        ));
    }

    #[test]
    fn test_would_win_four_is_not_a_win() {
        let grid = black_at(&[(0, 0), (1, 0), (2, 0)]);
        let placed = grid.with_stone(3, 0, Stone::Black);
        assert!(!would_win(&placed, 3, 0, Stone::Black));
    }

    #[test]
    fn test_would_win_run_broken_by_opponent_stone() {
        let grid = white_at(
            black_at(&[(0, 0), (1, 0), (3, 0), (4, 0)]),
            &[(2, 0)],
        );
        // Black plays (5,0): the white stone at (2,0) caps the run at 3.
        let placed = grid.with_stone(5, 0, Stone::Black);
        assert!(!would_win(&placed, 5, 0, Stone::Black));
    }

    #[test]
    fn test_would_win_overline_on_one_axis_exact_five_on_another() {
        // Six along the row through (4,4), but exactly five down the
        // column through the same placement: the column still wins.
        let grid = black_at(&[
            // row: (0..=3,4) and (5,4) → placing (4,4) makes six
            (0, 4),
            (1, 4),
            (2, 4),
            (3, 4),
            (5, 4),
            // column: (4,0)-(4,3) → placing (4,4) makes five
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
        ]);
        let placed = grid.with_stone(4, 4, Stone::Black);
        assert!(would_win(&placed, 4, 4, Stone::Black));
    }

    // =====================================================================
    // is_forbidden
    // =====================================================================

    /// A canonical double-three: placing at (7,7) creates an open three
    /// on the row and an open three on the column.
    fn double_three_grid() -> Grid {
        black_at(&[(5, 7), (6, 7), (7, 5), (7, 6)])
    }

    #[test]
    fn test_is_forbidden_double_three_for_black() {
        let grid = double_three_grid();
        assert!(is_forbidden(&grid, 7, 7, Stone::Black));
    }

    #[test]
    fn test_is_forbidden_same_shape_is_legal_for_white() {
        // The identical shape in white stones: no restriction on slot 2.
        let mut grid = Grid::new();
        for &(x, y) in &[(5u8, 7u8), (6, 7), (7, 5), (7, 6)] {
            grid = grid.with_stone(x, y, Stone::White);
        }
        assert!(!is_forbidden(&grid, 7, 7, Stone::White));
    }

    #[test]
    fn test_is_forbidden_single_open_three_is_legal() {
        let grid = black_at(&[(5, 7), (6, 7)]);
        assert!(!is_forbidden(&grid, 7, 7, Stone::Black));
    }

    #[test]
    fn test_is_forbidden_blocked_three_does_not_count() {
        // The row three is capped by a white stone at (4,7), so only the
        // column three is open — not a double-three.
        let grid = white_at(double_three_grid(), &[(4, 7)]);
        assert!(!is_forbidden(&grid, 7, 7, Stone::Black));
    }

    #[test]
    fn test_is_forbidden_board_edge_closes_the_end() {
        // Threes hugging the edge: (0,0) is in both runs' paths, the
        // edge end is not open, so neither three is an open three.
        let grid = black_at(&[(1, 0), (2, 0), (0, 1), (0, 2)]);
        assert!(!is_forbidden(&grid, 0, 0, Stone::Black));
    }

    #[test]
    fn test_is_forbidden_symmetric_under_reflection() {
        // Mirror the canonical double-three across the vertical center
        // line (x → 14 - x); it must still be forbidden.
        let grid = black_at(&[(9, 7), (8, 7), (7, 5), (7, 6)]);
        assert!(is_forbidden(&grid, 7, 7, Stone::Black));
    }

    #[test]
    fn test_is_forbidden_does_not_mutate_grid() {
        let grid = double_three_grid();
        let before = grid;
        let _ = is_forbidden(&grid, 7, 7, Stone::Black);
        assert_eq!(grid, before);
        assert!(grid.is_empty_at(7, 7));
    }

    #[test]
    fn test_is_forbidden_four_is_not_a_three() {
        // Placing makes a run of four on the row — runs of exactly 3
        // are what the rule counts, so this is legal.
        let grid = black_at(&[(4, 7), (5, 7), (6, 7), (7, 5), (7, 6)]);
        assert!(!is_forbidden(&grid, 7, 7, Stone::Black));
    }

    // =====================================================================
    // is_full
    // =====================================================================

    #[test]
    fn test_is_full_empty_grid() {
        assert!(!is_full(&Grid::new()));
    }

    #[test]
    fn test_is_full_complete_grid() {
        let mut grid = Grid::new();
        for x in 0..15u8 {
            for y in 0..15u8 {
                let stone = if (x + y) % 2 == 0 { Stone::Black } else { Stone::White };
                grid = grid.with_stone(x, y, stone);
            }
        }
        assert!(is_full(&grid));
    }

    #[test]
    fn test_is_full_one_empty_cell() {
        let mut grid = Grid::new();
        for x in 0..15u8 {
            for y in 0..15u8 {
                if (x, y) == (14, 14) {
                    continue;
                }
                grid = grid.with_stone(x, y, Stone::Black);
            }
        }
        assert!(!is_full(&grid));
    }
}
