//! The 15×15 grid and the stones on it.

use std::fmt;

use omok_protocol::Slot;

/// Board side length. The board is always square.
pub const BOARD_SIZE: usize = 15;

// ---------------------------------------------------------------------------
// Stone
// ---------------------------------------------------------------------------

/// A placed stone, identified by the seat that played it.
///
/// Black is slot 1 (the first mover, and the only side the double-three
/// restriction applies to); white is slot 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stone {
    /// Slot 1's stones.
    Black,
    /// Slot 2's stones.
    White,
}

impl Stone {
    /// The stone color a seat plays.
    pub fn for_slot(slot: Slot) -> Stone {
        if slot == Slot::ONE { Stone::Black } else { Stone::White }
    }

    /// The seat that plays this color.
    pub fn slot(self) -> Slot {
        match self {
            Stone::Black => Slot::ONE,
            Stone::White => Slot::TWO,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "black"),
            Stone::White => write!(f, "white"),
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// The 15×15 board: each cell is empty or holds one stone.
///
/// The only mutators are [`Grid::place`] and [`Grid::clear`], which is
/// how the "a non-empty cell never reverts to empty except on full
/// reset" invariant is enforced — there is no removal operation.
///
/// `Copy` because the backing array is 225 small cells; rule checks
/// that need to simulate a placement work on a copy instead of
/// mutating and undoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// An empty board.
    pub fn new() -> Grid {
        Grid {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// `true` if `(x, y)` lies on the board.
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE
    }

    /// The stone at `(x, y)`, or `None` for an empty or out-of-bounds cell.
    pub fn stone_at(&self, x: i32, y: i32) -> Option<Stone> {
        if Grid::in_bounds(x, y) {
            self.cells[x as usize][y as usize]
        } else {
            None
        }
    }

    /// `true` if `(x, y)` is on the board and empty.
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        Grid::in_bounds(x, y) && self.cells[x as usize][y as usize].is_none()
    }

    /// Places a stone. The caller (the match state) has already checked
    /// bounds and emptiness.
    pub(crate) fn place(&mut self, x: u8, y: u8, stone: Stone) {
        self.cells[x as usize][y as usize] = Some(stone);
    }

    /// Empties every cell (full match reset).
    pub(crate) fn clear(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    }

    /// A copy of this grid with one extra stone, for rule checks that
    /// evaluate a hypothetical placement.
    pub(crate) fn with_stone(&self, x: u8, y: u8, stone: Stone) -> Grid {
        let mut copy = *self;
        copy.place(x, y, stone);
        copy
    }

    /// Iterates over all cells (used by the draw check).
    pub(crate) fn cells(&self) -> impl Iterator<Item = Option<Stone>> + '_ {
        self.cells.iter().flatten().copied()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
