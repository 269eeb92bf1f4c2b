//! Generation stepping.
//!
//! Implements Conway's rule: a live cell survives with two or three live
//! neighbours, a dead cell is born with exactly three, and every other cell
//! is dead in the next generation. Neighbour counts wrap toroidally.
//!
//! Every function here reads a single immutable snapshot and writes a fresh
//! board, so no cell ever sees partly updated state.

pub mod parallel;

pub use parallel::evolve_parallel;

use crate::board::Board;

/// Returns true for any offset other than the centre of the 3x3 neighbourhood.
#[inline]
pub fn not_this_cell(dx: i64, dy: i64) -> bool {
    dx != 0 || dy != 0
}

/// Counts live cells among the eight toroidal neighbours of `(x, y)`.
///
/// Any coordinate is accepted; it is wrapped onto the board before the
/// neighbourhood is walked.
pub fn neighbour_count(board: &Board, x: i64, y: i64) -> u8 {
    let x = x.rem_euclid(board.width() as i64);
    let y = y.rem_euclid(board.height() as i64);
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if not_this_cell(dx, dy) && board.is_alive_at(x + dx, y + dy) {
                count += 1;
            }
        }
    }
    count
}

/// Returns the next-generation state of the cell at `(x, y)`.
pub fn evolve_cell(board: &Board, x: i64, y: i64) -> bool {
    match (board.is_alive_at(x, y), neighbour_count(board, x, y)) {
        (true, 2) | (_, 3) => true,
        _ => false,
    }
}

/// Computes one row of the next generation into `row`.
pub(crate) fn evolve_row(board: &Board, y: usize, row: &mut [bool]) {
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = evolve_cell(board, x as i64, y as i64);
    }
}

/// Produces the next generation. The input board is left untouched.
pub fn evolve(board: &Board) -> Board {
    let (width, height) = (board.width(), board.height());
    let mut cells = vec![false; width * height];
    for (y, row) in cells.chunks_mut(width).enumerate() {
        evolve_row(board, y, row);
    }
    Board::from_cells(width, height, cells)
}

impl Board {
    /// Method form of [`evolve_cell`].
    pub fn evolve_cell(&self, x: i64, y: i64) -> bool {
        evolve_cell(self, x, y)
    }

    /// Method form of [`evolve`].
    pub fn evolve(&self) -> Board {
        evolve(self)
    }
}
