//! Row-parallel generation stepping.
//!
//! Splits the next generation into rows and computes them on the current
//! rayon pool. Every worker reads the same shared snapshot, so the result is
//! identical to [`super::evolve`].

use rayon::prelude::*;

use super::evolve_row;
use crate::board::Board;

/// Produces the next generation, computing rows concurrently.
pub fn evolve_parallel(board: &Board) -> Board {
    let (width, height) = (board.width(), board.height());
    let mut cells = vec![false; width * height];
    cells
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| evolve_row(board, y, row));
    Board::from_cells(width, height, cells)
}
