//! Toroidal cell grid.
//!
//! A `Board` is a fixed-size rectangle of alive/dead flags. Writes are
//! bounds-checked and never wrap; reads through `is_alive_at` wrap around
//! both edges so neighbour lookups can never fall off the grid.

use rand::Rng;
use tracing::debug;

/// Errors raised by board construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("a {width}x{height} board is too large to allocate")]
    TooLarge { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside a {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("seeding ratio must be a positive integer, got {0}")]
    InvalidRatio(usize),
}

/// A single generation of the game world.
///
/// Cells are stored row-major in one flat vector of `width * height` flags,
/// so every coordinate in range always has a defined state.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Creates a board with every cell dead.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        let area = width
            .checked_mul(height)
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(BoardError::TooLarge { width, height })?;
        Ok(Board {
            width,
            height,
            cells: vec![false; area],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets the state of an in-range cell. Coordinates are not wrapped.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<(), BoardError> {
        if x >= self.width || y >= self.height {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Returns whether the cell at `(x, y)` is alive.
    ///
    /// Any coordinate is accepted: values outside the board wrap toroidally,
    /// so `-1` names the last column or row.
    pub fn is_alive_at(&self, x: i64, y: i64) -> bool {
        let wx = x.rem_euclid(self.width as i64) as usize;
        let wy = y.rem_euclid(self.height as i64) as usize;
        self.cells[self.index(wx, wy)]
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = false);
    }

    /// Brings `width * height / ratio` randomly chosen cells to life.
    ///
    /// Each draw picks an independent coordinate, so repeated picks land on
    /// an already-live cell and the number of distinct live cells may be
    /// lower than the draw count. Returns the number of draws made.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        ratio: usize,
        rng: &mut R,
    ) -> Result<usize, BoardError> {
        if ratio == 0 {
            return Err(BoardError::InvalidRatio(ratio));
        }
        let draws = self.width * self.height / ratio;
        for _ in 0..draws {
            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);
            let idx = self.index(x, y);
            self.cells[idx] = true;
        }
        debug!(
            width = self.width,
            height = self.height,
            ratio,
            draws,
            population = self.population(),
            "randomized board"
        );
        Ok(draws)
    }

    /// Iterates rows top to bottom, each a `width`-long slice.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Wraps an already-computed cell vector. Callers guarantee the length.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Board {
            width,
            height,
            cells,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}
