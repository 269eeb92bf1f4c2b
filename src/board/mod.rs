//! Board representation.
//!
//! Contains the toroidal grid that holds one generation of cells.

pub mod grid;

pub use grid::{Board, BoardError};
