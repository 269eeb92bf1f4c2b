//! Toroid: Conway's Game of Life on a wrapping grid.
//!
//! Exposes the board representation, the evolution rule, the plain-text
//! board encoding, and a simulation driver for request-per-generation use.

pub mod board;
pub mod evolve;
pub mod protocol;
pub mod simulation;
