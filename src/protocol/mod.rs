//! Board text encoding.
//!
//! The `*`/`.` grid format is the canonical representation of a board, used
//! for fixtures, debug output and responses.

pub mod text;

pub use text::{parse_board, populate, render, TextError, ALIVE, DEAD};
