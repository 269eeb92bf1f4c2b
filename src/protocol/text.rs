//! Plain-text board encoding.
//!
//! A board renders as `height` lines of `width` characters each, row-major,
//! with `*` for a live cell and `.` for a dead one. Every line, including the
//! last, ends with `\n`:
//!
//! ```text
//! .*.
//! .*.
//! .*.
//! ```
//!
//! Two readers are provided. [`populate`] is lenient: it flattens the text,
//! walks it row-major and only ever brings cells to life. [`parse_board`] is
//! strict: it infers the board size from the text and rejects ragged rows and
//! unknown characters.

use tracing::warn;

use crate::board::{Board, BoardError};

/// Character for a live cell.
pub const ALIVE: char = '*';
/// Character for a dead cell.
pub const DEAD: char = '.';

/// Errors that can occur while reading board text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("board text holds {actual} cells, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },

    #[error("board text contains no rows")]
    Empty,

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell character '{ch}' at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Renders the board as newline-terminated rows of `*` and `.`.
pub fn render(board: &Board) -> String {
    let mut out = String::with_capacity((board.width() + 1) * board.height());
    for row in board.rows() {
        out.extend(row.iter().map(|&alive| if alive { ALIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

/// Brings to life every cell marked `*` in `text`.
///
/// Line breaks are discarded and the remaining characters are read
/// row-major with a stride of `width`: character `y * width + x` maps to
/// cell `(x, y)`. Characters other than `*` leave their cell unchanged, so
/// this never kills a cell. Characters beyond `width * height` are ignored.
pub fn populate(board: &mut Board, text: &str) -> Result<(), TextError> {
    let (width, height) = (board.width(), board.height());
    let cells: Vec<char> = text.chars().filter(|&c| c != '\n' && c != '\r').collect();

    let expected = width * height;
    if cells.len() < expected {
        warn!(expected, actual = cells.len(), "board text too short");
        return Err(TextError::TooShort {
            expected,
            actual: cells.len(),
        });
    }

    for y in 0..height {
        for x in 0..width {
            if cells[y * width + x] == ALIVE {
                board.set(x, y, true)?;
            }
        }
    }
    Ok(())
}

/// Parses a board whose size is given by the text itself.
///
/// Each line is one row. Blank trailing lines are ignored; every other row,
/// including a blank leading one, must have the same width and contain only
/// `*` or `.`.
pub fn parse_board(text: &str) -> Result<Board, TextError> {
    let rows: Vec<&str> = text
        .trim_end_matches(['\n', '\r'])
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .collect();
    // The first non-blank row fixes the width; blank rows elsewhere are ragged.
    let width = rows
        .iter()
        .map(|r| r.chars().count())
        .find(|&n| n > 0)
        .ok_or(TextError::Empty)?;
    let mut board = Board::new(width, rows.len())?;

    for (y, row) in rows.iter().enumerate() {
        let actual = row.chars().count();
        if actual != width {
            return Err(TextError::RaggedRow {
                row: y,
                expected: width,
                actual,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            match ch {
                ALIVE => board.set(x, y, true)?,
                DEAD => {}
                other => {
                    return Err(TextError::InvalidCell {
                        ch: other,
                        row: y,
                        col: x,
                    })
                }
            }
        }
    }
    Ok(board)
}

impl Board {
    /// Method form of [`render`].
    pub fn render(&self) -> String {
        render(self)
    }

    /// Method form of [`populate`].
    pub fn populate(&mut self, text: &str) -> Result<(), TextError> {
        populate(self, text)
    }

    /// True when both boards share dimensions and render identically.
    pub fn equals(&self, other: &Board) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.render() == other.render()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER: &str = ".*...\n..*..\n***..\n.....\n.....\n";

    #[test]
    fn render_empty_board() {
        let board = Board::new(3, 2).unwrap();
        assert_eq!(render(&board), "...\n...\n");
    }

    #[test]
    fn render_marks_live_cells_row_major() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(2, 0, true).unwrap();
        board.set(0, 1, true).unwrap();
        assert_eq!(board.render(), "..*\n*..\n");
    }

    #[test]
    fn populate_square_board() {
        let mut board = Board::new(5, 5).unwrap();
        populate(&mut board, GLIDER).unwrap();
        assert_eq!(board.population(), 5);
        assert!(board.is_alive_at(1, 0));
        assert!(board.is_alive_at(2, 1));
        assert!(board.is_alive_at(0, 2));
        assert_eq!(board.render(), GLIDER);
    }

    #[test]
    fn populate_uses_width_as_row_stride() {
        let mut board = Board::new(4, 2).unwrap();
        populate(&mut board, "...*\n*...\n").unwrap();
        assert!(board.is_alive_at(3, 0));
        assert!(board.is_alive_at(0, 1));
        assert_eq!(board.population(), 2);
    }

    #[test]
    fn populate_never_clears() {
        let mut board = Board::new(2, 2).unwrap();
        board.set(0, 0, true).unwrap();
        populate(&mut board, "..\n.*\n").unwrap();
        assert!(board.is_alive_at(0, 0));
        assert!(board.is_alive_at(1, 1));
    }

    #[test]
    fn populate_ignores_line_layout_and_extra_text() {
        let mut board = Board::new(3, 3).unwrap();
        populate(&mut board, "*..\r\n.*..\n.*trailing").unwrap();
        // Flattened stream is "*...*...*trailing"; rows are cut every 3 cells.
        assert_eq!(board.render(), "*..\n.*.\n..*\n");
    }

    #[test]
    fn populate_short_text_rejected() {
        let mut board = Board::new(3, 3).unwrap();
        assert_eq!(
            populate(&mut board, "***\n***\n"),
            Err(TextError::TooShort {
                expected: 9,
                actual: 6
            })
        );
        assert!(board.is_empty());
    }

    #[test]
    fn parse_board_infers_size() {
        let board = parse_board("..*.\n*...\n....\n").unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.population(), 2);
        assert_eq!(board.render(), "..*.\n*...\n....\n");
    }

    #[test]
    fn parse_board_without_trailing_newline() {
        let board = parse_board("*.\n.*").unwrap();
        assert_eq!(board.render(), "*.\n.*\n");
    }

    #[test]
    fn parse_board_rejects_ragged_rows() {
        assert_eq!(
            parse_board("...\n..\n").unwrap_err(),
            TextError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn parse_board_reports_leading_blank_row_as_ragged() {
        assert_eq!(
            parse_board("\n**\n").unwrap_err(),
            TextError::RaggedRow {
                row: 0,
                expected: 2,
                actual: 0
            }
        );
        assert_eq!(
            parse_board("**\n\n**\n").unwrap_err(),
            TextError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 0
            }
        );
    }

    #[test]
    fn parse_board_rejects_unknown_characters() {
        assert_eq!(
            parse_board("..\n.x\n").unwrap_err(),
            TextError::InvalidCell {
                ch: 'x',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn parse_board_rejects_empty_text() {
        assert_eq!(parse_board("").unwrap_err(), TextError::Empty);
        assert_eq!(parse_board("\n\n").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn equality_is_by_content() {
        let a = Board::new(3, 3).unwrap();
        let b = Board::new(3, 3).unwrap();
        assert!(a.equals(&b));
        assert!(b.equals(&a));
        assert!(a.equals(&a));
        assert_eq!(a, b);
    }

    #[test]
    fn equality_requires_matching_dimensions() {
        let wide = Board::new(4, 1).unwrap();
        let tall = Board::new(1, 4).unwrap();
        assert!(!wide.equals(&tall));

        let mut live = Board::new(3, 3).unwrap();
        live.set(1, 1, true).unwrap();
        assert_ne!(live, Board::new(3, 3).unwrap());
    }
}
