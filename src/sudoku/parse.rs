#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the plain-text puzzle format.
//!
//! A puzzle is nine lines of nine cells. A cell is a digit `1`-`9` or a
//! blank marker: `_` (the historical format), `.` or `0`. Spaces inside a
//! line are ignored, as are empty lines and lines starting with `#`.
//!
//! Validation is deliberately shallow: shape and characters only. A
//! well-formed grid whose givens contradict each other (say, two 7s in one
//! row) parses fine and is reported as unsatisfiable by the solver, not as
//! a parse error.

use crate::csp::grid::Grid;
use crate::csp::variable::{Digit, SIZE};
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

/// Why a puzzle failed to parse. Shape and character errors are
/// precondition violations and are surfaced before any search begins.
#[derive(Debug)]
pub enum ParseError {
    /// The file could not be read.
    Io(io::Error),
    /// The input does not have exactly nine puzzle lines.
    WrongLineCount {
        /// How many puzzle lines were found.
        found: usize,
    },
    /// A puzzle line does not have exactly nine cells.
    WrongLineLength {
        /// One-based line number of the offending line.
        line: usize,
        /// How many cells that line holds.
        found: usize,
    },
    /// A cell holds something other than a digit or a blank marker.
    BadCell {
        /// One-based line number of the offending cell.
        line: usize,
        /// One-based column number of the offending cell.
        col: usize,
        /// The character that was found there.
        found: char,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::WrongLineCount { found } => {
                write!(f, "expected {SIZE} puzzle lines, found {found}")
            }
            Self::WrongLineLength { line, found } => {
                write!(f, "line {line}: expected {SIZE} cells, found {found}")
            }
            Self::BadCell { line, col, found } => {
                write!(f, "line {line}, cell {col}: unexpected character {found:?}")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

const fn blank(c: char) -> bool {
    matches!(c, '_' | '.' | '0')
}

/// Parses a puzzle from text.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not nine lines of nine cells,
/// or if a cell is not a digit or blank marker.
pub fn parse_grid(input: &str) -> Result<Grid, ParseError> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.len() != SIZE {
        return Err(ParseError::WrongLineCount { found: lines.len() });
    }

    let mut givens = [[None; SIZE]; SIZE];
    for (row, line) in lines.iter().enumerate() {
        let cells: Vec<char> = line.chars().filter(|c| *c != ' ').collect();
        if cells.len() != SIZE {
            return Err(ParseError::WrongLineLength {
                line: row,
                found: cells.len(),
            });
        }

        for (col, &c) in cells.iter().enumerate() {
            if blank(c) {
                continue;
            }
            match c.to_digit(10) {
                #[allow(clippy::cast_possible_truncation)]
                Some(d) => givens[row][col] = Some(d as Digit),
                None => {
                    return Err(ParseError::BadCell {
                        line: row,
                        col,
                        found: c,
                    });
                }
            }
        }
    }

    // The parser only ever produces digits 1..=9, so this cannot fail.
    Ok(Grid::from_givens(&givens).expect("parsed digits are in range"))
}

/// Parses a puzzle file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, or any error
/// `parse_grid` reports for its content.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Grid, ParseError> {
    let input = std::fs::read_to_string(path)?;
    parse_grid(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::variable::Position;

    const PUZZLE: &str = "\
53__7____
6__195___
_98____6_
8___6___3
4__8_3__1
7___2___6
_6____28_
___419__5
____8__79
";

    #[test]
    fn test_parse_underscore_format() {
        let grid = parse_grid(PUZZLE).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)).value(), Some(5));
        assert_eq!(grid.get(Position::new(0, 2)).value(), None);
        assert_eq!(grid.get(Position::new(8, 8)).value(), Some(9));
        assert_eq!(grid.variables().filter(|v| v.is_assigned()).count(), 30);
    }

    #[test]
    fn test_parse_matches_digit_constructor() {
        let parsed = parse_grid(PUZZLE).unwrap();
        let built = Grid::from_digits(&crate::sudoku::EXAMPLE).unwrap();
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_dots_zeroes_spaces_and_comments() {
        let input = "\
# a puzzle with mixed blank markers
5 3 . 0 7 . _ . .
6 . . 1 9 5 . . .
. 9 8 . . . . 6 .

8 . . . 6 . . . 3
4 . . 8 . 3 . . 1
7 . . . 2 . . . 6
. 6 . . . . 2 8 .
. . . 4 1 9 . . 5
. . . . 8 . . 7 9
";
        let grid = parse_grid(input).unwrap();
        assert_eq!(grid, Grid::from_digits(&crate::sudoku::EXAMPLE).unwrap());
    }

    #[test]
    fn test_too_few_lines() {
        assert!(matches!(
            parse_grid("53__7____\n6__195___\n"),
            Err(ParseError::WrongLineCount { found: 2 })
        ));
    }

    #[test]
    fn test_short_line() {
        let mut input = PUZZLE.to_string();
        input = input.replacen("53__7____", "53__7", 1);
        assert!(matches!(
            parse_grid(&input),
            Err(ParseError::WrongLineLength { line: 0, found: 5 })
        ));
    }

    #[test]
    fn test_bad_character() {
        let input = PUZZLE.replacen('5', "x", 1);
        assert!(matches!(
            parse_grid(&input),
            Err(ParseError::BadCell {
                line: 0,
                col: 0,
                found: 'x'
            })
        ));
    }

    #[test]
    fn test_parse_file_missing_file_is_io_error() {
        let err = parse_file("no/such/puzzle.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_contradictory_givens_still_parse() {
        let input = "\
77_______
_________
_________
_________
_________
_________
_________
_________
_________
";
        assert!(parse_grid(input).is_ok());
    }
}
