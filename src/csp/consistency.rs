#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Duplicate checking for tentative assignments.
//!
//! Before the search commits a value it asks: would this value leave the
//! cell's row, column and box free of duplicate *assigned* values? Cells
//! that still hold an open domain are ignored here; conflicts at the domain
//! level are the propagator's job.

use crate::csp::graph::{box_positions, col_positions, row_positions};
use crate::csp::grid::Grid;
use crate::csp::variable::{Digit, Domain, Position};

/// True iff the assigned values among `cells`, with `value` substituted at
/// `at`, contain no duplicate.
fn group_consistent(
    grid: &Grid,
    cells: impl Iterator<Item = Position>,
    value: Digit,
    at: Position,
) -> bool {
    let mut seen = Domain::full();
    for cell in cells {
        let assigned = if cell == at {
            Some(value)
        } else {
            grid.get(cell).value()
        };
        if let Some(digit) = assigned {
            if seen.remove(digit).is_err() {
                return false;
            }
        }
    }
    true
}

/// True iff tentatively assigning `value` at `at` leaves the three groups
/// through `at` duplicate-free.
#[must_use]
pub fn consistent(value: Digit, at: Position, grid: &Grid) -> bool {
    group_consistent(grid, row_positions(at.row), value, at)
        && group_consistent(grid, col_positions(at.col), value, at)
        && group_consistent(grid, box_positions(at), value, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::grid::Grid;

    fn grid_with(givens: &[(usize, usize, Digit)]) -> Grid {
        let mut digits = [[0u8; 9]; 9];
        for &(row, col, digit) in givens {
            digits[row][col] = digit;
        }
        Grid::from_digits(&digits).unwrap()
    }

    #[test]
    fn test_consistent_on_empty_grid() {
        let grid = Grid::empty();
        assert!(consistent(5, Position::new(4, 4), &grid));
    }

    #[test]
    fn test_row_conflict() {
        let grid = grid_with(&[(2, 0, 7)]);
        assert!(!consistent(7, Position::new(2, 8), &grid));
        assert!(consistent(6, Position::new(2, 8), &grid));
    }

    #[test]
    fn test_column_conflict() {
        let grid = grid_with(&[(0, 3, 1)]);
        assert!(!consistent(1, Position::new(8, 3), &grid));
        assert!(consistent(2, Position::new(8, 3), &grid));
    }

    #[test]
    fn test_box_conflict() {
        // (4, 4) and (3, 3) share the centre box but no row or column.
        let grid = grid_with(&[(3, 3, 9)]);
        assert!(!consistent(9, Position::new(4, 4), &grid));
        assert!(consistent(8, Position::new(4, 4), &grid));
    }

    #[test]
    fn test_substitution_replaces_current_value() {
        // Re-assigning the same cell must not conflict with itself.
        let grid = grid_with(&[(5, 5, 3)]);
        assert!(consistent(4, Position::new(5, 5), &grid));
    }

    #[test]
    fn test_open_domains_are_ignored() {
        // A neighbouring blank cell never counts as a duplicate, whatever
        // its domain still contains.
        let grid = grid_with(&[(0, 0, 2)]);
        assert!(consistent(5, Position::new(0, 1), &grid));
    }
}
