#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 board of variables.
//!
//! A [`Grid`] owns its 81 [`Variable`]s by value. Search branches clone the
//! whole grid before mutating it; sibling branches never observe each
//! other's changes, which is what makes backtracking sound without an undo
//! log.

use crate::csp::graph::{box_positions, col_positions, row_positions};
use crate::csp::variable::{BLOCK, Digit, Domain, Position, SIZE, Variable};
use std::error::Error;
use std::fmt;

/// A given digit outside `1..=9`. Shape errors cannot occur here; the
/// constructors take fixed-size arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// Where the offending given sits.
    pub at: Position,
    /// The digit as supplied.
    pub digit: u8,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digit {} at {} is outside 1..=9", self.digit, self.at)
    }
}

impl Error for OutOfRange {}

/// The 9x9 board, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Variable>,
}

impl Grid {
    /// A board of 81 blank cells, each with the full domain.
    #[must_use]
    pub fn empty() -> Self {
        let cells = (0..SIZE * SIZE)
            .map(|index| Variable::unassigned(Position::new(index / SIZE, index % SIZE)))
            .collect();
        Self { cells }
    }

    /// Builds a board from givens: `Some(d)` is a pre-filled cell, `None`
    /// is blank.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if any given digit is outside `1..=9`.
    pub fn from_givens(givens: &[[Option<Digit>; SIZE]; SIZE]) -> Result<Self, OutOfRange> {
        let mut grid = Self::empty();
        for (row, line) in givens.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                let at = Position::new(row, col);
                if let Some(digit) = cell {
                    if !(1..=9).contains(&digit) {
                        return Err(OutOfRange { at, digit });
                    }
                    grid.cells[at.index()] = Variable::given(at, digit);
                }
            }
        }
        Ok(grid)
    }

    /// Builds a board from plain digits, `0` meaning blank.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if any digit is greater than 9.
    pub fn from_digits(digits: &[[u8; SIZE]; SIZE]) -> Result<Self, OutOfRange> {
        let mut givens = [[None; SIZE]; SIZE];
        for (row, line) in digits.iter().enumerate() {
            for (col, &digit) in line.iter().enumerate() {
                if digit != 0 {
                    givens[row][col] = Some(digit);
                }
            }
        }
        Self::from_givens(&givens)
    }

    /// The variable at `at`.
    #[must_use]
    pub fn get(&self, at: Position) -> &Variable {
        &self.cells[at.index()]
    }

    /// Mutable access to the variable at `at`.
    #[must_use]
    pub fn get_mut(&mut self, at: Position) -> &mut Variable {
        &mut self.cells[at.index()]
    }

    /// Assigns `digit` at `at`, collapsing that cell's domain.
    pub fn assign(&mut self, at: Position, digit: Digit) {
        self.cells[at.index()].assign(digit);
    }

    /// All 81 variables in row-major order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.cells.iter()
    }

    /// The unassigned variables in row-major order.
    pub fn unassigned(&self) -> impl Iterator<Item = &Variable> {
        self.cells.iter().filter(|v| !v.is_assigned())
    }

    /// True once every variable is assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Variable::is_assigned)
    }

    /// Row-major cell values for display: `None` where still blank.
    #[must_use]
    pub fn values(&self) -> Vec<Option<Digit>> {
        self.cells.iter().map(Variable::value).collect()
    }

    /// True iff the assigned values among `cells` are exactly `1..=9`.
    fn group_complete(&self, cells: impl Iterator<Item = Position>) -> bool {
        let mut seen = Domain::full();
        for at in cells {
            let Some(digit) = self.get(at).value() else {
                return false;
            };
            if seen.remove(digit).is_err() {
                return false;
            }
        }
        seen.is_empty()
    }

    /// True iff every row, column and box is a permutation of `1..=9`.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        (0..SIZE).all(|row| self.group_complete(row_positions(row)))
            && (0..SIZE).all(|col| self.group_complete(col_positions(col)))
            && (0..SIZE).step_by(BLOCK).all(|row| {
                (0..SIZE)
                    .step_by(BLOCK)
                    .all(|col| self.group_complete(box_positions(Position::new(row, col))))
            })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            write!(f, "|")?;
            for col in 0..SIZE {
                match self.get(Position::new(row, col)).value() {
                    Some(digit) => write!(f, "{digit}|")?,
                    None => write!(f, " |")?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", "_".repeat(2 * SIZE + 1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::{EXAMPLE, EXAMPLE_SOLUTION};

    #[test]
    fn test_empty_grid_is_all_blank() {
        let grid = Grid::empty();
        assert_eq!(grid.unassigned().count(), SIZE * SIZE);
        assert!(!grid.is_complete());
        assert!(grid.variables().all(|v| v.domain() == Domain::full()));
    }

    #[test]
    fn test_from_digits_marks_givens() {
        let grid = Grid::from_digits(&EXAMPLE).unwrap();
        let givens = EXAMPLE.iter().flatten().filter(|&&d| d != 0).count();
        assert_eq!(grid.variables().filter(|v| v.is_assigned()).count(), givens);
        assert_eq!(grid.get(Position::new(0, 0)).value(), Some(5));
        assert_eq!(grid.get(Position::new(0, 2)).value(), None);
    }

    #[test]
    fn test_from_digits_rejects_out_of_range() {
        let mut digits = EXAMPLE;
        digits[3][4] = 12;
        assert_eq!(
            Grid::from_digits(&digits),
            Err(OutOfRange {
                at: Position::new(3, 4),
                digit: 12
            })
        );
    }

    #[test]
    fn test_solution_validity() {
        let solved = Grid::from_digits(&EXAMPLE_SOLUTION).unwrap();
        assert!(solved.is_complete());
        assert!(solved.is_valid_solution());

        let partial = Grid::from_digits(&EXAMPLE).unwrap();
        assert!(!partial.is_valid_solution());

        // Complete but with a duplicated digit in row 0.
        let mut bad = EXAMPLE_SOLUTION;
        bad[0][0] = bad[0][1];
        let bad = Grid::from_digits(&bad).unwrap();
        assert!(bad.is_complete());
        assert!(!bad.is_valid_solution());
    }

    #[test]
    fn test_values_reports_each_cell_row_major() {
        let grid = Grid::from_digits(&EXAMPLE).unwrap();
        let values = grid.values();
        assert_eq!(values.len(), SIZE * SIZE);
        assert_eq!(values[0], Some(5));
        assert_eq!(values[2], None);
        assert_eq!(values[Position::new(4, 4).index()], None);

        let solved = Grid::from_digits(&EXAMPLE_SOLUTION).unwrap();
        assert!(solved.values().iter().all(Option::is_some));
    }

    #[test]
    fn test_clone_isolates_branches() {
        let grid = Grid::from_digits(&EXAMPLE).unwrap();
        let mut branch = grid.clone();
        branch.assign(Position::new(0, 2), 4);
        assert_eq!(grid.get(Position::new(0, 2)).value(), None);
        assert_eq!(branch.get(Position::new(0, 2)).value(), Some(4));
    }

    #[test]
    fn test_display_draws_blanks_as_spaces() {
        let grid = Grid::from_digits(&EXAMPLE).unwrap();
        let drawn = grid.to_string();
        assert!(drawn.starts_with("|5|3| | |7| | | | |"));
        assert_eq!(drawn.lines().count(), 2 * SIZE);
    }
}
