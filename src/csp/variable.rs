#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Cell variables and their candidate-digit domains.
//!
//! A [`Domain`] is a set of digits 1..=9 stored as a bitmask, and a
//! [`Variable`] is one cell of the board: a fixed position, a domain, and an
//! optional assigned value. The single invariant the rest of the engine
//! relies on is that an assigned variable's domain is exactly the singleton
//! of its value.

use std::error::Error;
use std::fmt;

/// A digit in `1..=9`.
pub type Digit = u8;

/// Number of rows and columns of the board.
pub const SIZE: usize = 9;

/// Edge length of one 3x3 box.
pub const BLOCK: usize = 3;

/// A cell coordinate, row-major, each component in `0..SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Position {
    /// Builds a position from its row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into an 81-cell array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * SIZE + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Returned by [`Domain::remove`] when the digit is not in the domain.
///
/// Callers are expected to verify presence before removing; hitting this is
/// a contract violation on their side, not a solvable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotPresentError(pub Digit);

impl fmt::Display for NotPresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digit {} is not in the domain", self.0)
    }
}

impl Error for NotPresentError {}

/// A set of candidate digits, one bit per digit.
///
/// Bits 1 through 9 of the inner `u16` are used; bit 0 and the high bits
/// stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain(u16);

const ALL_DIGITS: u16 = 0b11_1111_1110;

impl Domain {
    /// The full domain `{1..=9}`.
    #[must_use]
    pub const fn full() -> Self {
        Self(ALL_DIGITS)
    }

    /// The domain containing exactly `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is outside `1..=9`.
    #[must_use]
    pub const fn singleton(digit: Digit) -> Self {
        assert!(1 <= digit && digit <= 9, "digit out of range");
        Self(1 << digit)
    }

    /// Whether `digit` is still a candidate.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        digit >= 1 && digit <= 9 && self.0 & (1 << digit) != 0
    }

    /// Number of candidate digits left.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// An empty domain signals an unsatisfiable state, never "no
    /// constraint"; propagation fails as soon as it produces one.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The only digit in the domain, if it is a singleton.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn sole_value(self) -> Option<Digit> {
        if self.0.count_ones() == 1 {
            Some(self.0.trailing_zeros() as Digit)
        } else {
            None
        }
    }

    /// Removes `digit` from the domain.
    ///
    /// # Errors
    ///
    /// Returns [`NotPresentError`] if `digit` is not currently in the
    /// domain.
    pub const fn remove(&mut self, digit: Digit) -> Result<(), NotPresentError> {
        if self.contains(digit) {
            self.0 &= !(1 << digit);
            Ok(())
        } else {
            Err(NotPresentError(digit))
        }
    }

    /// Iterates the digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for d in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{d}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// One cell of the board.
///
/// Invariant: `value.is_some()` implies `domain == Domain::singleton(value)`.
/// Both constructors and [`Variable::assign`] maintain it; there is no other
/// way to set a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    position: Position,
    domain: Domain,
    value: Option<Digit>,
}

impl Variable {
    /// A blank cell with the full domain.
    #[must_use]
    pub const fn unassigned(position: Position) -> Self {
        Self {
            position,
            domain: Domain::full(),
            value: None,
        }
    }

    /// A pre-filled cell: singleton domain, assigned.
    #[must_use]
    pub const fn given(position: Position, digit: Digit) -> Self {
        Self {
            position,
            domain: Domain::singleton(digit),
            value: Some(digit),
        }
    }

    /// The cell's fixed coordinate.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The cell's current candidate set.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Mutable access to the candidate set, for propagation to prune.
    #[must_use]
    pub const fn domain_mut(&mut self) -> &mut Domain {
        &mut self.domain
    }

    /// The committed digit, if any.
    #[must_use]
    pub const fn value(&self) -> Option<Digit> {
        self.value
    }

    /// Whether a digit has been committed to this cell.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.value.is_some()
    }

    /// Assigns `digit`, collapsing the domain to the singleton.
    pub const fn assign(&mut self, digit: Digit) {
        self.domain = Domain::singleton(digit);
        self.value = Some(digit);
    }
}
