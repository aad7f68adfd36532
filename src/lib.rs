#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate solves 9x9 Sudoku puzzles by treating them as binary
//! constraint-satisfaction problems.
//!
//! Each cell is a variable over the digits 1..=9, constrained to differ from
//! the 20 peers sharing its row, column or 3x3 box. Solving combines AC-3
//! arc-consistency propagation with heuristic backtracking search.

/// The `csp` module implements the constraint-satisfaction engine: variables
/// and domains, the all-different constraint graph, AC-3 propagation and
/// backtracking search with MRV/LCV heuristics.
pub mod csp;

/// The `sudoku` module implements the puzzle surface: the text grid format
/// and example puzzles.
pub mod sudoku;
