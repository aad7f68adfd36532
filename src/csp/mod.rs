#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
/// The `consistency` module checks candidate assignments against the
/// already-assigned peers of a cell.
pub mod consistency;
/// The `graph` module derives the all-different constraint graph: the 20
/// peers of every cell and the directed arcs between them.
pub mod graph;
/// The `grid` module holds the 9x9 board of variables and its solved-state
/// checks.
pub mod grid;
/// The `propagation` module implements AC-3 arc-consistency over the
/// not-equal constraints.
pub mod propagation;
/// The `search` module runs backtracking search over the grid, propagating
/// after every trial assignment.
pub mod search;
/// The `selection` module provides the variable-selection and value-ordering
/// heuristics the search is parameterized over.
pub mod selection;
/// The `variable` module defines positions, digit domains and the cell
/// variable itself.
pub mod variable;
