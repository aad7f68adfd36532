#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variable and value ordering heuristics for the backtracking search.

use crate::csp::graph::ConstraintGraph;
use crate::csp::grid::Grid;
use crate::csp::variable::{Digit, Position, Variable};
use itertools::Itertools;

/// Picks the next variable to branch on.
pub trait VariableSelection {
    /// Returns the position to branch on, or `None` when every variable is
    /// assigned.
    fn pick(&self, grid: &Grid) -> Option<Position>;
}

/// Minimum-Remaining-Values: the unassigned variable with the smallest
/// domain, ties broken by first-found in row-major order. The most
/// constrained variable fails fastest if the branch is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mrv;

impl VariableSelection for Mrv {
    fn pick(&self, grid: &Grid) -> Option<Position> {
        grid.unassigned()
            .min_by_key(|v| v.domain().len())
            .map(Variable::position)
    }
}

/// First unassigned variable in row-major order. A baseline to measure the
/// MRV heuristic against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstUnassigned;

impl VariableSelection for FirstUnassigned {
    fn pick(&self, grid: &Grid) -> Option<Position> {
        grid.unassigned().next().map(Variable::position)
    }
}

/// Orders the candidate digits for a chosen variable.
pub trait ValueOrdering {
    /// Returns the digits of the domain at `at`, most promising first.
    fn order(&self, grid: &Grid, graph: &ConstraintGraph, at: Position) -> Vec<Digit>;
}

/// Least-Constraining-Value: digits ranked by how many neighbour domains
/// still contain them, ascending, so the choice that takes the fewest
/// options away from neighbours is tried first. Equal counts keep ascending
/// digit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lcv;

impl ValueOrdering for Lcv {
    fn order(&self, grid: &Grid, graph: &ConstraintGraph, at: Position) -> Vec<Digit> {
        let neighbours = graph.neighbours(at);
        grid.get(at)
            .domain()
            .iter()
            .map(|digit| {
                let conflicts = neighbours
                    .iter()
                    .filter(|&&n| grid.get(n).domain().contains(digit))
                    .count();
                (digit, conflicts)
            })
            .sorted_by_key(|&(digit, conflicts)| (conflicts, digit))
            .map(|(digit, _)| digit)
            .collect()
    }
}

/// Ascending digit order, no look-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lexical;

impl ValueOrdering for Lexical {
    fn order(&self, grid: &Grid, _graph: &ConstraintGraph, at: Position) -> Vec<Digit> {
        grid.get(at).domain().iter().collect()
    }
}

/// Uniformly random order. Useful for shaking a search out of a bad
/// deterministic ordering; makes runs non-reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shuffled;

impl ValueOrdering for Shuffled {
    fn order(&self, grid: &Grid, _graph: &ConstraintGraph, at: Position) -> Vec<Digit> {
        let mut digits: Vec<Digit> = grid.get(at).domain().iter().collect();
        fastrand::shuffle(&mut digits);
        digits
    }
}
