#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search over grid states.
//!
//! Each recursive call owns one candidate grid. A trial clones the grid,
//! assigns the chosen digit, re-runs AC-3 on the clone and recurses; if the
//! branch dies, the clone is dropped and the next candidate starts from the
//! untouched pre-trial grid. The first solution found is returned; there is
//! no exhaustive enumeration.

use crate::csp::consistency::consistent;
use crate::csp::graph::ConstraintGraph;
use crate::csp::grid::Grid;
use crate::csp::propagation::{Propagation, ac3};
use crate::csp::selection::{Lcv, Mrv, ValueOrdering, VariableSelection};
use log::debug;

/// Counters collected across one `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStats {
    /// Tentative assignments tried.
    pub decisions: u64,
    /// Digits pruned by propagation, root pass included.
    pub propagations: u64,
    /// Trials abandoned after a wipeout or an exhausted subtree.
    pub backtracks: u64,
    /// Set when the decision limit stopped the search; the "no solution"
    /// answer is then inconclusive.
    pub interrupted: bool,
}

/// A backtracking solver with pluggable variable and value heuristics.
///
/// Termination needs no depth bound: every recursion level assigns one more
/// variable out of 81 and domains only shrink. The optional decision limit
/// is a safety net for malformed inputs that keep branching widely.
#[derive(Debug, Clone)]
pub struct Solver<V = Mrv, O = Lcv> {
    graph: ConstraintGraph,
    selector: V,
    ordering: O,
    decision_limit: Option<u64>,
    stats: SolverStats,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Mrv, Lcv)
    }
}

impl<V: VariableSelection, O: ValueOrdering> Solver<V, O> {
    /// Creates a solver with the given heuristics. The constraint graph is
    /// built once here and reused for every `solve` call.
    #[must_use]
    pub fn new(selector: V, ordering: O) -> Self {
        Self {
            graph: ConstraintGraph::new(),
            selector,
            ordering,
            decision_limit: None,
            stats: SolverStats::default(),
        }
    }

    /// Caps the number of decisions; exceeding it aborts the search and
    /// sets [`SolverStats::interrupted`].
    #[must_use]
    pub const fn with_decision_limit(mut self, limit: u64) -> Self {
        self.decision_limit = Some(limit);
        self
    }

    /// Counters from the most recent `solve` call.
    #[must_use]
    pub const fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Solves `grid`, returning the completed board or `None` when no
    /// assignment satisfies the constraints.
    ///
    /// The input grid is left untouched; the root works on its own copy,
    /// pruned by one AC-3 pass before any branching.
    pub fn solve(&mut self, grid: &Grid) -> Option<Grid> {
        self.stats = SolverStats::default();

        let mut root = grid.clone();
        match ac3(&mut root, &self.graph) {
            Propagation::Consistent { pruned } => {
                self.stats.propagations += pruned as u64;
            }
            Propagation::Wipeout { at } => {
                debug!("root propagation wiped out the domain at {at}");
                return None;
            }
        }

        self.search(root)
    }

    fn search(&mut self, grid: Grid) -> Option<Grid> {
        if grid.is_complete() {
            return Some(grid);
        }

        let at = self.selector.pick(&grid)?;

        for digit in self.ordering.order(&grid, &self.graph, at) {
            if !consistent(digit, at, &grid) {
                continue;
            }

            if let Some(limit) = self.decision_limit {
                if self.stats.decisions >= limit {
                    self.stats.interrupted = true;
                    debug!("decision limit {limit} reached, aborting search");
                    return None;
                }
            }
            self.stats.decisions += 1;
            debug!(
                "trying {digit} at {at} (domain {})",
                grid.get(at).domain()
            );

            let mut branch = grid.clone();
            branch.assign(at, digit);

            match ac3(&mut branch, &self.graph) {
                Propagation::Consistent { pruned } => {
                    self.stats.propagations += pruned as u64;
                    if let Some(solution) = self.search(branch) {
                        return Some(solution);
                    }
                }
                Propagation::Wipeout { at: dead } => {
                    debug!("wipeout at {dead} after trying {digit} at {at}");
                }
            }

            self.stats.backtracks += 1;
            if self.stats.interrupted {
                return None;
            }
        }

        None
    }
}
