#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! AC-3 arc-consistency propagation, specialized to not-equal constraints.
//!
//! The generic AC-3 `revise` step scans the neighbour's domain for any
//! supporting value. With "differ" as the only constraint kind, support
//! degenerates to a single check: a candidate `v` is unsupported exactly
//! when the neighbour is forced to `v`, i.e. its domain is the singleton
//! `{v}`. Each revision is therefore O(domain size).

use crate::csp::graph::{Arc, ConstraintGraph};
use crate::csp::grid::Grid;
use crate::csp::variable::{Domain, Position};
use log::trace;
use std::collections::VecDeque;

/// Outcome of a propagation pass.
///
/// A wipeout is normal control flow, not a fault: the caller must treat the
/// grid as a dead branch and backtrack, never assign further on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Every arc is consistent; `pruned` digits were removed on the way.
    Consistent {
        /// How many digits were removed across all revisions.
        pruned: usize,
    },
    /// The domain at `at` collapsed to empty.
    Wipeout {
        /// The position whose domain became empty.
        at: Position,
    },
}

impl Propagation {
    /// True unless some domain was wiped out.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        matches!(self, Self::Consistent { .. })
    }
}

/// Removes every digit of `from`'s domain that the neighbour's domain
/// forces, returning how many were removed.
fn revise(grid: &mut Grid, from: Position, neighbour_domain: Domain) -> usize {
    let mut removed = 0;
    // The domain is Copy, so this iterates a snapshot while removal
    // happens on the live cell.
    for digit in grid.get(from).domain().iter() {
        if neighbour_domain == Domain::singleton(digit) {
            grid.get_mut(from)
                .domain_mut()
                .remove(digit)
                .expect("digit taken from a snapshot of this domain");
            removed += 1;
        }
    }
    removed
}

/// Runs AC-3 over `grid` until arc consistency holds or a domain empties.
///
/// The worklist starts with every arc of `graph` (FIFO). When a revision
/// shrinks the domain at `from`, every arc `(neighbour, from)` is
/// re-enqueued, except the one from the neighbour just revised against;
/// arcs point *into* the shrunk variable, which is what makes the
/// algorithm converge.
pub fn ac3(grid: &mut Grid, graph: &ConstraintGraph) -> Propagation {
    let mut worklist: VecDeque<Arc> = graph.arcs().collect();
    let mut pruned = 0;

    while let Some(arc) = worklist.pop_front() {
        // A self-arc is meaningless for a not-equal constraint.
        if arc.from == arc.to {
            continue;
        }

        let neighbour_domain = grid.get(arc.to).domain();
        let removed = revise(grid, arc.from, neighbour_domain);
        if removed == 0 {
            continue;
        }
        pruned += removed;
        trace!(
            "pruned {removed} digit(s) at {} against {}, domain now {}",
            arc.from,
            arc.to,
            grid.get(arc.from).domain()
        );

        if grid.get(arc.from).domain().is_empty() {
            trace!("domain wipeout at {}", arc.from);
            return Propagation::Wipeout { at: arc.from };
        }

        for &neighbour in graph.neighbours(arc.from) {
            if neighbour != arc.to {
                worklist.push_back(Arc::new(neighbour, arc.from));
            }
        }
    }

    Propagation::Consistent { pruned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::variable::SIZE;
    use crate::sudoku::{EXAMPLE, EXAMPLE_SOLUTION};

    fn arc_consistent(grid: &Grid, graph: &ConstraintGraph) -> bool {
        graph.arcs().all(|arc| {
            let neighbour = grid.get(arc.to).domain();
            grid.get(arc.from)
                .domain()
                .iter()
                .all(|digit| neighbour != Domain::singleton(digit))
        })
    }

    #[test]
    fn test_empty_grid_is_already_consistent() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::empty();
        assert_eq!(ac3(&mut grid, &graph), Propagation::Consistent { pruned: 0 });
    }

    #[test]
    fn test_givens_prune_neighbour_domains() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&EXAMPLE).unwrap();
        let outcome = ac3(&mut grid, &graph);
        assert!(outcome.is_consistent());

        // (0, 0) holds 5, so 5 is gone from the rest of its row.
        let domain = grid.get(Position::new(0, 2)).domain();
        assert!(!domain.contains(5));
        assert!(arc_consistent(&grid, &graph));
    }

    #[test]
    fn test_soundness_after_success() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&EXAMPLE).unwrap();
        assert!(ac3(&mut grid, &graph).is_consistent());
        assert!(arc_consistent(&grid, &graph));
    }

    #[test]
    fn test_idempotence() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&EXAMPLE).unwrap();
        assert!(ac3(&mut grid, &graph).is_consistent());

        let settled = grid.clone();
        assert_eq!(ac3(&mut grid, &graph), Propagation::Consistent { pruned: 0 });
        assert_eq!(grid, settled);
    }

    #[test]
    fn test_single_blank_collapses_without_search() {
        // Scenario: one blank whose row, column and box hold the other
        // eight digits; AC-3 alone must finish the puzzle.
        let mut digits = EXAMPLE_SOLUTION;
        digits[4][4] = 0;
        let missing = EXAMPLE_SOLUTION[4][4];

        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&digits).unwrap();
        assert!(ac3(&mut grid, &graph).is_consistent());
        assert_eq!(
            grid.get(Position::new(4, 4)).domain(),
            Domain::singleton(missing)
        );
    }

    #[test]
    fn test_contradictory_givens_wipe_out() {
        // Two fixed 3s in the same row force each other's domain empty.
        let mut digits = [[0u8; SIZE]; SIZE];
        digits[0][0] = 3;
        digits[0][5] = 3;

        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&digits).unwrap();
        assert!(matches!(
            ac3(&mut grid, &graph),
            Propagation::Wipeout { .. }
        ));
    }

    #[test]
    fn test_solved_grid_passes_untouched() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::from_digits(&EXAMPLE_SOLUTION).unwrap();
        let before = grid.clone();
        assert_eq!(ac3(&mut grid, &graph), Propagation::Consistent { pruned: 0 });
        assert_eq!(grid, before);
    }
}
