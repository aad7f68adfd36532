#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The all-different constraint graph over the 81 cells.
//!
//! Every cell must differ from the 20 peers sharing its row, column or 3x3
//! box. The graph is derived once from the fixed board geometry, is
//! independent of any particular puzzle's digits, and is reused unmodified
//! across solver runs.
//!
//! Box membership is enumerated without computing a block origin: a cell's
//! offset within its block (`row % 3`, `col % 3`) determines the signed
//! coordinate deltas that stay inside the block (offset 0 -> {0,1,2},
//! offset 1 -> {-1,0,1}, offset 2 -> {-2,-1,0}).

use crate::csp::variable::{BLOCK, Position, SIZE};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Peers per cell: 8 in the row, 8 in the column, 4 more in the box.
pub const PEERS: usize = 20;

/// A directed not-equal constraint: the value at `from` must differ from
/// the value at `to`. AC-3 revises `from`'s domain against `to`'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    /// The cell whose domain gets revised.
    pub from: Position,
    /// The peer revised against.
    pub to: Position,
}

impl Arc {
    /// Builds the directed arc `from -> to`.
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

const fn block_deltas(offset: usize) -> [isize; BLOCK] {
    match offset {
        0 => [0, 1, 2],
        1 => [-1, 0, 1],
        _ => [-2, -1, 0],
    }
}

/// All cells of the row `row`, left to right.
pub fn row_positions(row: usize) -> impl Iterator<Item = Position> {
    (0..SIZE).map(move |col| Position::new(row, col))
}

/// All cells of the column `col`, top to bottom.
pub fn col_positions(col: usize) -> impl Iterator<Item = Position> {
    (0..SIZE).map(move |row| Position::new(row, col))
}

/// All nine cells of the box containing `at`, including `at` itself.
pub fn box_positions(at: Position) -> impl Iterator<Item = Position> {
    let row_deltas = block_deltas(at.row % BLOCK);
    let col_deltas = block_deltas(at.col % BLOCK);
    row_deltas.into_iter().flat_map(move |dr| {
        col_deltas.into_iter().map(move |dc| {
            Position::new(
                at.row.wrapping_add_signed(dr),
                at.col.wrapping_add_signed(dc),
            )
        })
    })
}

/// Per-cell peer sets and the directed arc list they induce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    peers: Vec<SmallVec<[Position; PEERS]>>,
}

impl ConstraintGraph {
    /// Builds the graph from the fixed 9x9 geometry.
    #[must_use]
    pub fn new() -> Self {
        let mut peers = Vec::with_capacity(SIZE * SIZE);

        for row in 0..SIZE {
            for col in 0..SIZE {
                let at = Position::new(row, col);

                // Row, column and box overlap; collect into a set first so
                // each peer is listed once.
                let mut distinct: FxHashSet<Position> = FxHashSet::default();
                distinct.extend(row_positions(row));
                distinct.extend(col_positions(col));
                distinct.extend(box_positions(at));
                distinct.remove(&at);

                let mut cell_peers: SmallVec<[Position; PEERS]> =
                    distinct.into_iter().collect();
                // Hash order is arbitrary; sort so iteration is deterministic.
                cell_peers.sort_unstable();
                peers.push(cell_peers);
            }
        }

        Self { peers }
    }

    /// The peers of `at`: every other cell sharing its row, column or box.
    #[must_use]
    pub fn neighbours(&self, at: Position) -> &[Position] {
        &self.peers[at.index()]
    }

    /// Every directed arc `(cell, peer)`, in row-major cell order.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.peers.iter().enumerate().flat_map(|(index, peers)| {
            let from = Position::new(index / SIZE, index % SIZE);
            peers.iter().map(move |&to| Arc::new(from, to))
        })
    }
}

impl Default for ConstraintGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_has_twenty_peers() {
        let graph = ConstraintGraph::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let at = Position::new(row, col);
                assert_eq!(
                    graph.neighbours(at).len(),
                    PEERS,
                    "wrong peer count at {at}"
                );
            }
        }
    }

    #[test]
    fn test_peers_exclude_self_and_are_distinct() {
        let graph = ConstraintGraph::new();
        let at = Position::new(4, 4);
        let peers = graph.neighbours(at);
        assert!(!peers.contains(&at));

        let mut sorted = peers.to_vec();
        sorted.dedup();
        assert_eq!(sorted.len(), peers.len());
    }

    #[test]
    fn test_corner_cell_peers() {
        let graph = ConstraintGraph::new();
        let peers = graph.neighbours(Position::new(0, 0));

        // Row and column.
        assert!(peers.contains(&Position::new(0, 8)));
        assert!(peers.contains(&Position::new(8, 0)));
        // Box interior not on the row or column.
        assert!(peers.contains(&Position::new(1, 1)));
        assert!(peers.contains(&Position::new(2, 2)));
        // Different row, column and box.
        assert!(!peers.contains(&Position::new(3, 3)));
    }

    #[test]
    fn test_box_positions_cover_the_block() {
        // Offset (2, 1): deltas {-2,-1,0} x {-1,0,1}.
        let cells: Vec<Position> = box_positions(Position::new(5, 4)).collect();
        assert_eq!(cells.len(), 9);
        for cell in &cells {
            assert!((3..6).contains(&cell.row));
            assert!((3..6).contains(&cell.col));
        }
        assert!(cells.contains(&Position::new(5, 4)));
    }

    #[test]
    fn test_arc_count() {
        let graph = ConstraintGraph::new();
        assert_eq!(graph.arcs().count(), SIZE * SIZE * PEERS);
    }

    #[test]
    fn test_arcs_are_symmetric() {
        let graph = ConstraintGraph::new();
        let arcs: Vec<Arc> = graph.arcs().collect();
        for arc in &arcs {
            assert!(arcs.contains(&Arc::new(arc.to, arc.from)));
        }
    }
}
