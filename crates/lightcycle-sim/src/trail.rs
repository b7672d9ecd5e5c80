use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction};

/// What the trail remembers about a cell: the direction of travel the first
/// time the pawn entered it, and the tick that happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailMark {
    pub direction: Direction,
    pub tick: u64,
}

/// One traversed unit edge between adjacent nodes, stored with `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrailEdge {
    pub a: Cell,
    pub b: Cell,
}

impl TrailEdge {
    pub fn new(from: Cell, to: Cell) -> Self {
        if from <= to {
            Self { a: from, b: to }
        } else {
            Self { a: to, b: from }
        }
    }
}

/// Every cell the pawn has occupied, keyed by cell.
///
/// Grows only. The first direction recorded for a cell is authoritative.
#[derive(Debug, Clone, Default)]
pub struct TrailStore {
    cells: BTreeMap<Cell, TrailMark>,
    edges: BTreeSet<TrailEdge>,
}

impl TrailStore {
    /// A trail holding only the starting cell, recorded on tick 0.
    pub fn seeded(start: Cell, direction: Direction) -> Self {
        let mut trail = Self::default();
        trail.record_if_absent(start, direction, 0);
        trail
    }

    /// Insert `cell` unless it is already present. Returns whether it was new.
    pub fn record_if_absent(&mut self, cell: Cell, direction: Direction, tick: u64) -> bool {
        match self.cells.entry(cell) {
            Entry::Vacant(slot) => {
                slot.insert(TrailMark { direction, tick });
                true
            },
            Entry::Occupied(_) => false,
        }
    }

    /// Remember that the pawn travelled between two adjacent nodes.
    pub fn record_edge(&mut self, from: Cell, to: Cell) {
        self.edges.insert(TrailEdge::new(from, to));
    }

    pub fn lookup(&self, cell: Cell) -> Option<&TrailMark> {
        self.cells.get(&cell)
    }

    pub fn direction_at(&self, cell: Cell) -> Option<Direction> {
        self.cells.get(&cell).map(|mark| mark.direction)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, TrailMark)> + '_ {
        self.cells.iter().map(|(&cell, &mark)| (cell, mark))
    }

    pub fn edges(&self) -> impl Iterator<Item = TrailEdge> + '_ {
        self.edges.iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
