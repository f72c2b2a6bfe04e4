//! Subrows: obstruction-free spans of a row and their Abacus state.
//!
//! A subrow keeps its cells in insertion order plus two cluster lists: the
//! live one and a backup taken after the last committed cell. A trial
//! placement mutates only the tail of the live list, so rolling back copies
//! that tail from the backup.

use crate::cluster::Cluster;
use serde::{Deserialize, Serialize};
use tandem_layout::{Cell, CellId};

/// The parts of a cell the legalizer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSlot {
    /// The cell being placed.
    pub id: CellId,
    /// Original x.
    pub x: i64,
    /// Original y.
    pub y: i64,
    /// Cell width.
    pub width: i64,
    /// Abacus weight.
    pub weight: i64,
}

impl CellSlot {
    /// Snapshots the position, size and weight of `cell`.
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            id: cell.id,
            x: cell.rect.x,
            y: cell.rect.y,
            width: cell.rect.width,
            weight: cell.weight,
        }
    }
}

/// A contiguous obstruction-free interval `[x1, x2)` of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subrow {
    /// Left bound.
    pub x1: i64,
    /// Right bound (exclusive).
    pub x2: i64,
    /// Y of the owning row.
    pub y: i64,
    /// Width not yet taken by committed cells.
    pub free_width: i64,
    cells: Vec<CellSlot>,
    clusters: Vec<Cluster>,
    backup: Vec<Cluster>,
    cost: i64,
}

impl Subrow {
    /// Creates an empty subrow spanning `[x1, x2)` at height `y`.
    pub fn new(x1: i64, x2: i64, y: i64) -> Self {
        Self {
            x1,
            x2,
            y,
            free_width: x2 - x1,
            cells: Vec::new(),
            clusters: Vec::new(),
            backup: Vec::new(),
            cost: 0,
        }
    }

    /// Returns `x2 - x1`.
    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    /// Returns whether a cell of `width` still fits.
    pub fn fits(&self, width: i64) -> bool {
        self.free_width >= width
    }

    /// Total displacement of the committed cells.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Committed cells in insertion order.
    pub fn cells(&self) -> &[CellSlot] {
        &self.cells
    }

    /// Live clusters, left to right.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Places `slot` tentatively and returns the resulting change in total
    /// displacement. The subrow is left exactly as it was.
    pub fn trial(&mut self, slot: CellSlot) -> i64 {
        let from = self.place(slot);
        let delta = self.delta_cost(from);
        self.rollback(from);
        delta
    }

    /// Places `slot` for good, refreshes the backup and returns the change
    /// in total displacement.
    pub fn commit(&mut self, slot: CellSlot) -> i64 {
        let from = self.place(slot);
        let delta = self.delta_cost(from);
        self.backup.truncate(from);
        self.backup.extend_from_slice(&self.clusters[from..]);
        self.free_width -= slot.width;
        self.cost += delta;
        delta
    }

    /// Final x of every committed cell, in insertion order.
    pub fn positions(&self) -> Vec<(CellId, i64)> {
        let mut out = Vec::with_capacity(self.cells.len());
        for cluster in &self.clusters {
            let mut x = cluster.x;
            for slot in &self.cells[cluster.start..cluster.end] {
                out.push((slot.id, x));
                x += slot.width;
            }
        }
        out
    }

    /// Clips the cell's x so the cell lies inside the subrow.
    fn target_x(&self, slot: &CellSlot) -> i64 {
        if slot.x < self.x1 {
            self.x1
        } else if slot.x + slot.width > self.x2 {
            self.x2 - slot.width
        } else {
            slot.x
        }
    }

    /// Runs one Abacus insertion and returns the index of the first
    /// cluster it changed; every cluster before it is untouched.
    fn place(&mut self, slot: CellSlot) -> usize {
        let target = self.target_x(&slot);
        let index = self.cells.len();
        self.cells.push(slot);

        match self.clusters.last_mut() {
            Some(last) if last.right() > target => {
                last.add_cell(slot.x, slot.width, slot.weight);
                self.collapse();
            }
            _ => {
                let mut cluster = Cluster::new(index, target);
                cluster.add_cell(slot.x, slot.width, slot.weight);
                self.clusters.push(cluster);
            }
        }
        self.clusters.len() - 1
    }

    /// Repositions the tail cluster and merges it leftward while it
    /// overlaps its predecessor.
    fn collapse(&mut self) {
        while let Some(mut last) = self.clusters.pop() {
            last.x = last.optimal_x(self.x1, self.x2);
            match self.clusters.last_mut() {
                Some(prev) if prev.right() > last.x => prev.absorb(&last),
                _ => {
                    self.clusters.push(last);
                    break;
                }
            }
        }
    }

    fn rollback(&mut self, from: usize) {
        self.cells.pop();
        self.clusters.truncate(from);
        self.clusters.extend_from_slice(&self.backup[from..]);
    }

    fn delta_cost(&self, from: usize) -> i64 {
        self.clusters_cost(&self.clusters[from..]) - self.clusters_cost(&self.backup[from..])
    }

    fn clusters_cost(&self, clusters: &[Cluster]) -> i64 {
        let mut cost = 0;
        for cluster in clusters {
            let mut x = cluster.x;
            for slot in &self.cells[cluster.start..cluster.end] {
                cost += (x - slot.x).abs() + (self.y - slot.y).abs();
                x += slot.width;
            }
        }
        cost
    }
}
