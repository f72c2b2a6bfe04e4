//! Stage outputs handed from one engine to the next.
//!
//! Each stage takes the previous stage's value by move, so only one engine
//! can touch the layout at a time: partitioning owns `side`, legalization
//! owns `placement`.

use crate::data::{Layout, Side};
use crate::ids::CellId;
use serde::{Deserialize, Serialize};

/// A layout whose cells all carry a side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionedLayout {
    /// The layout; every cell has `side == Some(..)`.
    pub layout: Layout,
    /// Cells on side 0, in input order.
    pub left: Vec<CellId>,
    /// Cells on side 1, in input order.
    pub right: Vec<CellId>,
    /// Number of overlap edges crossing the two sides.
    pub cut_cost: usize,
}

impl PartitionedLayout {
    /// Returns the cell group for `side`.
    pub fn group(&self, side: Side) -> &[CellId] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Per-side legalization statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    /// Cells given a final position.
    pub placed: usize,
    /// Cells left without a position.
    pub unplaced: Vec<CellId>,
    /// Sum of `|dx| + |dy|` over the placed cells.
    pub displacement: i64,
}

/// Legalization statistics for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalizeReport {
    /// Statistics indexed by [`Side::index`].
    pub sides: [SideReport; 2],
}

impl LegalizeReport {
    /// Total number of placed cells.
    pub fn placed(&self) -> usize {
        self.sides.iter().map(|s| s.placed).sum()
    }

    /// All unplaced cells, left side first.
    pub fn unplaced(&self) -> Vec<CellId> {
        self.sides
            .iter()
            .flat_map(|s| s.unplaced.iter().copied())
            .collect()
    }

    /// Total displacement over both sides.
    pub fn total_displacement(&self) -> i64 {
        self.sides.iter().map(|s| s.displacement).sum()
    }
}

/// A partitioned layout whose cells carry their final positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalizedLayout {
    /// The layout with `placement` filled in for every placed cell.
    pub layout: Layout,
    /// Cut cost carried over from partitioning.
    pub cut_cost: usize,
    /// Legalization statistics.
    pub report: LegalizeReport,
}
