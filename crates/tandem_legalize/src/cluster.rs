//! Abacus clusters: maximal runs of abutting cells in a subrow.

use serde::{Deserialize, Serialize};

/// A run of cells placed side by side, starting at `x`.
///
/// The cells are `start..end` of the owning subrow's insertion-ordered cell
/// list. `e`, `q` and `w` are the Abacus accumulators: total weight,
/// weighted target sum, and total width. The optimal start is `q / e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// First cell index (inclusive).
    pub start: usize,
    /// Last cell index (exclusive).
    pub end: usize,
    /// Left edge of the first cell.
    pub x: i64,
    /// Sum of cell weights.
    pub e: i64,
    /// Sum of `weight * (target_x - offset_in_cluster)`.
    pub q: i64,
    /// Sum of cell widths.
    pub w: i64,
}

impl Cluster {
    /// Creates an empty cluster at `x` whose first cell will be `start`.
    pub fn new(start: usize, x: i64) -> Self {
        Self {
            start,
            end: start,
            x,
            e: 0,
            q: 0,
            w: 0,
        }
    }

    /// Appends the next cell of the subrow to this cluster.
    pub fn add_cell(&mut self, x: i64, width: i64, weight: i64) {
        self.end += 1;
        self.e += weight;
        self.q += weight * (x - self.w);
        self.w += width;
    }

    /// Appends all cells of `other`, which must directly follow this one.
    pub fn absorb(&mut self, other: &Cluster) {
        debug_assert_eq!(self.end, other.start);
        self.end = other.end;
        self.q += other.q - other.e * self.w;
        self.e += other.e;
        self.w += other.w;
    }

    /// Returns the weighted optimal start clipped to `[x1, x2 - w]`.
    ///
    /// The lower bound wins if the cluster is wider than the span.
    pub fn optimal_x(&self, x1: i64, x2: i64) -> i64 {
        let x = if self.e > 0 {
            self.q.div_euclid(self.e)
        } else {
            self.x
        };
        x.min(x2 - self.w).max(x1)
    }

    /// Right edge of the last cell.
    pub fn right(&self) -> i64 {
        self.x + self.w
    }

    /// Number of cells in the cluster.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns whether the cluster holds no cells.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
