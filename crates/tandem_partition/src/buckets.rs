//! Gain buckets: one array of intrusive doubly linked lists per side.
//!
//! Bucket `k` of a side holds the unlocked cells of that side whose gain is
//! `k - max_degree`. Links are stored as index arrays parallel to the cell
//! list, so insertion and removal are O(1) and no list node is allocated.

use tandem_layout::Side;

/// Per-side gain buckets over cells `0..n`.
#[derive(Debug, Clone)]
pub struct GainBuckets {
    max_degree: usize,
    heads: [Vec<Option<usize>>; 2],
    /// Highest possibly non-empty bucket per side.
    max_index: [usize; 2],
    next: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    gain: Vec<i64>,
    /// Side whose list currently holds the cell.
    member: Vec<Option<Side>>,
}

impl GainBuckets {
    /// Creates empty buckets for `num_cells` cells whose degree is at most
    /// `max_degree`.
    pub fn new(num_cells: usize, max_degree: usize) -> Self {
        let width = 2 * max_degree + 1;
        Self {
            max_degree,
            heads: [vec![None; width], vec![None; width]],
            max_index: [0; 2],
            next: vec![None; num_cells],
            prev: vec![None; num_cells],
            gain: vec![0; num_cells],
            member: vec![None; num_cells],
        }
    }

    fn slot(&self, gain: i64) -> usize {
        debug_assert!(
            gain.unsigned_abs() as usize <= self.max_degree,
            "gain {gain} outside +/-{}",
            self.max_degree
        );
        (gain + self.max_degree as i64) as usize
    }

    /// Pushes `cell` onto the front of the bucket for `gain` on `side`.
    pub fn insert(&mut self, cell: usize, side: Side, gain: i64) {
        debug_assert!(self.member[cell].is_none(), "cell {cell} already bucketed");
        let slot = self.slot(gain);
        let s = side.index();
        let head = self.heads[s][slot];

        self.next[cell] = head;
        self.prev[cell] = None;
        if let Some(h) = head {
            self.prev[h] = Some(cell);
        }
        self.heads[s][slot] = Some(cell);
        self.gain[cell] = gain;
        self.member[cell] = Some(side);

        if slot > self.max_index[s] {
            self.max_index[s] = slot;
        }
    }

    /// Unlinks `cell` from its bucket, returning the side it was on.
    pub fn remove(&mut self, cell: usize) -> Option<Side> {
        let side = self.member[cell].take()?;
        let s = side.index();
        let slot = self.slot(self.gain[cell]);

        match self.prev[cell] {
            Some(p) => self.next[p] = self.next[cell],
            None => self.heads[s][slot] = self.next[cell],
        }
        if let Some(n) = self.next[cell] {
            self.prev[n] = self.prev[cell];
        }
        self.next[cell] = None;
        self.prev[cell] = None;

        while self.max_index[s] > 0 && self.heads[s][self.max_index[s]].is_none() {
            self.max_index[s] -= 1;
        }
        Some(side)
    }

    /// Moves `cell` to the bucket for `gain + delta` on the same side.
    ///
    /// Cells not currently bucketed (locked) are left alone.
    pub fn adjust(&mut self, cell: usize, delta: i64) {
        if let Some(side) = self.remove(cell) {
            let gain = self.gain[cell] + delta;
            self.insert(cell, side, gain);
        }
    }

    /// Returns the gain last recorded for `cell`.
    pub fn gain(&self, cell: usize) -> i64 {
        self.gain[cell]
    }

    /// Returns whether `cell` is in some bucket.
    pub fn contains(&self, cell: usize) -> bool {
        self.member[cell].is_some()
    }

    /// Returns the cells in the bucket for `gain` on `side`, front first.
    pub fn bucket(&self, side: Side, gain: i64) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.heads[side.index()][self.slot(gain)];
        while let Some(cell) = cursor {
            out.push(cell);
            cursor = self.next[cell];
        }
        out
    }

    /// Returns the highest gain present on `side`.
    pub fn max_gain(&self, side: Side) -> Option<i64> {
        let s = side.index();
        let top = self.max_index[s];
        self.heads[s][top].map(|_| top as i64 - self.max_degree as i64)
    }

    /// Finds the first unlocked cell on `side`, scanning down from the
    /// highest non-empty bucket across at most `max_degree + 1` buckets.
    pub fn best_candidate(&self, side: Side, locked: &[bool]) -> Option<usize> {
        let s = side.index();
        let top = self.max_index[s];
        let bottom = top.saturating_sub(self.max_degree);
        for slot in (bottom..=top).rev() {
            let mut cursor = self.heads[s][slot];
            while let Some(cell) = cursor {
                if !locked[cell] {
                    return Some(cell);
                }
                cursor = self.next[cell];
            }
        }
        None
    }
}
