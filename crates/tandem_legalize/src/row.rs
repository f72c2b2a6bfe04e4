//! Placement rows, their subrows, and terminal blocking.

use crate::subrow::{CellSlot, Subrow};
use serde::{Deserialize, Serialize};
use tandem_layout::{Rect, RowSite};

/// How an obstruction overlaps the trailing subrow of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlap {
    /// Outside the subrow, or outside the row's y-range.
    None,
    /// Covers the whole subrow; the subrow is deleted.
    Cover,
    /// Covers the left end; the subrow starts at the obstruction's right.
    Left,
    /// Strictly inside; the subrow is split in two.
    Interior,
    /// Covers the right end; the subrow ends at the obstruction's left.
    Right,
}

/// A placement row made of disjoint subrows ordered by x.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Bottom edge.
    pub y: i64,
    /// Row height.
    pub height: i64,
    subrows: Vec<Subrow>,
}

impl Row {
    /// Creates a row with a single subrow spanning the whole site.
    pub fn new(site: &RowSite) -> Self {
        Self {
            y: site.y,
            height: site.height,
            subrows: vec![Subrow::new(site.x, site.x + site.width, site.y)],
        }
    }

    /// Subrows ordered by x.
    pub fn subrows(&self) -> &[Subrow] {
        &self.subrows
    }

    /// Returns the subrow at `index` for placement.
    pub fn subrow_mut(&mut self, index: usize) -> &mut Subrow {
        &mut self.subrows[index]
    }

    /// Returns whether obstructions left the row without space.
    pub fn is_blocked(&self) -> bool {
        self.subrows.is_empty()
    }

    /// Total free width over all subrows.
    pub fn free_width(&self) -> i64 {
        self.subrows.iter().map(|s| s.free_width).sum()
    }

    /// Classifies `rect` against the trailing subrow.
    pub fn overlap(&self, rect: &Rect) -> Overlap {
        if rect.top() <= self.y || rect.y >= self.y + self.height {
            return Overlap::None;
        }
        let Some(last) = self.subrows.last() else {
            return Overlap::None;
        };
        let (t1, t2) = (rect.x, rect.right());
        if t2 <= last.x1 || t1 >= last.x2 {
            Overlap::None
        } else if t1 <= last.x1 && t2 >= last.x2 {
            Overlap::Cover
        } else if t1 <= last.x1 {
            Overlap::Left
        } else if t2 < last.x2 {
            Overlap::Interior
        } else {
            Overlap::Right
        }
    }

    /// Removes `rect` from the trailing subrow.
    ///
    /// Obstructions must arrive in increasing x for every part of the row
    /// to be checked; only the trailing subrow is ever cut.
    pub fn block(&mut self, rect: &Rect) -> Overlap {
        let overlap = self.overlap(rect);
        let y = self.y;
        match overlap {
            Overlap::None => {}
            Overlap::Cover => {
                self.subrows.pop();
            }
            Overlap::Left => {
                if let Some(last) = self.subrows.last_mut() {
                    *last = Subrow::new(rect.right(), last.x2, y);
                }
            }
            Overlap::Interior => {
                if let Some(last) = self.subrows.last_mut() {
                    let tail = Subrow::new(rect.right(), last.x2, y);
                    *last = Subrow::new(last.x1, rect.x, y);
                    self.subrows.push(tail);
                }
            }
            Overlap::Right => {
                if let Some(last) = self.subrows.last_mut() {
                    *last = Subrow::new(last.x1, rect.x, y);
                }
            }
        }
        overlap
    }

    /// Finds the subrow where `slot` adds the least displacement.
    ///
    /// Subrows within `window` of the nearest one by x are always tried;
    /// beyond that each direction stops at the first subrow that does
    /// strictly worse than the best so far. Only subrows with enough free
    /// width are tried. Returns the subrow index and its cost delta.
    pub fn best_subrow(&mut self, slot: CellSlot, window: usize) -> Option<(usize, i64)> {
        if self.subrows.is_empty() {
            return None;
        }
        let count = self.subrows.len();
        let nearest = self
            .subrows
            .partition_point(|s| s.x1 <= slot.x)
            .saturating_sub(1);
        let lo = nearest.saturating_sub(window);
        let hi = (nearest + window).min(count - 1);

        let mut best = None;
        for index in lo..=hi {
            self.probe(index, slot, &mut best);
        }
        for index in (0..lo).rev() {
            if !self.probe(index, slot, &mut best) {
                break;
            }
        }
        for index in hi + 1..count {
            if !self.probe(index, slot, &mut best) {
                break;
            }
        }
        best
    }

    /// Tries one subrow; returns `false` once the scan should stop.
    fn probe(&mut self, index: usize, slot: CellSlot, best: &mut Option<(usize, i64)>) -> bool {
        let subrow = &mut self.subrows[index];
        if !subrow.fits(slot.width) {
            return true;
        }
        let cost = subrow.trial(slot);
        match *best {
            Some((_, best_cost)) if cost > best_cost => false,
            Some((_, best_cost)) if cost == best_cost => true,
            _ => {
                *best = Some((index, cost));
                true
            }
        }
    }
}
