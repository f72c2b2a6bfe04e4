//! The Abacus legalizer for one group of cells.
//!
//! Cells are taken in order of x, each one trial-placed in the rows around
//! its original y and committed where it adds the least displacement.

use crate::row::{Overlap, Row};
use crate::subrow::CellSlot;
use tandem_config::LegalizeConfig;
use tandem_layout::{CellId, Layout, Placement};

/// Outcome of legalizing one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPlacement {
    /// Final positions, in the order the cells were placed.
    pub placed: Vec<(CellId, Placement)>,
    /// Cells for which no subrow had room.
    pub unplaced: Vec<CellId>,
    /// Sum of the committed cost deltas.
    pub cost: i64,
}

/// Rows obstructed by the layout's terminals, ready to receive cells.
#[derive(Debug, Clone)]
pub struct Legalizer {
    rows: Vec<Row>,
    row_window: usize,
    subrow_window: usize,
}

impl Legalizer {
    /// Builds the rows and cuts every terminal out of them, terminals in
    /// order of x.
    pub fn new(layout: &Layout, config: &LegalizeConfig) -> Self {
        let mut rows: Vec<Row> = layout.rows.iter().map(Row::new).collect();
        rows.sort_by_key(|r| r.y);

        let mut terminals: Vec<_> = layout.terminals.iter().collect();
        terminals.sort_by_key(|t| t.rect.x);
        for terminal in terminals {
            for row in &mut rows {
                if row.block(&terminal.rect) != Overlap::None {
                    tracing::trace!(terminal = %terminal.name, row_y = row.y, "blocked");
                }
            }
        }

        Self {
            rows,
            row_window: config.row_window,
            subrow_window: config.subrow_window,
        }
    }

    /// Rows ordered by y.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Indices of rows with no subrow left.
    pub fn blocked_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_blocked())
            .map(|(i, _)| i)
            .collect()
    }

    /// Free width summed over every row.
    pub fn free_width(&self) -> i64 {
        self.rows.iter().map(Row::free_width).sum()
    }

    /// Index of the last row whose y does not exceed `y`, or 0.
    pub fn nearest_row(&self, y: i64) -> usize {
        self.rows.partition_point(|r| r.y <= y).saturating_sub(1)
    }

    /// Places one cell; returns its row, subrow and cost delta.
    pub fn place_cell(&mut self, slot: CellSlot) -> Option<(usize, usize, i64)> {
        if self.rows.is_empty() {
            return None;
        }
        let count = self.rows.len();
        let nearest = self.nearest_row(slot.y);
        let lo = nearest.saturating_sub(self.row_window);
        let hi = (nearest + self.row_window).min(count - 1);

        let mut best: Option<(usize, usize, i64)> = None;
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

        let (row, subrow, _) = best?;
        let delta = self.rows[row].subrow_mut(subrow).commit(slot);
        Some((row, subrow, delta))
    }

    /// Tries one row; returns `false` once the scan should stop.
    fn probe(
        &mut self,
        index: usize,
        slot: CellSlot,
        best: &mut Option<(usize, usize, i64)>,
    ) -> bool {
        let Some((subrow, cost)) = self.rows[index].best_subrow(slot, self.subrow_window) else {
            return true;
        };
        match *best {
            Some((_, _, best_cost)) if cost > best_cost => false,
            Some((_, _, best_cost)) if cost == best_cost => true,
            _ => {
                *best = Some((index, subrow, cost));
                true
            }
        }
    }

    /// Legalizes `cells`, sorted first by x and then by width.
    pub fn place_group(&mut self, mut cells: Vec<CellSlot>) -> GroupPlacement {
        cells.sort_by_key(|c| (c.x, c.width));
        let mut unplaced = Vec::new();
        let mut cost = 0;
        for slot in cells {
            match self.place_cell(slot) {
                Some((_, _, delta)) => cost += delta,
                None => unplaced.push(slot.id),
            }
        }
        GroupPlacement {
            placed: self.positions(),
            unplaced,
            cost,
        }
    }

    /// Final positions of every committed cell, row by row.
    pub fn positions(&self) -> Vec<(CellId, Placement)> {
        self.rows
            .iter()
            .flat_map(|row| row.subrows())
            .flat_map(|subrow| {
                subrow
                    .positions()
                    .into_iter()
                    .map(move |(id, x)| (id, Placement { x, y: subrow.y }))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_layout::{Die, Rect};

    fn layout(rows: usize, width: i64) -> Layout {
        let mut layout = Layout::new(Die {
            width,
            height: 10 * rows as i64,
        });
        layout.generate_rows(10, rows);
        layout
    }

    fn slot(id: u32, x: i64, y: i64, width: i64) -> CellSlot {
        CellSlot {
            id: CellId::from_raw(id),
            x,
            y,
            width,
            weight: 1,
        }
    }

    #[test]
    fn nearest_row_rounds_down() {
        let l = Legalizer::new(&layout(4, 100), &LegalizeConfig::default());
        assert_eq!(l.nearest_row(-5), 0);
        assert_eq!(l.nearest_row(0), 0);
        assert_eq!(l.nearest_row(19), 1);
        assert_eq!(l.nearest_row(20), 2);
        assert_eq!(l.nearest_row(500), 3);
    }

    #[test]
    fn terminals_cut_rows() {
        let mut lay = layout(3, 100);
        lay.add_terminal("t0", Rect::new(40, 0, 20, 15));
        lay.add_terminal("t1", Rect::new(0, 20, 100, 10));
        let l = Legalizer::new(&lay, &LegalizeConfig::default());
        assert_eq!(l.rows()[0].subrows().len(), 2);
        assert_eq!(l.rows()[1].subrows().len(), 2);
        assert_eq!(l.blocked_rows(), vec![2]);
        assert_eq!(l.free_width(), 80 + 80);
    }

    #[test]
    fn terminals_are_applied_in_x_order() {
        let mut lay = layout(1, 100);
        // listed right to left; both must still cut the row
        lay.add_terminal("t1", Rect::new(70, 0, 10, 10));
        lay.add_terminal("t0", Rect::new(20, 0, 10, 10));
        let l = Legalizer::new(&lay, &LegalizeConfig::default());
        let spans: Vec<_> = l.rows()[0].subrows().iter().map(|s| (s.x1, s.x2)).collect();
        assert_eq!(spans, vec![(0, 20), (30, 70), (80, 100)]);
    }

    #[test]
    fn cells_go_to_their_own_row() {
        let mut l = Legalizer::new(&layout(3, 100), &LegalizeConfig::default());
        let result = l.place_group(vec![slot(0, 10, 21, 5), slot(1, 10, 2, 5)]);
        assert!(result.unplaced.is_empty());
        assert_eq!(result.cost, 1 + 2);
        let mut placed = result.placed;
        placed.sort_by_key(|(id, _)| *id);
        assert_eq!(placed[0].1, Placement { x: 10, y: 20 });
        assert_eq!(placed[1].1, Placement { x: 10, y: 0 });
    }

    #[test]
    fn full_row_spills_to_neighbor() {
        let mut l = Legalizer::new(&layout(2, 20), &LegalizeConfig::default());
        let result = l.place_group(vec![
            slot(0, 0, 0, 10),
            slot(1, 10, 0, 10),
            slot(2, 5, 0, 10),
        ]);
        assert!(result.unplaced.is_empty());
        let rows: Vec<i64> = result.placed.iter().map(|(_, p)| p.y).collect();
        assert_eq!(rows.iter().filter(|&&y| y == 0).count(), 2);
        assert_eq!(rows.iter().filter(|&&y| y == 10).count(), 1);
    }

    #[test]
    fn no_room_leaves_cell_unplaced() {
        let mut l = Legalizer::new(&layout(1, 10), &LegalizeConfig::default());
        let result = l.place_group(vec![slot(0, 0, 0, 8), slot(1, 0, 0, 8)]);
        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.unplaced, vec![CellId::from_raw(1)]);
    }

    #[test]
    fn no_rows_places_nothing() {
        let mut l = Legalizer::new(&Layout::default(), &LegalizeConfig::default());
        let result = l.place_group(vec![slot(0, 0, 0, 1)]);
        assert!(result.placed.is_empty());
        assert_eq!(result.unplaced.len(), 1);
    }

    fn narrow_window() -> LegalizeConfig {
        LegalizeConfig {
            row_window: 0,
            ..LegalizeConfig::default()
        }
    }

    #[test]
    fn expansion_stops_at_worse_row() {
        let mut lay = layout(4, 100);
        lay.add_terminal("t0", Rect::new(0, 0, 90, 10));
        lay.add_terminal("t1", Rect::new(0, 10, 95, 10));
        let mut l = Legalizer::new(&lay, &narrow_window());
        // row 0 costs 90, row 1 costs 105; row 2 (20) is never tried
        assert_eq!(l.place_cell(slot(0, 0, 0, 5)), Some((0, 0, 90)));

        let mut wide = Legalizer::new(&lay, &LegalizeConfig::default());
        assert_eq!(wide.place_cell(slot(0, 0, 0, 5)), Some((2, 0, 20)));
    }

    #[test]
    fn equal_cost_row_keeps_expanding() {
        let mut lay = layout(4, 100);
        lay.add_terminal("t0", Rect::new(0, 0, 90, 10));
        lay.add_terminal("t1", Rect::new(0, 10, 80, 10));
        let mut l = Legalizer::new(&lay, &narrow_window());
        // rows 0 and 1 both cost 90
        assert_eq!(l.place_cell(slot(0, 0, 0, 5)), Some((2, 0, 20)));
    }

    #[test]
    fn expansion_reaches_distant_rows() {
        let config = LegalizeConfig {
            row_window: 1,
            ..LegalizeConfig::default()
        };
        let mut lay = layout(8, 10);
        for y in 0..5 {
            lay.add_terminal(format!("t{y}"), Rect::new(0, 10 * y, 10, 10));
        }
        let mut l = Legalizer::new(&lay, &config);
        let (row, _, delta) = l.place_cell(slot(0, 0, 0, 5)).unwrap();
        assert_eq!(row, 5);
        assert_eq!(delta, 50);
    }
}
