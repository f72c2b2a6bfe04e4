//! Writers for the final placement.

use crate::data::{Cell, Layout};
use crate::stage::LegalizedLayout;
use serde::Serialize;
use std::io::{self, Write};

/// Writes one `<name> <final_x> <final_y> <side_id>` line per cell, in
/// input order.
///
/// A cell that was never placed is written at its original coordinates, and
/// a cell that was never partitioned is written with side id `0`.
pub fn write_placement(layout: &Layout, mut out: impl Write) -> io::Result<()> {
    for cell in &layout.cells {
        let (x, y) = final_position(cell);
        let side = cell.side.map_or(0, |s| s.index());
        writeln!(out, "{} {} {} {}", cell.name, x, y, side)?;
    }
    Ok(())
}

/// Writes a pretty-printed JSON [`PlacementReport`].
pub fn write_json(legalized: &LegalizedLayout, out: impl Write) -> io::Result<()> {
    let report = PlacementReport::from_legalized(legalized);
    serde_json::to_writer_pretty(out, &report).map_err(io::Error::from)
}

/// Machine-readable summary of a legalized layout.
#[derive(Debug, Serialize)]
pub struct PlacementReport<'a> {
    /// Cut cost of the chosen partition.
    pub cut_cost: usize,
    /// Sum of `|dx| + |dy|` over placed cells.
    pub total_displacement: i64,
    /// Names of the cells that could not be placed.
    pub unplaced: Vec<&'a str>,
    /// Every cell in input order.
    pub cells: Vec<PlacedCell<'a>>,
}

/// One cell entry of a [`PlacementReport`].
#[derive(Debug, Serialize)]
pub struct PlacedCell<'a> {
    /// Cell name.
    pub name: &'a str,
    /// Final x, or the original x when unplaced.
    pub x: i64,
    /// Final y, or the original y when unplaced.
    pub y: i64,
    /// Side id, `0` or `1`.
    pub side: usize,
    /// Whether legalization found a position for the cell.
    pub placed: bool,
}

impl<'a> PlacementReport<'a> {
    /// Builds the report for a legalized layout.
    pub fn from_legalized(legalized: &'a LegalizedLayout) -> Self {
        let layout = &legalized.layout;
        let cells = layout
            .cells
            .iter()
            .map(|cell| {
                let (x, y) = final_position(cell);
                PlacedCell {
                    name: &cell.name,
                    x,
                    y,
                    side: cell.side.map_or(0, |s| s.index()),
                    placed: cell.placement.is_some(),
                }
            })
            .collect();
        let unplaced = layout
            .cells
            .iter()
            .filter(|c| c.placement.is_none())
            .map(|c| c.name.as_str())
            .collect();
        Self {
            cut_cost: legalized.cut_cost,
            total_displacement: layout.total_displacement(),
            unplaced,
            cells,
        }
    }
}

fn final_position(cell: &Cell) -> (i64, i64) {
    cell.placement
        .map_or((cell.rect.x, cell.rect.y), |p| (p.x, p.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Placement, Side};
    use crate::stage::LegalizeReport;

    fn sample() -> Layout {
        let mut layout = Layout::default();
        let a = layout.add_cell(Cell::new("a", 3, 4, 2, 2));
        let b = layout.add_cell(Cell::new("b", 9, 1, 2, 2));
        layout.cell_mut(a).side = Some(Side::Right);
        layout.cell_mut(a).placement = Some(Placement { x: 0, y: 10 });
        layout.cell_mut(b).side = Some(Side::Left);
        layout
    }

    #[test]
    fn text_lines_in_input_order() {
        let mut buf = Vec::new();
        write_placement(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "a 0 10 1\nb 9 1 0\n");
    }

    #[test]
    fn json_report_lists_unplaced() {
        let legalized = LegalizedLayout {
            layout: sample(),
            cut_cost: 2,
            report: LegalizeReport::default(),
        };
        let mut buf = Vec::new();
        write_json(&legalized, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["cut_cost"], 2);
        assert_eq!(value["total_displacement"], 9);
        assert_eq!(value["unplaced"][0], "b");
        assert_eq!(value["cells"][0]["side"], 1);
        assert_eq!(value["cells"][1]["placed"], false);
    }
}
