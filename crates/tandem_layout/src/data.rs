//! Core layout data structures.
//!
//! Defines the chip model shared by both engines: the die outline, the
//! placement row sites, fixed terminals, and the movable cells with their
//! partition side and final placement. The [`Layout`] is the value that is
//! moved from the parser through partitioning and legalization.

use crate::ids::{CellId, TerminalId};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its lower-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i64,
    /// Bottom edge.
    pub y: i64,
    /// Extent along x.
    pub width: i64,
    /// Extent along y.
    pub height: i64,
}

impl Rect {
    /// Creates a rectangle from its lower-left corner and size.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Exclusive top edge.
    pub fn top(&self) -> i64 {
        self.y + self.height
    }

    /// Returns the area of the rectangle.
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Returns whether the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x < self.right()
            && other.right() > self.x
            && other.y < self.top()
            && other.top() > self.y
    }
}

/// One of the two partitions a cell can be assigned to.
///
/// Serialized and written as side id `0` (left) or `1` (right).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    /// Side id 0.
    Left,
    /// Side id 1.
    Right,
}

impl Side {
    /// Both sides in id order.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Returns the side id, usable as an index into two-element arrays.
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Returns the side with the given id.
    pub fn from_index(index: usize) -> Option<Side> {
        match index {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    /// Returns the other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The legalized lower-left corner of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Placement {
    /// Final x coordinate.
    pub x: i64,
    /// Final y coordinate (the y of the row the cell landed in).
    pub y: i64,
}

/// A movable rectangular cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Position in the input list; assigned by [`Layout::add_cell`].
    pub id: CellId,
    /// Instance name, unique within the layout.
    pub name: String,
    /// Global-placement position and size.
    pub rect: Rect,
    /// Legalization weight of the cell (1 unless set otherwise).
    pub weight: i64,
    /// Partition side, set by the partitioning stage.
    pub side: Option<Side>,
    /// Final position, set by the legalization stage. `None` means the
    /// cell could not be placed.
    pub placement: Option<Placement>,
}

impl Cell {
    /// Creates an unpartitioned, unplaced cell with unit weight.
    pub fn new(name: impl Into<String>, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            id: CellId::from_raw(0),
            name: name.into(),
            rect: Rect::new(x, y, width, height),
            weight: 1,
            side: None,
            placement: None,
        }
    }

    /// Returns the cell area.
    pub fn area(&self) -> i64 {
        self.rect.area()
    }

    /// Returns `|final_x - x| + |final_y - y|`, or `None` if unplaced.
    pub fn displacement(&self) -> Option<i64> {
        self.placement
            .map(|p| (p.x - self.rect.x).abs() + (p.y - self.rect.y).abs())
    }
}

/// A fixed obstruction; immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    /// Position in the input list.
    pub id: TerminalId,
    /// Terminal name.
    pub name: String,
    /// Footprint carved out of every row it intersects.
    pub rect: Rect,
}

/// The chip bounding rectangle, anchored at the origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Die {
    /// Chip width.
    pub width: i64,
    /// Chip height.
    pub height: i64,
}

/// A horizontal placement band before any terminal is subtracted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RowSite {
    /// Left edge of the row.
    pub x: i64,
    /// Bottom edge of the row.
    pub y: i64,
    /// Usable width of the row.
    pub width: i64,
    /// Row height.
    pub height: i64,
}

/// The complete chip layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Chip outline.
    pub die: Die,
    /// Placement rows, ordered by increasing `y`.
    pub rows: Vec<RowSite>,
    /// Fixed terminals in input order.
    pub terminals: Vec<Terminal>,
    /// Movable cells in input order; `cells[i].id == i`.
    pub cells: Vec<Cell>,
    /// Sum of all cell areas, accumulated by [`add_cell`](Self::add_cell).
    pub total_cell_area: i64,
    /// Largest single cell area.
    pub max_cell_area: i64,
}

impl Layout {
    /// Creates an empty layout with the given die.
    pub fn new(die: Die) -> Self {
        Self {
            die,
            ..Self::default()
        }
    }

    /// Replaces the rows with `num_rows` rows of `row_height` stacked from
    /// `y = 0`, each spanning the full die width.
    pub fn generate_rows(&mut self, row_height: i64, num_rows: usize) {
        self.rows = (0..num_rows)
            .map(|i| RowSite {
                x: 0,
                y: row_height * i as i64,
                width: self.die.width,
                height: row_height,
            })
            .collect();
    }

    /// Adds a cell, assigns its ID, and updates the area totals.
    pub fn add_cell(&mut self, mut cell: Cell) -> CellId {
        let id = CellId::from_raw(self.cells.len() as u32);
        cell.id = id;
        let area = cell.area();
        self.total_cell_area += area;
        self.max_cell_area = self.max_cell_area.max(area);
        self.cells.push(cell);
        id
    }

    /// Adds a terminal and returns its ID.
    pub fn add_terminal(&mut self, name: impl Into<String>, rect: Rect) -> TerminalId {
        let id = TerminalId::from_raw(self.terminals.len() as u32);
        self.terminals.push(Terminal {
            id,
            name: name.into(),
            rect,
        });
        id
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Returns a mutable reference to the cell with the given ID.
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    /// Looks a cell up by name; the first match in input order wins.
    pub fn cell_named(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of cells with a final placement.
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.placement.is_some()).count()
    }

    /// Returns whether every cell has a final placement.
    pub fn is_fully_placed(&self) -> bool {
        self.cells.iter().all(|c| c.placement.is_some())
    }

    /// Returns the IDs of cells without a final placement.
    pub fn unplaced_cells(&self) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|c| c.placement.is_none())
            .map(|c| c.id)
            .collect()
    }

    /// Sums the displacement of every placed cell.
    pub fn total_displacement(&self) -> i64 {
        self.cells.iter().filter_map(Cell::displacement).sum()
    }

    /// Sums the area of the cells currently assigned to `side`.
    pub fn side_area(&self, side: Side) -> i64 {
        self.cells
            .iter()
            .filter(|c| c.side == Some(side))
            .map(Cell::area)
            .sum()
    }
}
