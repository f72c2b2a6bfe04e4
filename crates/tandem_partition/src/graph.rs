//! Overlap adjacency graph over the layout's cells.
//!
//! Two cells are adjacent iff their rectangles strictly overlap in both
//! axes. Neighbor lists hold plain cell indices, so the graph owns no
//! references into the layout.

use tandem_layout::{Cell, Side};

/// Undirected overlap graph, one neighbor list per cell index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapGraph {
    adjacency: Vec<Vec<usize>>,
}

impl OverlapGraph {
    /// Builds the graph with an x-sorted sweep.
    ///
    /// Cells are visited in order of increasing x; for each cell only the
    /// following cells whose x does not exceed its right edge are tested.
    /// The result does not depend on the sort, only the running time does.
    pub fn build(cells: &[Cell]) -> Self {
        let mut adjacency = vec![Vec::new(); cells.len()];
        let mut order: Vec<usize> = (0..cells.len()).collect();
        order.sort_by_key(|&i| cells[i].rect.x);

        for (pos, &a) in order.iter().enumerate() {
            let rect_a = &cells[a].rect;
            for &b in &order[pos + 1..] {
                let rect_b = &cells[b].rect;
                if rect_b.x > rect_a.right() {
                    break;
                }
                if rect_a.overlaps(rect_b) {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
        }

        Self { adjacency }
    }

    /// Returns the number of nodes (cells).
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns the neighbors of `cell`.
    pub fn neighbors(&self, cell: usize) -> &[usize] {
        &self.adjacency[cell]
    }

    /// Returns the largest degree, or 0 for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns whether `a` and `b` are adjacent.
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Counts the edges whose endpoints lie on different sides.
    ///
    /// Each edge is counted once, from its side-0 endpoint.
    pub fn cut_cost(&self, sides: &[Side]) -> usize {
        sides
            .iter()
            .enumerate()
            .filter(|(_, side)| **side == Side::Left)
            .map(|(cell, _)| {
                self.adjacency[cell]
                    .iter()
                    .filter(|&&n| sides[n] == Side::Right)
                    .count()
            })
            .sum()
    }

    /// Returns `same-side neighbors - opposite-side neighbors` for `cell`.
    ///
    /// Moving the cell to the other side changes the cut by exactly this.
    pub fn gain(&self, cell: usize, sides: &[Side]) -> i64 {
        self.adjacency[cell]
            .iter()
            .map(|&n| if sides[n] == sides[cell] { 1 } else { -1 })
            .sum()
    }
}
