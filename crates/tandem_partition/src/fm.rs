//! Fiduccia-Mattheyses improvement passes over the overlap graph.
//!
//! The engine keeps the split with the *largest* cut seen so far. Each outer
//! iteration shuffles the side vector and runs one pass of single-cell moves
//! chosen from the gain buckets under an area-balance constraint.

use crate::buckets::GainBuckets;
use crate::graph::OverlapGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tandem_config::PartitionConfig;
use tandem_layout::{Layout, Side};

/// Result of a full partitioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Side of every cell, indexed by cell index.
    pub sides: Vec<Side>,
    /// Cut cost of `sides`.
    pub cut_cost: usize,
    /// Whether some pass beat the initial split. When false, `sides` is
    /// the initial half split.
    pub improved: bool,
    /// Best cost after each outer iteration.
    pub history: Vec<usize>,
    /// Number of edges in the overlap graph.
    pub edge_count: usize,
}

/// The partitioning engine state for one layout.
pub struct FmPartitioner {
    graph: OverlapGraph,
    areas: Vec<i64>,
    total_area: i64,
    max_cell_area: i64,
    initial: Vec<Side>,
    sides: Vec<Side>,
    best: Option<Vec<Side>>,
    best_cost: usize,
    stagnation_limit: usize,
    rng: StdRng,
}

impl FmPartitioner {
    /// Builds the overlap graph and the initial positional split: the first
    /// `n / 2` cells go left, the rest right.
    pub fn new(layout: &Layout, config: &PartitionConfig) -> Self {
        let graph = OverlapGraph::build(&layout.cells);
        let n = layout.cell_count();
        let initial: Vec<Side> = (0..n)
            .map(|i| if i < n / 2 { Side::Left } else { Side::Right })
            .collect();
        let best_cost = graph.cut_cost(&initial);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::debug!(
            cells = n,
            edges = graph.edge_count(),
            max_degree = graph.max_degree(),
            initial_cost = best_cost,
            "built overlap graph"
        );

        Self {
            areas: layout.cells.iter().map(|c| c.area()).collect(),
            total_area: layout.total_cell_area,
            max_cell_area: layout.max_cell_area,
            sides: initial.clone(),
            initial,
            best: None,
            best_cost,
            stagnation_limit: config.stagnation_limit.max(1),
            rng,
            graph,
        }
    }

    /// Returns the overlap graph.
    pub fn graph(&self) -> &OverlapGraph {
        &self.graph
    }

    /// Runs `max_iterations` shuffled restarts and returns the best split.
    pub fn run(mut self, max_iterations: usize) -> PartitionOutcome {
        let mut history = Vec::with_capacity(max_iterations);
        for iteration in 0..max_iterations {
            self.sides.shuffle(&mut self.rng);
            let steps = self.improvement_pass();
            tracing::trace!(iteration, steps, best = self.best_cost, "pass finished");
            history.push(self.best_cost);
        }

        let improved = self.best.is_some();
        let sides = self.best.unwrap_or(self.initial);
        PartitionOutcome {
            cut_cost: self.best_cost,
            sides,
            improved,
            history,
            edge_count: self.graph.edge_count(),
        }
    }

    /// Right acts first when it holds more than half of the cells.
    fn starting_side(&self) -> Side {
        let right = self.sides.iter().filter(|&&s| s == Side::Right).count();
        if 2 * right > self.sides.len() {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Checks `|area - total/2| <= max_cell_area` without halving.
    fn is_balanced(&self, area: i64) -> bool {
        let twice = 2 * area;
        twice >= self.total_area - 2 * self.max_cell_area
            && twice <= self.total_area + 2 * self.max_cell_area
    }

    /// Picks the cell `acting` moves next, or yields when its buckets hold
    /// no reachable unlocked cell or the move would unbalance `acting`.
    fn select(
        &self,
        buckets: &GainBuckets,
        locked: &[bool],
        side_area: &[i64; 2],
        acting: Side,
    ) -> Step {
        match buckets.best_candidate(acting, locked) {
            Some(cell) if self.is_balanced(side_area[acting.index()] - self.areas[cell]) => {
                Step::Move(cell)
            }
            _ => Step::Yield,
        }
    }

    /// Runs one pass over the current side vector and returns the number of
    /// steps taken before it finished or stagnated.
    fn improvement_pass(&mut self) -> usize {
        let n = self.sides.len();
        let mut buckets = GainBuckets::new(n, self.graph.max_degree());
        for cell in 0..n {
            buckets.insert(cell, self.sides[cell], self.graph.gain(cell, &self.sides));
        }
        let mut locked = vec![false; n];
        let mut side_area = [0i64; 2];
        for (cell, side) in self.sides.iter().enumerate() {
            side_area[side.index()] += self.areas[cell];
        }

        let mut cut = self.graph.cut_cost(&self.sides) as i64;
        let mut acting = self.starting_side();
        let mut stagnation = 0;
        let mut steps = 0;

        while steps < n {
            steps += 1;
            let step = self.select(&buckets, &locked, &side_area, acting);
            let target = acting.opposite();
            if let Step::Move(cell) = step {
                let area = self.areas[cell];
                cut += buckets.gain(cell);
                buckets.remove(cell);
                locked[cell] = true;
                self.sides[cell] = target;
                side_area[acting.index()] -= area;
                side_area[target.index()] += area;

                for &neighbor in self.graph.neighbors(cell) {
                    if locked[neighbor] {
                        continue;
                    }
                    let delta = if self.sides[neighbor] == target { 2 } else { -2 };
                    buckets.adjust(neighbor, delta);
                }
                debug_assert_eq!(cut as usize, self.graph.cut_cost(&self.sides));
            }
            acting = target;

            // Only committed moves leave both sides within the balance bound.
            if matches!(step, Step::Move(_)) && cut as usize > self.best_cost {
                self.best_cost = cut as usize;
                self.best = Some(self.sides.clone());
                stagnation = 0;
            } else {
                stagnation += 1;
                if stagnation >= self.stagnation_limit {
                    break;
                }
            }
        }
        steps
    }
}

/// What the acting side does on one step of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Move(usize),
    /// Nothing to move; the other side acts next.
    Yield,
}
