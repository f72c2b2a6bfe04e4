//! Two-way partitioning of a layout's cells.
//!
//! Cells become nodes of an overlap graph; [`FmPartitioner`] assigns each a
//! side with Fiduccia-Mattheyses passes driven by per-side gain buckets.
//! [`partition`] is the stage entry point: it consumes a [`Layout`] and
//! returns a [`PartitionedLayout`] whose cells all carry a side.

#![warn(missing_docs)]

pub mod buckets;
pub mod fm;
pub mod graph;

pub use buckets::GainBuckets;
pub use fm::{FmPartitioner, PartitionOutcome};
pub use graph::OverlapGraph;

use tandem_common::{InternalError, Stage, TandemResult};
use tandem_config::PartitionConfig;
use tandem_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tandem_layout::{Layout, PartitionedLayout, Side};

/// Partitions `layout` into two groups and tags every cell with its side.
///
/// Emits `W101` when the overlap graph has edges but no pass beat the
/// initial positional split.
pub fn partition(
    mut layout: Layout,
    config: &PartitionConfig,
    sink: &DiagnosticSink,
) -> TandemResult<PartitionedLayout> {
    let _span = tracing::info_span!("fm_partition", cells = layout.cell_count()).entered();

    if let Some((i, cell)) = layout
        .cells
        .iter()
        .enumerate()
        .find(|(i, c)| c.id.index() != *i)
    {
        return Err(InternalError::new(Stage::Partition, format!(
            "cell `{}` has id {} at index {i}",
            cell.name, cell.id
        )));
    }

    let outcome = FmPartitioner::new(&layout, config).run(config.max_iterations);

    if !outcome.improved && outcome.edge_count > 0 {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::PARTITION_NOT_IMPROVED,
                "partitioning never improved on the initial split",
            )
            .with_note(format!(
                "{} iterations over {} overlap edges",
                config.max_iterations, outcome.edge_count
            ))
            .with_help("raise `partition.max_iterations` or try another seed"),
        );
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (cell, side) in layout.cells.iter_mut().zip(&outcome.sides) {
        cell.side = Some(*side);
        match side {
            Side::Left => left.push(cell.id),
            Side::Right => right.push(cell.id),
        }
    }

    tracing::info!(
        cut_cost = outcome.cut_cost,
        left = left.len(),
        right = right.len(),
        improved = outcome.improved,
        "partition complete"
    );

    Ok(PartitionedLayout {
        layout,
        left,
        right,
        cut_cost: outcome.cut_cost,
    })
}
