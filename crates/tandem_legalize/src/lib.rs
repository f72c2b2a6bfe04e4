//! Row legalization with the Abacus algorithm.
//!
//! The left and right groups of a [`PartitionedLayout`] are treated as two
//! dies sharing one floorplan: each group is legalized into its own copy of
//! the terminal-obstructed rows. [`legalize`] writes the final position of
//! every placed cell and reports the ones that did not fit.

#![warn(missing_docs)]

pub mod abacus;
pub mod cluster;
pub mod row;
pub mod subrow;

pub use abacus::{GroupPlacement, Legalizer};
pub use cluster::Cluster;
pub use row::{Overlap, Row};
pub use subrow::{CellSlot, Subrow};

use tandem_common::{InternalError, Stage, TandemResult};
use tandem_config::LegalizeConfig;
use tandem_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tandem_layout::{
    CellId, LegalizeReport, LegalizedLayout, PartitionedLayout, Side, SideReport,
};

/// Legalizes both groups of `partitioned` and fills in cell placements.
///
/// Never fails on a crowded layout: cells without room keep
/// `placement == None` and are reported with `W201`.
pub fn legalize(
    partitioned: PartitionedLayout,
    config: &LegalizeConfig,
    sink: &DiagnosticSink,
) -> TandemResult<LegalizedLayout> {
    let _span = tracing::info_span!(
        "abacus_legalize",
        left = partitioned.left.len(),
        right = partitioned.right.len()
    )
    .entered();

    let PartitionedLayout {
        mut layout,
        left,
        right,
        cut_cost,
    } = partitioned;

    let base = Legalizer::new(&layout, config);
    for index in base.blocked_rows() {
        let row = &base.rows()[index];
        sink.emit(
            Diagnostic::new(
                DiagnosticCode::ROW_BLOCKED,
                "terminals leave no placement space in this row",
            )
            .with_subject(format!("row {index} (y = {})", row.y)),
        );
    }

    let mut groups = [Vec::new(), Vec::new()];
    for (side, ids) in [(Side::Left, &left), (Side::Right, &right)] {
        for &id in ids {
            let cell = layout.cells.get(id.index()).ok_or_else(|| {
                InternalError::new(
                    Stage::Legalize,
                    format!("group member {id} is not a cell of this layout"),
                )
            })?;
            if cell.side != Some(side) {
                return Err(InternalError::new(Stage::Legalize, format!(
                    "cell `{}` is grouped {side:?} but tagged {:?}",
                    cell.name, cell.side
                )));
            }
            groups[side.index()].push(CellSlot::from_cell(cell));
        }
    }

    let capacity = base.free_width();
    for side in Side::BOTH {
        let demand: i64 = groups[side.index()].iter().map(|c| c.width).sum();
        if demand > capacity {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::CAPACITY_EXCEEDED,
                    format!("cells need {demand} units of row width but only {capacity} are free"),
                )
                .with_subject(format!("{side:?} group"))
                .with_note("some cells of this group cannot be placed"),
            );
        }
    }

    let [left_cells, right_cells] = groups;
    let run = |cells: Vec<CellSlot>| base.clone().place_group(cells);
    let outcomes = if config.parallel {
        let (l, r) = rayon::join(|| run(left_cells), || run(right_cells));
        [l, r]
    } else {
        [run(left_cells), run(right_cells)]
    };

    let mut report = LegalizeReport::default();
    for (side, outcome) in Side::BOTH.into_iter().zip(outcomes) {
        for &(id, placement) in &outcome.placed {
            layout.cell_mut(id).placement = Some(placement);
        }
        for &id in &outcome.unplaced {
            emit_unplaced(sink, &layout.cell(id).name, id);
        }
        let displacement = outcome
            .placed
            .iter()
            .filter_map(|(id, _)| layout.cell(*id).displacement())
            .sum();
        if displacement != outcome.cost {
            return Err(InternalError::new(Stage::Legalize, format!(
                "{side:?} displacement {displacement} disagrees with committed cost {}",
                outcome.cost
            )));
        }
        tracing::debug!(
            ?side,
            placed = outcome.placed.len(),
            unplaced = outcome.unplaced.len(),
            displacement,
            "group legalized"
        );
        report.sides[side.index()] = SideReport {
            placed: outcome.placed.len(),
            unplaced: outcome.unplaced,
            displacement,
        };
    }

    tracing::info!(
        placed = report.placed(),
        unplaced = report.unplaced().len(),
        displacement = report.total_displacement(),
        "legalization complete"
    );

    Ok(LegalizedLayout {
        layout,
        cut_cost,
        report,
    })
}

fn emit_unplaced(sink: &DiagnosticSink, name: &str, id: CellId) {
    tracing::trace!(cell = name, %id, "no subrow with room");
    sink.emit(
        Diagnostic::warning(
            DiagnosticCode::CELL_UNPLACED,
            "no subrow has enough free width for this cell",
        )
        .with_subject(format!("cell `{name}`"))
        .with_help("add rows or reduce cell widths"),
    );
}
