//! `tandem stats`: summarize a layout file.

use tandem_diagnostics::DiagnosticSink;
use tandem_layout::Layout;
use tandem_partition::OverlapGraph;

use crate::pipeline::{read_layout, report_diagnostics};
use crate::{GlobalArgs, StatsArgs};

/// Runs the `tandem stats` command.
pub fn run(args: &StatsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let Some(layout) = read_layout(&args.input, &sink)? else {
        report_diagnostics(&sink.take_all(), global);
        return Ok(1);
    };
    println!("{}", describe(&layout));
    Ok(0)
}

fn describe(layout: &Layout) -> String {
    let graph = OverlapGraph::build(&layout.cells);
    let row_height = layout.rows.first().map_or(0, |r| r.height);
    let cell_width: i64 = layout.cells.iter().map(|c| c.rect.width).sum();
    let row_width: i64 = layout.rows.iter().map(|r| r.width).sum();

    [
        format!("die: {} x {}", layout.die.width, layout.die.height),
        format!("rows: {} (height {row_height})", layout.rows.len()),
        format!("terminals: {}", layout.terminals.len()),
        format!("cells: {}", layout.cell_count()),
        format!(
            "cell area: {} total, {} max",
            layout.total_cell_area, layout.max_cell_area
        ),
        format!("cell width: {cell_width} of {row_width} row width"),
        format!(
            "overlaps: {} pairs, max degree {}",
            graph.edge_count(),
            graph.max_degree()
        ),
    ]
    .join("\n")
}
