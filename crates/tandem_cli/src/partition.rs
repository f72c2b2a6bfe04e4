//! `tandem partition`: run the partitioning engine alone and print the split.

use tandem_diagnostics::DiagnosticSink;
use tandem_layout::{PartitionedLayout, Side};

use crate::pipeline::{load_flow_config, read_layout, report_diagnostics, Overrides};
use crate::{GlobalArgs, PartitionArgs};

/// Runs the `tandem partition` command.
pub fn run(args: &PartitionArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_flow_config(
        global,
        &Overrides {
            iterations: args.iterations,
            seed: args.seed,
            ..Overrides::default()
        },
    )?;

    let sink = DiagnosticSink::new();
    let Some(layout) = read_layout(&args.input, &sink)? else {
        report_diagnostics(&sink.take_all(), global);
        return Ok(1);
    };

    let partitioned = tandem_partition::partition(layout, &config.partition, &sink)?;
    report_diagnostics(&sink.take_all(), global);
    println!("{}", summary(&partitioned));
    Ok(0)
}

/// Formats the cut cost and both groups' sizes.
fn summary(partitioned: &PartitionedLayout) -> String {
    let mut out = format!("cut cost: {}", partitioned.cut_cost);
    for side in Side::BOTH {
        out.push_str(&format!(
            "\nside {}: {} cells, area {}",
            side.index(),
            partitioned.group(side).len(),
            partitioned.layout.side_area(side)
        ));
    }
    out
}
