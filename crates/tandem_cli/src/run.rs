//! `tandem run`: partition, legalize and write the placement.

use std::fs::File;
use std::io::{BufWriter, Write};

use tandem_config::OutputFormat;
use tandem_layout::{write_json, write_placement};

use crate::pipeline::{load_flow_config, report_diagnostics, Overrides};
use crate::{GlobalArgs, RunArgs};

/// Runs the `tandem run` command.
///
/// Returns exit code 0 when the placement was written, 1 when the input
/// could not be parsed.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_flow_config(
        global,
        &Overrides {
            iterations: args.iterations,
            seed: args.seed,
            format: args.format,
            parallel: args.parallel,
        },
    )?;

    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("cannot read {}: {e}", args.input.display()))?;
    if !global.quiet {
        eprintln!("    Placing {}", args.input.display());
    }

    let result = tandem_flow::place_source(&source, &config)?;
    report_diagnostics(&result.diagnostics, global);
    let Some(legalized) = result.legalized else {
        return Ok(1);
    };

    if !global.quiet {
        eprintln!(
            "   Partitioned {} cells (cut cost {})",
            legalized.layout.cell_count(),
            legalized.cut_cost
        );
        eprintln!(
            "   Legalized {} cells, {} unplaced (displacement {})",
            legalized.report.placed(),
            legalized.report.unplaced().len(),
            legalized.report.total_displacement()
        );
    }

    let file = File::create(&args.output)
        .map_err(|e| format!("cannot create {}: {e}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    match config.output.format {
        OutputFormat::Text => write_placement(&legalized.layout, &mut out)?,
        OutputFormat::Json => write_json(&legalized, &mut out)?,
    }
    out.flush()
        .map_err(|e| format!("cannot write {}: {e}", args.output.display()))?;

    if !global.quiet {
        eprintln!("      Wrote {}", args.output.display());
    }
    Ok(if result.error_count > 0 { 1 } else { 0 })
}
