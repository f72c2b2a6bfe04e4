//! Shared helpers for CLI commands: configuration lookup, layout loading
//! and diagnostic reporting.

use std::path::{Path, PathBuf};

use tandem_config::{FlowConfig, OutputFormat};
use tandem_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use tandem_layout::{parse_layout, Layout};

use crate::{GlobalArgs, PlacementFormat};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "tandem.toml";

/// Flag values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Number of partitioning restarts.
    pub iterations: Option<usize>,
    /// Seed for the partitioning restarts.
    pub seed: Option<u64>,
    /// Placement file format.
    pub format: Option<PlacementFormat>,
    /// Legalize the two groups concurrently.
    pub parallel: bool,
}

/// Finds the configuration to use: `--config` if given, else
/// `tandem.toml` in the working directory if present.
pub fn resolve_config_path(global: &GlobalArgs) -> Option<PathBuf> {
    if let Some(path) = &global.config {
        return Some(path.clone());
    }
    let local = PathBuf::from(CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Loads the flow configuration and applies command-line overrides.
pub fn load_flow_config(
    global: &GlobalArgs,
    overrides: &Overrides,
) -> Result<FlowConfig, Box<dyn std::error::Error>> {
    let mut config = match resolve_config_path(global) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            tandem_config::load_config(&path)?
        }
        None => FlowConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    tandem_config::loader::validate_config(&config)?;
    Ok(config)
}

/// Writes flag values over `config`.
pub fn apply_overrides(config: &mut FlowConfig, overrides: &Overrides) {
    if let Some(iterations) = overrides.iterations {
        config.partition.max_iterations = iterations;
    }
    if let Some(seed) = overrides.seed {
        config.partition.seed = Some(seed);
    }
    if let Some(format) = overrides.format {
        config.output.format = match format {
            PlacementFormat::Text => OutputFormat::Text,
            PlacementFormat::Json => OutputFormat::Json,
        };
    }
    if overrides.parallel {
        config.legalize.parallel = true;
    }
}

/// Reads and parses a layout file.
///
/// A file that cannot be read is an error; a file that cannot be parsed is
/// reported as an `E301` diagnostic and yields `None`.
pub fn read_layout(
    path: &Path,
    sink: &DiagnosticSink,
) -> Result<Option<Layout>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    match parse_layout(&text) {
        Ok(layout) => Ok(Some(layout)),
        Err(e) => {
            sink.emit(
                Diagnostic::error(DiagnosticCode::INPUT_MALFORMED, e.to_string())
                    .with_subject(path.display().to_string()),
            );
            Ok(None)
        }
    }
}

/// Renders diagnostics to stderr, followed by a summary line unless quiet.
pub fn report_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        if global.quiet && diag.severity != Severity::Error {
            continue;
        }
        eprint!("{}", renderer.render(diag));
    }

    if !global.quiet {
        let errors = count(diagnostics, Severity::Error);
        let warnings = count(diagnostics, Severity::Warning);
        if errors > 0 || warnings > 0 {
            eprintln!("   Finished with {errors} error(s), {warnings} warning(s)");
        }
    }
}

fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
