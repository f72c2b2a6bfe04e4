//! The tandem placement flow: partition, then legalize.
//!
//! [`place`] chains the two engines over an owned [`Layout`]. The
//! [`place_source`] variant also parses the layout text and reports a
//! malformed input as an `E301` diagnostic instead of an error, which is
//! what the command line and the integration tests want.

#![warn(missing_docs)]

use tandem_common::TandemResult;
use tandem_config::FlowConfig;
use tandem_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tandem_layout::{parse_layout, Layout, LegalizedLayout};

/// Result of running the flow over layout text.
#[derive(Debug)]
pub struct FlowResult {
    /// The placed layout, or `None` if the input could not be parsed.
    pub legalized: Option<LegalizedLayout>,
    /// All diagnostics emitted during the flow.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl FlowResult {
    /// Returns whether any errors were emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Partitions `layout` into two groups and legalizes each into the rows.
pub fn place(
    layout: Layout,
    config: &FlowConfig,
    sink: &DiagnosticSink,
) -> TandemResult<LegalizedLayout> {
    tracing::info!(
        cells = layout.cell_count(),
        terminals = layout.terminals.len(),
        rows = layout.rows.len(),
        "placing layout"
    );
    let partitioned = tandem_partition::partition(layout, &config.partition, sink)?;
    tandem_legalize::legalize(partitioned, &config.legalize, sink)
}

/// Parses `source` and runs [`place`] on it.
pub fn place_source(source: &str, config: &FlowConfig) -> TandemResult<FlowResult> {
    let sink = DiagnosticSink::new();
    let legalized = match parse_layout(source) {
        Ok(layout) => Some(place(layout, config, &sink)?),
        Err(e) => {
            sink.emit(Diagnostic::error(
                DiagnosticCode::INPUT_MALFORMED,
                e.to_string(),
            ));
            None
        }
    };

    Ok(FlowResult {
        legalized,
        diagnostics: sink.take_all(),
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
    })
}
