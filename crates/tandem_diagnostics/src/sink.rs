//! Diagnostic accumulator shared by the flow stages.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard};

/// Collects diagnostics from every stage of a flow.
///
/// The two legalization groups may run on separate rayon workers and emit
/// into the same sink, so all state sits behind one mutex. Per-severity
/// totals count everything ever emitted, including drained diagnostics.
#[derive(Default)]
pub struct DiagnosticSink {
    state: Mutex<SinkState>,
}

#[derive(Default)]
struct SinkState {
    pending: Vec<Diagnostic>,
    totals: [usize; 3],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SinkState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        let mut state = self.state();
        state.totals[diag.severity.index()] += 1;
        state.pending.push(diag);
    }

    /// Number of diagnostics of `severity` emitted so far.
    pub fn total(&self, severity: Severity) -> usize {
        self.state().totals[severity.index()]
    }

    /// Returns whether any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.total(Severity::Error)
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.total(Severity::Warning)
    }

    /// Number of held diagnostics carrying `code`.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.state().pending.iter().filter(|d| d.code == code).count()
    }

    /// Takes the held diagnostics, leaving the sink empty. Totals are kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.state().pending)
    }

    /// Returns a copy of the held diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.state().pending.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unplaced(cell: &str) -> Diagnostic {
        Diagnostic::warning(DiagnosticCode::CELL_UNPLACED, "no room").with_subject(cell)
    }

    #[test]
    fn starts_empty() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 0);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn counts_by_severity_and_code() {
        let sink = DiagnosticSink::new();
        sink.emit(unplaced("c1"));
        sink.emit(unplaced("c2"));
        sink.emit(Diagnostic::new(DiagnosticCode::ROW_BLOCKED, "row 3 blocked"));
        assert_eq!(sink.warning_count(), 2);
        assert_eq!(sink.total(Severity::Note), 1);
        assert_eq!(sink.count_code(DiagnosticCode::CELL_UNPLACED), 2);
        assert!(!sink.has_errors());
    }

    #[test]
    fn draining_keeps_totals() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error(DiagnosticCode::INPUT_MALFORMED, "bad count"));
        sink.emit(unplaced("c1"));
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.count_code(DiagnosticCode::CELL_UNPLACED), 0);
        assert_eq!(sink.error_count(), 1);
        assert!(sink.has_errors());
    }

    #[test]
    fn shared_across_rayon_style_workers() {
        let sink = DiagnosticSink::new();
        std::thread::scope(|s| {
            for side in 0..2 {
                let sink = &sink;
                s.spawn(move || {
                    for i in 0..100 {
                        sink.emit(unplaced(&format!("s{side}c{i}")));
                    }
                });
            }
        });
        assert_eq!(sink.warning_count(), 200);
        assert_eq!(sink.diagnostics().len(), 200);
    }
}
