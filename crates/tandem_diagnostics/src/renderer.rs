//! Diagnostic rendering backends.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W201]: cell could not be placed
///   --> cell c12
///    = note: no subrow has 40 units of free width
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(diag.severity, &header),
            diag.message
        ));

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn render_warning_with_subject_and_notes() {
        let diag = Diagnostic::warning(DiagnosticCode::CELL_UNPLACED, "cell could not be placed")
            .with_subject("cell c12")
            .with_note("no subrow has 40 units of free width")
            .with_help("widen the die or add rows");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.starts_with("warning[W201]: cell could not be placed\n"));
        assert!(output.contains("  --> cell c12\n"));
        assert!(output.contains("= note: no subrow has 40 units of free width"));
        assert!(output.contains("= help: widen the die or add rows"));
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::new(DiagnosticCode::PARTITION_NOT_IMPROVED, "kept initial split");
        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(output, "warning[W101]: kept initial split\n");
    }

    #[test]
    fn render_colored_header() {
        let diag = Diagnostic::error(DiagnosticCode::INPUT_MALFORMED, "truncated record");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.contains("\x1b[1;31merror[E301]\x1b[0m"));
    }
}
