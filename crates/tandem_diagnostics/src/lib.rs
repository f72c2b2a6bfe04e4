//! Structured diagnostics for the tandem placer.
//!
//! Engines report user-facing problems (cells that found no room, rows fully
//! covered by terminals, partitions that never improved) as [`Diagnostic`]s
//! pushed into a thread-safe [`DiagnosticSink`]. The CLI drains the sink and
//! formats each entry with a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
