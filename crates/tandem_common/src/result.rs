//! Result type for engine invariant violations.

use std::fmt;

/// The result type returned by the partitioning and legalization stages.
///
/// `Ok` may still describe a degraded placement (unplaced cells are
/// reported as diagnostics). `Err` means tandem broke one of its own
/// invariants; it never describes a problem with the user's layout.
pub type TandemResult<T> = Result<T, InternalError>;

/// The pipeline stage that detected an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Two-way partitioning.
    Partition,
    /// Row legalization.
    Legalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Partition => "partition",
            Stage::Legalize => "legalize",
        })
    }
}

/// A broken invariant inside tandem.
#[derive(Debug, thiserror::Error)]
#[error("internal placer error in {stage}: {message}")]
pub struct InternalError {
    /// Stage that noticed the problem.
    pub stage: Stage,
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an error raised by `stage`.
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}
