//! Error types for reading layout input.

/// Errors produced while reading a layout record stream.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a record.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// The field that was being read.
        expected: &'static str,
    },

    /// A numeric field held something that is not an integer.
    #[error("line {line}: expected {expected}, found '{token}'")]
    InvalidNumber {
        /// 1-based line of the offending token.
        line: usize,
        /// The offending token.
        token: String,
        /// The field that was being read.
        expected: &'static str,
    },

    /// A record describes impossible geometry.
    #[error("line {line}: {name}: {reason}")]
    InvalidGeometry {
        /// 1-based line of the record.
        line: usize,
        /// The record's name, or its key for unnamed records.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}
