//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
    /// Informational notes, prefixed with `N`.
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number, e.g.
/// `W201`. The hundreds digit names the stage: 1xx partitioning, 2xx
/// legalization, 3xx input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// No partitioning pass improved on the initial positional split.
    pub const PARTITION_NOT_IMPROVED: Self = Self::new(Category::Warning, 101);
    /// A cell found no subrow with enough free width and stays unplaced.
    pub const CELL_UNPLACED: Self = Self::new(Category::Warning, 201);
    /// Terminals cover a whole row so it offers no placement space.
    pub const ROW_BLOCKED: Self = Self::new(Category::Note, 202);
    /// A group holds more cell width than its die has free row width.
    pub const CAPACITY_EXCEEDED: Self = Self::new(Category::Warning, 203);
    /// The layout input could not be read.
    pub const INPUT_MALFORMED: Self = Self::new(Category::Error, 301);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Error.prefix(), 'E');
        assert_eq!(Category::Warning.prefix(), 'W');
        assert_eq!(Category::Note.prefix(), 'N');
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", DiagnosticCode::CELL_UNPLACED), "W201");
        assert_eq!(format!("{}", DiagnosticCode::ROW_BLOCKED), "N202");
        let code = DiagnosticCode::new(Category::Error, 3);
        assert_eq!(format!("{code}"), "E003");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::PARTITION_NOT_IMPROVED;
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
