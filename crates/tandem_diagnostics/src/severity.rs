//! Diagnostic severity levels.

use crate::code::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is, from `Note` up to `Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Context about the layout, e.g. a row fully covered by terminals.
    Note,
    /// A degraded result the user should review, e.g. an unplaced cell.
    Warning,
    /// The flow could not produce a placement.
    Error,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: [Severity; 3] = [Severity::Note, Severity::Warning, Severity::Error];

    /// Lower-case label used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Position in [`Severity::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Category> for Severity {
    fn from(category: Category) -> Self {
        match category {
            Category::Note => Severity::Note,
            Category::Warning => Severity::Warning,
            Category::Error => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::ALL.windows(2).all(|w| w[0] < w[1]));
        for (i, s) in Severity::ALL.into_iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn follows_code_category() {
        assert_eq!(
            Severity::from(DiagnosticCode::ROW_BLOCKED.category),
            Severity::Note
        );
        assert_eq!(
            Severity::from(DiagnosticCode::CELL_UNPLACED.category),
            Severity::Warning
        );
        assert_eq!(
            Severity::from(DiagnosticCode::INPUT_MALFORMED.category),
            Severity::Error
        );
    }

    #[test]
    fn labels() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.as_str(), "note");
    }
}
