//! Reader for the whitespace-tokenized layout record stream.
//!
//! Recognized keys and their fields:
//!
//! ```text
//! DieSize  <width> <height>
//! DieRows  <row_height> <num_rows>
//! Terminal <count>  then <count> x  <name> <x> <y> <width> <height>
//! NumCell  <count>  then <count> x  <name> <x> <y> <width> <height>
//! ```
//!
//! Any other token in key position is skipped. Rows are generated once the
//! whole stream has been read, so `DieRows` may appear before `DieSize`;
//! the stacked rows must fit inside the die height.

use crate::data::{Cell, Die, Layout, Rect};
use crate::error::ParseError;
use std::path::Path;

/// Upper bound on `DieRows`; rows are materialized eagerly.
pub const MAX_ROWS: usize = 1 << 20;

/// Reads and parses a layout file.
pub fn load_layout(path: &Path) -> Result<Layout, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_layout(&content)
}

/// Parses a layout from the text of a record stream.
pub fn parse_layout(input: &str) -> Result<Layout, ParseError> {
    let mut tokens = Tokens::new(input);
    let mut layout = Layout::default();
    let mut row_layout = None;

    while let Some((line, key)) = tokens.next() {
        match key {
            "DieSize" => {
                let width = tokens.int("die width")?;
                let height = tokens.int("die height")?;
                if width <= 0 || height <= 0 {
                    return Err(ParseError::InvalidGeometry {
                        line,
                        name: key.to_string(),
                        reason: format!("die size {width}x{height} must be positive"),
                    });
                }
                layout.die = Die { width, height };
            }
            "DieRows" => {
                let row_height = tokens.int("row height")?;
                let num_rows = tokens.count("row count")?;
                if row_height <= 0 {
                    return Err(ParseError::InvalidGeometry {
                        line,
                        name: key.to_string(),
                        reason: format!("row height {row_height} must be positive"),
                    });
                }
                row_layout = Some((line, row_height, num_rows));
            }
            "Terminal" => {
                let count = tokens.count("terminal count")?;
                for _ in 0..count {
                    let (name, rect) = tokens.record("terminal")?;
                    layout.add_terminal(name, rect);
                }
            }
            "NumCell" => {
                let count = tokens.count("cell count")?;
                for _ in 0..count {
                    let (name, rect) = tokens.record("cell")?;
                    layout.add_cell(Cell::new(name, rect.x, rect.y, rect.width, rect.height));
                }
            }
            other => {
                tracing::trace!(line, token = other, "skipping unrecognized key");
            }
        }
    }

    if let Some((line, row_height, num_rows)) = row_layout {
        let span = i64::try_from(num_rows)
            .ok()
            .and_then(|n| row_height.checked_mul(n));
        match span {
            Some(span) if num_rows <= MAX_ROWS && span <= layout.die.height => {
                layout.generate_rows(row_height, num_rows);
            }
            _ => {
                return Err(ParseError::InvalidGeometry {
                    line,
                    name: "DieRows".to_string(),
                    reason: format!(
                        "{num_rows} rows of height {row_height} do not fit a die of height {}",
                        layout.die.height
                    ),
                });
            }
        }
    }
    tracing::debug!(
        cells = layout.cells.len(),
        terminals = layout.terminals.len(),
        rows = layout.rows.len(),
        "parsed layout"
    );
    Ok(layout)
}

/// Whitespace tokens paired with their 1-based line number.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let inner = input
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));
        Self {
            inner: Box::new(inner),
        }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }

    fn word(&mut self, expected: &'static str) -> Result<(usize, &'a str), ParseError> {
        self.next().ok_or(ParseError::UnexpectedEof { expected })
    }

    fn int(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        let (line, token) = self.word(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            token: token.to_string(),
            expected,
        })
    }

    fn count(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        let (line, token) = self.word(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            token: token.to_string(),
            expected,
        })
    }

    /// Reads `<name> <x> <y> <width> <height>`.
    fn record(&mut self, kind: &'static str) -> Result<(&'a str, Rect), ParseError> {
        let name_field = match kind {
            "cell" => "cell name",
            _ => "terminal name",
        };
        let (line, name) = self.word(name_field)?;
        let x = self.int("x coordinate")?;
        let y = self.int("y coordinate")?;
        let width = self.int("width")?;
        let height = self.int("height")?;
        if width <= 0 || height <= 0 {
            return Err(ParseError::InvalidGeometry {
                line,
                name: name.to_string(),
                reason: format!("{kind} size {width}x{height} must be positive"),
            });
        }
        Ok((name, Rect::new(x, y, width, height)))
    }
}
