//! Layout model for the tandem placer.
//!
//! This crate holds the chip description that both engines read and
//! annotate: the die, its placement rows, fixed terminals and movable cells.
//! It also reads the layout record stream and writes the final placement.
//!
//! # Pipeline
//!
//! 1. **Parse**: [`parse_layout`] builds a [`Layout`]
//! 2. **Partition**: `tandem_partition` turns it into a [`PartitionedLayout`]
//! 3. **Legalize**: `tandem_legalize` turns that into a [`LegalizedLayout`]
//! 4. **Write**: [`write_placement`] or [`write_json`]

#![warn(missing_docs)]

pub mod data;
pub mod error;
pub mod ids;
pub mod parser;
pub mod stage;
pub mod writer;

pub use data::{Cell, Die, Layout, Placement, Rect, RowSite, Side, Terminal};
pub use error::ParseError;
pub use ids::{CellId, TerminalId};
pub use parser::{load_layout, parse_layout, MAX_ROWS};
pub use stage::{LegalizeReport, LegalizedLayout, PartitionedLayout, SideReport};
pub use writer::{write_json, write_placement, PlacementReport};
