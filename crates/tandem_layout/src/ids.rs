//! Index newtypes for cells and terminals.
//!
//! A cell's id is its position in the input file, which is also the order
//! placements are written back out. Ids display with a one-letter prefix
//! (`c12`, `t3`) so they never read as coordinates in log lines.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Position in the owning layout vector.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Movable standard cell.
    CellId,
    "c"
);

index_id!(
    /// Fixed terminal blocking part of the rows.
    TerminalId,
    "t"
);
