//! Parsing and validation of `tandem.toml` flow configuration files.
//!
//! Every section is optional; a missing file section falls back to the
//! defaults the placer has always used (ten FM restarts, an 18-row search
//! window, plain-text output).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
