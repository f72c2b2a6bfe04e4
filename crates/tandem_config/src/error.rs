//! Errors from reading `tandem.toml`.

use std::path::PathBuf;

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("malformed configuration: {0}")]
    Syntax(#[from] toml::de::Error),

    /// A value is out of the range the engines accept.
    #[error("invalid `{key}`: {reason}")]
    Invalid {
        /// Dotted key of the offending value, e.g. `legalize.row_window`.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
