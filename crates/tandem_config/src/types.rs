//! Configuration types deserialized from `tandem.toml`.

use serde::{Deserialize, Serialize};

/// The top-level flow configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowConfig {
    /// Settings for the Fiduccia-Mattheyses partitioning engine.
    #[serde(default)]
    pub partition: PartitionConfig,
    /// Settings for the Abacus legalization engine.
    #[serde(default)]
    pub legalize: LegalizeConfig,
    /// Settings for writing the final placement.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Partitioning engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartitionConfig {
    /// Number of shuffled restarts, each followed by one improvement pass.
    pub max_iterations: usize,
    /// Seed for the restart shuffles. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Consecutive non-improving moves after which a pass stops early.
    pub stagnation_limit: usize,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            seed: None,
            stagnation_limit: 3,
        }
    }
}

/// Legalization engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalizeConfig {
    /// Rows probed unconditionally on each side of the nearest row.
    pub row_window: usize,
    /// Subrows probed unconditionally on each side of the nearest subrow.
    pub subrow_window: usize,
    /// Legalize the two sides on separate rayon workers.
    pub parallel: bool,
}

impl Default for LegalizeConfig {
    fn default() -> Self {
        Self {
            row_window: 18,
            subrow_window: 1,
            parallel: false,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Format of the placement file.
    pub format: OutputFormat,
}

/// Format of the written placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `<name> <x> <y> <side>` line per cell (default).
    #[default]
    Text,
    /// A pretty-printed JSON placement report.
    Json,
}
