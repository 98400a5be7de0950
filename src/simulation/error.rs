//! Error types for the simulator.
//!
//! Invalid configuration is rejected before any simulated day runs.

use std::path::PathBuf;
use thiserror::Error;

/// A configuration value the engine refuses to simulate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown tech debt level '{value}' (expected Low, Medium or High)")]
    UnknownTechDebtLevel { value: String },

    #[error("total scope must be a positive, finite number of work units, got {value}")]
    NonPositiveScope { value: f64 },

    #[error("initial staff must be at least 1")]
    ZeroInitialStaff,

    #[error("staff addition trigger day must be at least 1")]
    ZeroTriggerDay,

    #[error("scope creep probability must be within [0, 1], got {value}")]
    CreepProbabilityOutOfRange { value: f64 },

    #[error("max days must be at least 1")]
    ZeroMaxDays,

    #[error("headcount overflows: {initial} initial staff plus {added} added")]
    StaffOverflow { initial: u32, added: u32 },
}

/// Failure to load a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid scenario '{path}': {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Failure to export results.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error during export: {0}")]
    Io(#[from] std::io::Error),
}
