// src/io/scenario.rs

use crate::simulation::config::SimulationConfig;
use crate::simulation::error::ScenarioError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads a scenario from a TOML file.
///
/// Missing keys fall back to `SimulationConfig::default()`. The result is
/// validated, so an `Ok` config is always safe to simulate.
///
/// ```toml
/// total_scope = 2000
/// initial_staff = 8
/// add_staff_num = 4
/// add_staff_trigger_day = 90
/// tech_debt_level = "High"
/// scope_creep_probability = 0.05
/// ```
pub fn load_scenario(path: impl AsRef<Path>) -> Result<SimulationConfig, ScenarioError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_scenario(&text).map_err(|source| ScenarioError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ScenarioError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?config, "loaded scenario");
    Ok(config)
}

/// Parses scenario text without validating the values.
pub fn parse_scenario(text: &str) -> Result<SimulationConfig, toml::de::Error> {
    toml::from_str(text)
}
