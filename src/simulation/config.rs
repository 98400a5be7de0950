// src/simulation/config.rs

use crate::model::debt::TechDebtLevel;
use crate::simulation::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Everything a run needs to know up front. Never changes during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Initial scope in story points.
    pub total_scope: f64,
    pub initial_staff: u32,
    pub add_staff_num: u32,
    pub add_staff_trigger_day: u32,
    pub tech_debt_level: TechDebtLevel,
    /// Daily chance that requirements grow.
    pub scope_creep_probability: f64,
    /// Safety cap; the only guarantee a run ends when scope keeps growing.
    pub max_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_scope: 1000.0,
            initial_staff: 5,
            add_staff_num: 0,
            add_staff_trigger_day: 60,
            tech_debt_level: TechDebtLevel::Medium,
            scope_creep_probability: 0.03,
            max_days: 365,
        }
    }
}

impl SimulationConfig {
    /// Rejects configurations the engine cannot meaningfully simulate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.total_scope.is_finite() || self.total_scope <= 0.0 {
            return Err(ConfigError::NonPositiveScope {
                value: self.total_scope,
            });
        }
        if self.initial_staff == 0 {
            return Err(ConfigError::ZeroInitialStaff);
        }
        if self.initial_staff.checked_add(self.add_staff_num).is_none() {
            return Err(ConfigError::StaffOverflow {
                initial: self.initial_staff,
                added: self.add_staff_num,
            });
        }
        if self.add_staff_trigger_day == 0 {
            return Err(ConfigError::ZeroTriggerDay);
        }
        if !(0.0..=1.0).contains(&self.scope_creep_probability) {
            return Err(ConfigError::CreepProbabilityOutOfRange {
                value: self.scope_creep_probability,
            });
        }
        if self.max_days == 0 {
            return Err(ConfigError::ZeroMaxDays);
        }
        Ok(())
    }
}
