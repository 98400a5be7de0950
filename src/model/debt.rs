// src/model/debt.rs

use crate::simulation::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative technical debt of the codebase being worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TechDebtLevel {
    Low,
    Medium,
    High,
}

/// How a debt level shows up in the day-to-day numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtProfile {
    /// Defects injected per unit of completed feature work.
    pub bug_rate: f64,
    /// Effort units needed to fully remediate one defect.
    pub fix_complexity: f64,
}

impl TechDebtLevel {
    pub fn profile(self) -> DebtProfile {
        match self {
            TechDebtLevel::Low => DebtProfile {
                bug_rate: 0.02,
                fix_complexity: 1.2,
            },
            TechDebtLevel::Medium => DebtProfile {
                bug_rate: 0.05,
                fix_complexity: 1.5,
            },
            // Spaghetti code: more bugs, and each one costs more to fix
            TechDebtLevel::High => DebtProfile {
                bug_rate: 0.10,
                fix_complexity: 2.5,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TechDebtLevel::Low => "Low",
            TechDebtLevel::Medium => "Medium",
            TechDebtLevel::High => "High",
        }
    }
}

impl fmt::Display for TechDebtLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechDebtLevel {
    type Err = ConfigError;

    /// Accepts the level names case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TechDebtLevel::Low),
            "medium" => Ok(TechDebtLevel::Medium),
            "high" => Ok(TechDebtLevel::High),
            _ => Err(ConfigError::UnknownTechDebtLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TechDebtLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TechDebtLevel> for String {
    fn from(level: TechDebtLevel) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_level_table() {
        assert_eq!(TechDebtLevel::Low.profile().bug_rate, 0.02);
        assert_eq!(TechDebtLevel::Low.profile().fix_complexity, 1.2);
        assert_eq!(TechDebtLevel::Medium.profile().bug_rate, 0.05);
        assert_eq!(TechDebtLevel::Medium.profile().fix_complexity, 1.5);
        assert_eq!(TechDebtLevel::High.profile().bug_rate, 0.10);
        assert_eq!(TechDebtLevel::High.profile().fix_complexity, 2.5);
    }

    #[test]
    fn parses_known_levels_ignoring_case() {
        assert_eq!("low".parse::<TechDebtLevel>().unwrap(), TechDebtLevel::Low);
        assert_eq!(" Medium ".parse::<TechDebtLevel>().unwrap(), TechDebtLevel::Medium);
        assert_eq!("HIGH".parse::<TechDebtLevel>().unwrap(), TechDebtLevel::High);
    }

    #[test]
    fn unknown_level_is_a_config_error() {
        let err = "Extreme".parse::<TechDebtLevel>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTechDebtLevel { ref value } if value == "Extreme"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in [TechDebtLevel::Low, TechDebtLevel::Medium, TechDebtLevel::High] {
            assert_eq!(level.to_string().parse::<TechDebtLevel>().unwrap(), level);
        }
    }
}
