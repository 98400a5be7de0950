//! Day-by-day simulation of how a software project's schedule and cost
//! degrade under added staff, accumulating defects and scope creep.

pub mod analysis;
pub mod creep;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;

pub use crate::model::debt::TechDebtLevel;
pub use crate::simulation::config::SimulationConfig;
pub use crate::simulation::engine::{
    HistoryRecord, ProjectSimulation, RunStatus, SimulationOutcome, SimulationState,
};
pub use crate::simulation::error::ConfigError;
