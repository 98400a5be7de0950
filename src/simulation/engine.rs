// src/simulation/engine.rs

use crate::creep::implementations::SeededCreep;
use crate::creep::traits::ScopeCreepSource;
use crate::model::backlog::Backlog;
use crate::model::debt::DebtProfile;
use crate::model::team::Team;
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::ConfigError;
use serde::Serialize;
use tracing::{debug, info};

/// Emit a progress line every this many simulated days.
const PROGRESS_LOG_INTERVAL: u32 = 30;

/// Snapshot of one simulated day. Serialize so it can go straight to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub day: u32,
    pub staff: u32,
    pub gross_productivity: f64,
    pub effort_rework: f64,
    pub effort_feature: f64,
    pub completed_work: f64,
    pub current_scope: f64,
    pub active_defects: f64,
    pub total_defects_generated: f64,
    /// Person-days spent so far.
    pub cumulative_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Running,
    Completed,
    TimedOut,
}

/// Everything that evolves from one day to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Days simulated so far.
    pub day: u32,
    pub team: Team,
    pub backlog: Backlog,
    pub cumulative_cost: f64,
}

impl SimulationState {
    pub fn initial(config: &SimulationConfig) -> Self {
        Self {
            day: 0,
            team: Team::new(
                config.initial_staff,
                config.add_staff_num,
                config.add_staff_trigger_day,
            ),
            backlog: Backlog::new(config.total_scope),
            cumulative_cost: 0.0,
        }
    }
}

/// What a finished run hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub status: RunStatus,
    pub history: Vec<HistoryRecord>,
    pub final_state: SimulationState,
}

impl SimulationOutcome {
    pub fn last_record(&self) -> Option<&HistoryRecord> {
        self.history.last()
    }

    pub fn days_elapsed(&self) -> u32 {
        self.final_state.day
    }

    pub fn total_cost(&self) -> f64 {
        self.final_state.cumulative_cost
    }
}

pub struct ProjectSimulation {
    config: SimulationConfig,
    profile: DebtProfile,
    state: SimulationState,
    creep: Box<dyn ScopeCreepSource>,
    history: Vec<HistoryRecord>,
}

impl ProjectSimulation {
    /// Validates `config` and sets up day 0.
    pub fn new(
        config: SimulationConfig,
        creep: Box<dyn ScopeCreepSource>,
    ) -> Result<Self, ConfigError> {
        let state = SimulationState::initial(&config);
        Self::from_state(config, state, creep)
    }

    /// Shorthand for a run driven by a seeded random source.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(SeededCreep::new(seed)))
    }

    /// Resumes from an existing state, e.g. a mid-project snapshot.
    pub fn from_state(
        config: SimulationConfig,
        state: SimulationState,
        creep: Box<dyn ScopeCreepSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = config.tech_debt_level.profile();
        Ok(Self {
            config,
            profile,
            state,
            creep,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Completion is checked before the day cap.
    pub fn status(&self) -> RunStatus {
        if self.state.backlog.is_complete() {
            RunStatus::Completed
        } else if self.state.day >= self.config.max_days {
            RunStatus::TimedOut
        } else {
            RunStatus::Running
        }
    }

    /// Simulates one more day unless the run has already ended.
    ///
    /// Returns the status observed before the day was simulated.
    pub fn tick(&mut self) -> RunStatus {
        let status = self.status();
        if status == RunStatus::Running {
            self.step();
        }
        status
    }

    pub fn run(mut self) -> SimulationOutcome {
        info!(
            scope = self.config.total_scope,
            staff = self.config.initial_staff,
            add_staff = self.config.add_staff_num,
            trigger_day = self.config.add_staff_trigger_day,
            debt = %self.config.tech_debt_level,
            creep = self.config.scope_creep_probability,
            max_days = self.config.max_days,
            "starting project simulation"
        );

        let status = loop {
            match self.tick() {
                RunStatus::Running => continue,
                terminal => break terminal,
            }
        };

        info!(
            ?status,
            days = self.state.day,
            completed = self.state.backlog.completed_work,
            scope = self.state.backlog.current_scope,
            cost = self.state.cumulative_cost,
            "project simulation finished"
        );

        SimulationOutcome {
            status,
            history: self.history,
            final_state: self.state,
        }
    }

    fn step(&mut self) {
        self.state.day += 1;
        let day = self.state.day;

        // A. Staffing event
        if self.state.team.apply_staffing_event(day) {
            debug!(
                day,
                staff = self.state.team.staff,
                onboarding_days = self.state.team.onboarding_days_remaining,
                "staff added"
            );
        }

        // B. Gross capacity
        let gross = self.state.team.gross_productivity();

        // C. Rework first, then features
        let allocation = self.state.backlog.remediate(gross, &self.profile);
        self.state
            .backlog
            .build_features(allocation.effort_feature, day, &self.profile);

        // D. Scope creep
        if self
            .creep
            .scope_creeps(day, self.config.scope_creep_probability)
        {
            let added = self.state.backlog.grow_scope();
            debug!(
                day,
                added,
                scope = self.state.backlog.current_scope,
                "scope creep"
            );
        }

        // E. Cost, with today's headcount
        self.state.cumulative_cost += self.state.team.staff as f64;

        if day % PROGRESS_LOG_INTERVAL == 0 {
            debug!(
                day,
                completed = self.state.backlog.completed_work,
                scope = self.state.backlog.current_scope,
                defects = self.state.backlog.active_defects,
                cost = self.state.cumulative_cost,
                "progress"
            );
        }

        self.record_history(gross, allocation.effort_rework, allocation.effort_feature);
    }

    fn record_history(&mut self, gross: f64, effort_rework: f64, effort_feature: f64) {
        let state = &self.state;
        self.history.push(HistoryRecord {
            day: state.day,
            staff: state.team.staff,
            gross_productivity: gross,
            effort_rework,
            effort_feature,
            completed_work: state.backlog.completed_work,
            current_scope: state.backlog.current_scope,
            active_defects: state.backlog.active_defects,
            total_defects_generated: state.backlog.total_defects_generated,
            cumulative_cost: state.cumulative_cost,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creep::implementations::{AlwaysCreep, NeverCreep, ScriptedCreep};
    use crate::model::debt::TechDebtLevel;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            total_scope: 100.0,
            initial_staff: 1,
            add_staff_num: 0,
            add_staff_trigger_day: 10,
            tech_debt_level: TechDebtLevel::Low,
            scope_creep_probability: 0.0,
            max_days: 365,
        }
    }

    #[test]
    fn invalid_config_fails_before_any_day() {
        let config = SimulationConfig {
            initial_staff: 0,
            ..quiet_config()
        };
        let result = ProjectSimulation::new(config, Box::new(NeverCreep));
        assert!(matches!(result, Err(ConfigError::ZeroInitialStaff)));
    }

    #[test]
    fn overflowing_headcount_is_rejected_before_any_day() {
        let config = SimulationConfig {
            initial_staff: 5,
            add_staff_num: u32::MAX,
            add_staff_trigger_day: 1,
            ..quiet_config()
        };
        let result = ProjectSimulation::new(config, Box::new(NeverCreep));
        assert!(matches!(result, Err(ConfigError::StaffOverflow { .. })));
    }

    #[test]
    fn first_record_is_day_one() {
        let mut sim = ProjectSimulation::new(quiet_config(), Box::new(NeverCreep)).unwrap();
        assert_eq!(sim.tick(), RunStatus::Running);
        let record = &sim.history()[0];
        assert_eq!(record.day, 1);
        assert_eq!(record.staff, 1);
        assert_eq!(record.gross_productivity, 1.0);
        assert_eq!(record.effort_feature, 1.0);
        assert_eq!(record.cumulative_cost, 1.0);
    }

    #[test]
    fn staffing_event_changes_cost_rate() {
        let config = SimulationConfig {
            initial_staff: 2,
            add_staff_num: 3,
            add_staff_trigger_day: 3,
            ..quiet_config()
        };
        let mut sim = ProjectSimulation::new(config, Box::new(NeverCreep)).unwrap();
        for _ in 0..4 {
            sim.tick();
        }
        let staff: Vec<u32> = sim.history().iter().map(|r| r.staff).collect();
        assert_eq!(staff, vec![2, 2, 5, 5]);
        assert_eq!(sim.state().cumulative_cost, 14.0);
        assert!(sim.state().team.staff_addition_applied);
    }

    #[test]
    fn rework_claims_the_whole_day_when_defects_pile_up() {
        let config = SimulationConfig {
            tech_debt_level: TechDebtLevel::High,
            ..quiet_config()
        };
        let mut state = SimulationState::initial(&config);
        state.backlog.active_defects = 50.0;

        let mut sim = ProjectSimulation::from_state(config, state, Box::new(NeverCreep)).unwrap();
        sim.tick();
        let record = &sim.history()[0];
        assert_eq!(record.effort_feature, 0.0);
        assert_eq!(record.effort_rework, record.gross_productivity);
        assert_eq!(record.completed_work, 0.0);
    }

    #[test]
    fn completed_run_stops_ticking() {
        let config = SimulationConfig {
            total_scope: 1.0,
            ..quiet_config()
        };
        let mut sim = ProjectSimulation::new(config, Box::new(NeverCreep)).unwrap();
        assert_eq!(sim.tick(), RunStatus::Running);
        assert_eq!(sim.tick(), RunStatus::Completed);
        assert_eq!(sim.tick(), RunStatus::Completed);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn endless_creep_times_out_at_cap() {
        let config = SimulationConfig {
            total_scope: 100.0,
            initial_staff: 1,
            scope_creep_probability: 1.0,
            max_days: 50,
            ..quiet_config()
        };
        let outcome = ProjectSimulation::new(config, Box::new(AlwaysCreep))
            .unwrap()
            .run();
        assert_eq!(outcome.status, RunStatus::TimedOut);
        assert_eq!(outcome.history.len(), 50);
        assert_eq!(outcome.days_elapsed(), 50);
        assert!((outcome.final_state.backlog.current_scope - 150.0).abs() < 1e-9);
    }

    #[test]
    fn scripted_creep_lands_on_chosen_days() {
        let creep = ScriptedCreep::on_days(&[3], 10);
        let outcome = ProjectSimulation::new(quiet_config(), Box::new(creep))
            .unwrap()
            .run();
        assert_eq!(outcome.history[1].current_scope, 100.0);
        assert_eq!(outcome.history[2].current_scope, 101.0);
        assert_eq!(outcome.status, RunStatus::Completed);
    }
}
