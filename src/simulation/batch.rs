// src/simulation/batch.rs

//! Many independent runs of one configuration, each with its own seed.

use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::{ProjectSimulation, RunStatus};
use crate::simulation::error::ConfigError;
use serde::Serialize;
use tracing::info;

/// The headline numbers of one run in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRun {
    pub seed: u64,
    pub status: RunStatus,
    pub days: u32,
    pub cost: f64,
    pub completed_work: f64,
    pub final_scope: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub runs: Vec<BatchRun>,
}

impl BatchSummary {
    pub fn completed(&self) -> usize {
        self.count(RunStatus::Completed)
    }

    pub fn timed_out(&self) -> usize {
        self.count(RunStatus::TimedOut)
    }

    /// `None` for an empty batch.
    pub fn completion_rate(&self) -> Option<f64> {
        if self.runs.is_empty() {
            None
        } else {
            Some(self.completed() as f64 / self.runs.len() as f64)
        }
    }

    pub fn day_percentile(&self, percent: f64) -> Option<u32> {
        let mut days: Vec<u32> = self.runs.iter().map(|r| r.days).collect();
        days.sort_unstable();
        nearest_rank(&days, percent).copied()
    }

    pub fn cost_percentile(&self, percent: f64) -> Option<f64> {
        let mut costs: Vec<f64> = self.runs.iter().map(|r| r.cost).collect();
        costs.sort_by(|a, b| a.total_cmp(b));
        nearest_rank(&costs, percent).copied()
    }

    fn count(&self, status: RunStatus) -> usize {
        self.runs.iter().filter(|r| r.status == status).count()
    }
}

/// Nearest-rank percentile of already sorted values.
fn nearest_rank<T>(sorted: &[T], percent: f64) -> Option<&T> {
    if sorted.is_empty() || !percent.is_finite() {
        return None;
    }
    let p = percent.clamp(0.0, 100.0);
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted.get(rank.max(1) - 1)
}

/// Runs `iterations` simulations seeded `base_seed`, `base_seed + 1`, ...
pub fn run_batch(
    config: &SimulationConfig,
    iterations: usize,
    base_seed: u64,
) -> Result<BatchSummary, ConfigError> {
    config.validate()?;

    let mut runs = Vec::with_capacity(iterations);
    for iteration in 0..iterations {
        let seed = base_seed.wrapping_add(iteration as u64);
        let outcome = ProjectSimulation::seeded(config.clone(), seed)?.run();
        runs.push(BatchRun {
            seed,
            status: outcome.status,
            days: outcome.days_elapsed(),
            cost: outcome.total_cost(),
            completed_work: outcome.final_state.backlog.completed_work,
            final_scope: outcome.final_state.backlog.current_scope,
        });
    }

    let summary = BatchSummary { runs };
    info!(
        iterations,
        completed = summary.completed(),
        timed_out = summary.timed_out(),
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(days: u32, cost: f64, status: RunStatus) -> BatchRun {
        BatchRun {
            seed: 0,
            status,
            days,
            cost,
            completed_work: 0.0,
            final_scope: 0.0,
        }
    }

    #[test]
    fn empty_batch_has_no_statistics() {
        let summary = BatchSummary { runs: Vec::new() };
        assert_eq!(summary.completion_rate(), None);
        assert_eq!(summary.day_percentile(50.0), None);
        assert_eq!(summary.cost_percentile(85.0), None);
    }

    #[test]
    fn nearest_rank_percentiles() {
        let summary = BatchSummary {
            runs: vec![
                run(40, 400.0, RunStatus::Completed),
                run(10, 100.0, RunStatus::Completed),
                run(30, 300.0, RunStatus::TimedOut),
                run(20, 200.0, RunStatus::Completed),
            ],
        };
        assert_eq!(summary.day_percentile(0.0), Some(10));
        assert_eq!(summary.day_percentile(50.0), Some(20));
        assert_eq!(summary.day_percentile(85.0), Some(40));
        assert_eq!(summary.day_percentile(100.0), Some(40));
        assert_eq!(summary.cost_percentile(50.0), Some(200.0));
        assert_eq!(summary.completed(), 3);
        assert_eq!(summary.timed_out(), 1);
        assert_eq!(summary.completion_rate(), Some(0.75));
    }

    #[test]
    fn batch_uses_consecutive_seeds() {
        let config = SimulationConfig {
            total_scope: 50.0,
            max_days: 120,
            ..Default::default()
        };
        let summary = run_batch(&config, 3, u64::MAX).unwrap();
        let seeds: Vec<u64> = summary.runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![u64::MAX, 0, 1]);
    }

    #[test]
    fn batch_rejects_invalid_config() {
        let config = SimulationConfig {
            max_days: 0,
            ..Default::default()
        };
        assert_eq!(run_batch(&config, 5, 1), Err(ConfigError::ZeroMaxDays));
    }

    #[test]
    fn batch_is_reproducible() {
        let config = SimulationConfig::default();
        assert_eq!(run_batch(&config, 4, 11), run_batch(&config, 4, 11));
    }
}
