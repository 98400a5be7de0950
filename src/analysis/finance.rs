//! Money view of a finished run.
//!
//! Everything here is derived from a `SimulationOutcome` after the fact and
//! never feeds back into the engine. One story point is priced as one
//! person-day of work.

use crate::simulation::engine::{RunStatus, SimulationOutcome};
use serde::Serialize;

/// Billable working days in a month.
pub const WORKING_DAYS_PER_MONTH: f64 = 20.0;

/// Price of one person-day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitPrice {
    pub per_person_day: f64,
}

impl UnitPrice {
    pub fn per_day(price: f64) -> Self {
        Self {
            per_person_day: price,
        }
    }

    /// Converts a monthly rate (salary plus overhead, or contractor fee).
    pub fn from_monthly(monthly: f64) -> Self {
        Self::per_day(monthly / WORKING_DAYS_PER_MONTH)
    }
}

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(numerator / denominator)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub finished: bool,
    pub days: u32,
    /// What the initial scope should have cost.
    pub initial_budget: f64,
    pub actual_cost: f64,
    /// Positive when under budget.
    pub profit_loss: f64,
    /// Actual cost as a multiple of the budget.
    pub overrun_ratio: Option<f64>,
    /// Cost of effort that produced new scope.
    pub feature_cost: f64,
    /// Cost of effort that went into fixing defects.
    pub rework_cost: f64,
    /// Share of actual cost lost to rework.
    pub rework_share: Option<f64>,
}

impl FinancialSummary {
    /// Budget is priced from the initial scope the run itself started with.
    pub fn from_outcome(outcome: &SimulationOutcome, price: UnitPrice) -> Self {
        let day_price = price.per_person_day;

        let initial_budget = outcome.final_state.backlog.initial_scope * day_price;
        let actual_cost = outcome.total_cost() * day_price;

        let (feature_effort, rework_effort) = outcome
            .history
            .iter()
            .fold((0.0, 0.0), |(feature, rework), record| {
                (feature + record.effort_feature, rework + record.effort_rework)
            });
        let feature_cost = feature_effort * day_price;
        let rework_cost = rework_effort * day_price;

        Self {
            finished: outcome.status == RunStatus::Completed,
            days: outcome.days_elapsed(),
            initial_budget,
            actual_cost,
            profit_loss: initial_budget - actual_cost,
            overrun_ratio: safe_ratio(actual_cost, initial_budget),
            feature_cost,
            rework_cost,
            rework_share: safe_ratio(rework_cost, actual_cost),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.profit_loss < 0.0
    }
}
