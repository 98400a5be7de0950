// src/model/backlog.rs

use crate::model::debt::DebtProfile;

/// Share of open defects the team tries to fix each day.
pub const DAILY_TRIAGE_RATE: f64 = 0.2;

/// Days over which schedule pressure adds another 100% to the bug rate.
pub const PRESSURE_HORIZON_DAYS: f64 = 150.0;

/// Each scope creep event adds this fraction of the initial scope.
pub const CREEP_SHARE_OF_INITIAL_SCOPE: f64 = 0.01;

/// How one day's capacity was split.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Allocation {
    pub effort_rework: f64,
    pub effort_feature: f64,
    pub defects_fixed: f64,
}

/// Rework-first split of `gross` capacity.
///
/// Defect remediation claims capacity first; features only get what is left.
pub fn allocate_effort(gross: f64, active_defects: f64, profile: &DebtProfile) -> Allocation {
    let attempted = active_defects * DAILY_TRIAGE_RATE;
    let required_rework = attempted * profile.fix_complexity;

    let effort_rework = gross.min(required_rework);
    let effort_feature = gross - effort_rework;

    Allocation {
        effort_rework,
        effort_feature,
        defects_fixed: effort_rework / profile.fix_complexity,
    }
}

/// Multiplier on the bug rate as the project drags on.
pub fn pressure_factor(day: u32) -> f64 {
    1.0 + day as f64 / PRESSURE_HORIZON_DAYS
}

/// The work still to do: scope, progress and open defects.
#[derive(Debug, Clone, PartialEq)]
pub struct Backlog {
    pub initial_scope: f64,
    pub current_scope: f64,
    pub completed_work: f64,

    pub active_defects: f64,
    pub total_defects_generated: f64,
}

impl Backlog {
    pub fn new(scope: f64) -> Self {
        Self {
            initial_scope: scope,
            current_scope: scope,
            completed_work: 0.0,
            active_defects: 0.0,
            total_defects_generated: 0.0,
        }
    }

    /// Step 3: Split capacity and spend the rework share on open defects.
    pub fn remediate(&mut self, gross: f64, profile: &DebtProfile) -> Allocation {
        let allocation = allocate_effort(gross, self.active_defects, profile);
        self.active_defects = (self.active_defects - allocation.defects_fixed).max(0.0);
        allocation
    }

    /// Step 4: Turn feature effort into progress, injecting new defects.
    ///
    /// Returns the progress made. Progress never overshoots the current scope.
    pub fn build_features(&mut self, effort_feature: f64, day: u32, profile: &DebtProfile) -> f64 {
        let remaining = self.current_scope - self.completed_work;
        if remaining <= 0.0 {
            return 0.0;
        }

        let progress = if effort_feature >= remaining {
            // Land exactly on scope instead of accumulating rounding error
            self.completed_work = self.current_scope;
            remaining
        } else {
            self.completed_work += effort_feature;
            effort_feature
        };

        let new_defects = progress * profile.bug_rate * pressure_factor(day);
        self.active_defects += new_defects;
        self.total_defects_generated += new_defects;
        progress
    }

    /// Step 5: Requirements grow by a fixed slice of the initial scope.
    ///
    /// Returns the amount added.
    pub fn grow_scope(&mut self) -> f64 {
        let added = self.initial_scope * CREEP_SHARE_OF_INITIAL_SCOPE;
        self.current_scope += added;
        added
    }

    pub fn is_complete(&self) -> bool {
        self.completed_work >= self.current_scope
    }

    pub fn remaining_work(&self) -> f64 {
        (self.current_scope - self.completed_work).max(0.0)
    }
}
