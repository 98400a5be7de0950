// src/model/team.rs

/// Coordination penalty per communication path (Brooks' Law).
pub const PENALTY_PER_PATH: f64 = 0.012;

/// Efficiency never drops below this, however large the team gets.
pub const MIN_EFFICIENCY: f64 = 0.1;

/// Capacity each existing member loses per day while mentoring.
pub const MENTORING_COST_PER_VETERAN: f64 = 0.4;

/// Upper bound on mentoring cost contributed by each newcomer.
pub const MENTORING_COST_PER_NEWCOMER: f64 = 1.0;

/// Onboarding lasts this many days per person added.
pub const ONBOARDING_DAYS_PER_HIRE: u32 = 3;

/// The people working on the project and their daily capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub staff: u32,

    // Staffing plan
    pub add_staff_num: u32,
    pub add_staff_trigger_day: u32,

    // One-shot state
    pub staff_addition_applied: bool,
    pub onboarding_days_remaining: u32,
}

impl Team {
    pub fn new(initial_staff: u32, add_staff_num: u32, add_staff_trigger_day: u32) -> Self {
        Self {
            staff: initial_staff,
            add_staff_num,
            add_staff_trigger_day,
            staff_addition_applied: false,
            onboarding_days_remaining: 0,
        }
    }

    /// Step 1: Bring in the extra staff, once, on or after the trigger day.
    ///
    /// Returns true on the day the addition happens.
    pub fn apply_staffing_event(&mut self, day: u32) -> bool {
        if self.staff_addition_applied
            || self.add_staff_num == 0
            || day < self.add_staff_trigger_day
        {
            return false;
        }

        self.staff = self.staff.saturating_add(self.add_staff_num);
        self.staff_addition_applied = true;
        // Bigger intakes take longer to absorb
        self.onboarding_days_remaining = self.add_staff_num.saturating_mul(ONBOARDING_DAYS_PER_HIRE);
        true
    }

    /// Step 2: Gross capacity for today, before any split between rework and features.
    ///
    /// While onboarding is in progress this also consumes one onboarding day.
    pub fn gross_productivity(&mut self) -> f64 {
        if self.staff == 0 {
            return 0.0;
        }
        let n = self.staff as f64;

        let efficiency = coordination_efficiency(self.staff);

        let mut onboarding_drag = 0.0;
        if self.onboarding_days_remaining > 0 {
            let veterans = self.staff.saturating_sub(self.add_staff_num) as f64;
            let newcomers = self.add_staff_num as f64;
            onboarding_drag = (veterans * MENTORING_COST_PER_VETERAN)
                .min(newcomers * MENTORING_COST_PER_NEWCOMER);
            self.onboarding_days_remaining -= 1;
        }

        (n * efficiency - onboarding_drag).max(0.0)
    }

    pub fn is_onboarding(&self) -> bool {
        self.onboarding_days_remaining > 0
    }
}

/// Share of nominal capacity left after communication overhead.
///
/// `n` people have `n(n-1)/2` communication paths.
pub fn coordination_efficiency(staff: u32) -> f64 {
    if staff == 0 {
        return 0.0;
    }
    let n = staff as f64;
    let paths = n * (n - 1.0) / 2.0;
    let penalty = PENALTY_PER_PATH * paths;
    (1.0 - penalty / n).max(MIN_EFFICIENCY)
}
