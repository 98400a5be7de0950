// src/creep/implementations.rs

use crate::creep::traits::ScopeCreepSource;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Bernoulli, Distribution};
use std::collections::VecDeque;

// =========================================================================
// 1. Seeded Creep
// =========================================================================

/// Real randomness, made reproducible by a fixed seed.
///
/// Two sources built from the same seed produce the same draws.
#[derive(Debug, Clone)]
pub struct SeededCreep {
    rng: ChaCha20Rng,
}

impl SeededCreep {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl ScopeCreepSource for SeededCreep {
    fn scope_creeps(&mut self, _day: u32, probability: f64) -> bool {
        // Validated config keeps this in range; anything else never creeps
        match Bernoulli::new(probability) {
            Ok(trial) => trial.sample(&mut self.rng),
            Err(_) => false,
        }
    }
}

// =========================================================================
// 2. Never / Always
// =========================================================================

/// Requirements are frozen.
#[derive(Debug, Clone, Default)]
pub struct NeverCreep;

impl ScopeCreepSource for NeverCreep {
    fn scope_creeps(&mut self, _day: u32, _probability: f64) -> bool {
        false
    }
}

/// Requirements grow every single day, regardless of probability.
/// Useful for worst-case runs and for exercising the day cap.
#[derive(Debug, Clone, Default)]
pub struct AlwaysCreep;

impl ScopeCreepSource for AlwaysCreep {
    fn scope_creeps(&mut self, _day: u32, _probability: f64) -> bool {
        true
    }
}

// =========================================================================
// 3. Scripted Creep
// =========================================================================

/// Replays a fixed sequence of outcomes, one per day, then stops creeping.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCreep {
    outcomes: VecDeque<bool>,
}

impl ScriptedCreep {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Creep exactly on the listed days (1-based), over a horizon of `days`.
    pub fn on_days(days: &[u32], horizon: u32) -> Self {
        Self::new((1..=horizon).map(|d| days.contains(&d)))
    }
}

impl ScopeCreepSource for ScriptedCreep {
    fn scope_creeps(&mut self, _day: u32, _probability: f64) -> bool {
        self.outcomes.pop_front().unwrap_or(false)
    }
}
