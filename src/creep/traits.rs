// src/creep/traits.rs

use std::fmt::Debug;

/// Decides, once per simulated day, whether requirements grow.
///
/// This is the only source of randomness in a run, so swapping the
/// implementation is how tests get reproducible or scripted histories.
/// `Send` lets independent runs move to other threads.
pub trait ScopeCreepSource: Debug + Send {
    /// One Bernoulli trial with success probability `probability`.
    ///
    /// # Arguments
    /// * `day` - The simulated day the draw is for (1-based).
    /// * `probability` - Chance of a scope creep event, within [0, 1].
    fn scope_creeps(&mut self, day: u32, probability: f64) -> bool;
}
