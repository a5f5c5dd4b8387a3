//! Configuration parameters for the tabu search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable settings for the tabu search solver.
///
/// The defaults are the values the solver was originally tuned with on
/// mid-size Solomon-style instances; all of them can be overridden per
/// instance size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of moves retained in the tabu list (oldest evicted
    /// first once exceeded).
    pub tabu_capacity: usize,
    /// Maximum number of candidate moves recorded per iteration.
    pub max_candidate_moves: usize,
    /// Maximum number of sorted candidates kept for selection per iteration.
    pub max_sorted_candidates: usize,
    /// Number of consecutive non-improving iterations before stopping.
    pub max_stagnation: u32,
    /// Tolerance below which the best cost counts as unchanged.
    pub cost_tolerance: f64,
    /// Optional wall-clock budget for the search.
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tabu_capacity: 50,
            max_candidate_moves: 2000,
            max_sorted_candidates: 1000,
            max_stagnation: 50,
            cost_tolerance: 1e-6,
            time_limit: Some(Duration::from_secs(299)),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the tabu list capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Set the maximum candidate moves recorded per iteration.
    pub fn with_max_candidate_moves(mut self, max: usize) -> Self {
        self.max_candidate_moves = max;
        self
    }

    /// Set the maximum sorted candidates kept per iteration.
    pub fn with_max_sorted_candidates(mut self, max: usize) -> Self {
        self.max_sorted_candidates = max;
        self
    }

    /// Set the stagnation threshold.
    pub fn with_max_stagnation(mut self, iterations: u32) -> Self {
        self.max_stagnation = iterations;
        self
    }

    /// Set the numeric tolerance for "unchanged cost."
    pub fn with_cost_tolerance(mut self, tolerance: f64) -> Self {
        self.cost_tolerance = tolerance;
        self
    }

    /// Set the wall-clock time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Remove the wall-clock time limit.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }
}
