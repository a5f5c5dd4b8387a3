//! Error and infeasibility types for the solver.
//!
//! Faults (I/O problems, malformed instance files, an empty customer list)
//! are kept separate from infeasibility: an instance that admits no feasible
//! solution is a reportable outcome, not an error, and the writer emits a
//! dedicated infeasibility marker for it.

use thiserror::Error;

/// A fault encountered while loading or preparing an instance.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The instance file did not match the expected layout.
    #[error("malformed instance file: {0}")]
    Parse(String),

    /// Zero customers were loaded; solving requires at least one.
    #[error("no customers loaded")]
    NoCustomers,

    /// The instance admits no feasible solution.
    #[error(transparent)]
    Infeasible(#[from] Infeasibility),
}

/// A terminal infeasibility signal: no solution exists (or none could be
/// constructed), so the run produces no routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Infeasibility {
    /// A single customer's demand exceeds the vehicle capacity, so no route
    /// can ever serve it. Detected before construction starts.
    #[error("demand of customer {customer} exceeds vehicle capacity")]
    DemandExceedsCapacity { customer: usize },

    /// The greedy constructor opened a fresh route and still could not place
    /// any remaining customer within capacity and time windows.
    #[error("greedy construction could not place every customer")]
    Construction,
}
