//! Route feasibility and cost evaluation.
//!
//! [`evaluate_route`] simulates time progression along a single route:
//! travel, waiting for a window to open, service, and the final return to
//! the depot. Cost is purely additive (travel + wait + service), so two
//! routes of equal distance are separated by whichever waits less.
//!
//! [`RouteCache`] wraps the evaluator with sequence-keyed memoization. One
//! neighborhood pass evaluates the same trial sequences many times; the
//! cache is cleared at the start of every search iteration so it never
//! grows without bound over a long run.

use crate::problem::Problem;
use std::collections::HashMap;

/// The outcome of evaluating a route: either its total cost, or a time
/// window (or depot return deadline) violation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Feasible(f64),
    Infeasible,
}

impl Evaluation {
    /// Whether the route satisfies all time windows.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Evaluation::Feasible(_))
    }

    /// The total cost, if feasible.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Evaluation::Feasible(cost) => Some(*cost),
            Evaluation::Infeasible => None,
        }
    }
}

/// Simulate a route and report feasibility plus total cost.
///
/// Starting from the depot at time 0, each customer in `sequence` adds its
/// travel time; arriving before `ready` accrues the wait as cost and
/// advances the clock; arriving after `due` makes the whole route
/// infeasible immediately. Service time is accrued at every stop, and the
/// return leg must reach the depot no later than the depot's own `due`.
/// An empty sequence is trivially feasible with cost 0.
pub fn evaluate_route(problem: &Problem, sequence: &[usize]) -> Evaluation {
    let depot_index = problem.depot_index;
    let depot = problem.get_depot();

    let mut time = 0.0;
    let mut cost = 0.0;
    let mut prev = depot_index;

    for &index in sequence {
        let customer = &problem.customers[index];
        let travel = problem.get_distance(prev, index);

        cost += travel;
        time += travel;

        let mut wait = 0.0;
        if time < customer.ready {
            wait = customer.ready - time;
            time = customer.ready;
        }

        if time > customer.due {
            return Evaluation::Infeasible;
        }

        cost += wait;
        cost += customer.service;
        time += customer.service;

        prev = index;
    }

    let return_travel = problem.get_distance(prev, depot_index);
    cost += return_travel;
    time += return_travel;

    if time > depot.due {
        return Evaluation::Infeasible;
    }

    Evaluation::Feasible(cost)
}

/// A memoizing wrapper around [`evaluate_route`], keyed by the exact
/// ordered sequence of customer indices.
#[derive(Debug, Default)]
pub struct RouteCache {
    entries: HashMap<Vec<usize>, Evaluation>,
    hits: u64,
    misses: u64,
}

impl RouteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        RouteCache::default()
    }

    /// Evaluate a sequence, reusing a previous result when available.
    pub fn evaluate(&mut self, problem: &Problem, sequence: &[usize]) -> Evaluation {
        if let Some(&result) = self.entries.get(sequence) {
            self.hits += 1;
            return result;
        }

        let result = evaluate_route(problem, sequence);
        self.entries.insert(sequence.to_vec(), result);
        self.misses += 1;
        result
    }

    /// Drop all cached results. Called once per search iteration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached sequences.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required a full simulation.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
