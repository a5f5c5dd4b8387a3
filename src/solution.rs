//! Solution representation for the CVRPTW.

use crate::evaluation::{evaluate_route, Evaluation};
use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single vehicle route.
///
/// The depot is implicit at both ends and never stored in `sequence`. The
/// load and cost fields are caches maintained by whoever mutates the
/// sequence; [`Route::evaluate`] refreshes the cost from a full simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// The sequence of customer indices (excluding the depot).
    pub sequence: Vec<usize>,
    /// The total demand of the route's customers.
    pub load: i64,
    /// The total cost (travel + wait + service) of the route.
    pub cost: f64,
}

impl Route {
    /// Create a new, empty route.
    pub fn new() -> Self {
        Route {
            sequence: Vec::new(),
            load: 0,
            cost: 0.0,
        }
    }

    /// Check if the route visits no customers.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Recompute the cached load from the customers' demands.
    pub fn calculate_load(&mut self, problem: &Problem) {
        self.load = self
            .sequence
            .iter()
            .map(|&c| problem.customers[c].demand)
            .sum();
    }

    /// Re-simulate the route, refreshing the cached cost on success.
    pub fn evaluate(&mut self, problem: &Problem) -> Evaluation {
        let result = evaluate_route(problem, &self.sequence);
        if let Evaluation::Feasible(cost) = result {
            self.cost = cost;
        }
        result
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::new()
    }
}

/// Represents a complete solution: a set of routes that together visit
/// every non-depot customer exactly once.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The list of routes.
    pub routes: Vec<Route>,
    /// The total cost across all routes.
    pub cost: f64,
}

impl Solution {
    /// Create a new, empty solution.
    pub fn new() -> Self {
        Solution {
            routes: Vec::new(),
            cost: 0.0,
        }
    }

    /// Re-evaluate every route and refresh the total cost.
    ///
    /// Returns `false` if any route violates its time windows. Solutions
    /// maintained by the search are always feasible, so a `false` here
    /// means a caller mutated a route without checking the move first.
    pub fn evaluate(&mut self, problem: &Problem) -> bool {
        let mut total = 0.0;

        for route in &mut self.routes {
            match route.evaluate(problem) {
                Evaluation::Feasible(cost) => total += cost,
                Evaluation::Infeasible => return false,
            }
        }

        self.cost = total;
        true
    }

    /// Remove any routes left without customers (unused vehicles).
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|route| !route.is_empty());
    }

    /// Get the number of routes.
    pub fn get_route_count(&self) -> usize {
        self.routes.len()
    }

    /// Get the number of customers visited across all routes.
    pub fn get_customer_count(&self) -> usize {
        self.routes.iter().map(|route| route.sequence.len()).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Solution::new()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Cost: {:.5}", self.cost)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (Load: {}, Cost: {:.5})",
                i, route.sequence, route.load, route.cost
            )?;
        }

        Ok(())
    }
}
