//! # Tabu-CVRPTW
//!
//! A tabu search solver for the Capacitated Vehicle Routing Problem with
//! Time Windows (CVRPTW).
//!
//! A greedy earliest-service-start heuristic builds an initial feasible set
//! of routes, which a tabu search then improves with swap and relocate
//! moves between routes. A bounded forbidden-move list prevents immediate
//! cycling, and the search stops on a wall-clock budget, a stagnation
//! threshold, or an exhausted neighborhood.

pub mod config;
pub mod construction;
pub mod error;
pub mod evaluation;
pub mod neighborhood;
pub mod problem;
pub mod solution;
pub mod utils;

use crate::config::Config;
use crate::construction::construct;
use crate::error::{Error, Infeasibility};
use crate::evaluation::RouteCache;
use crate::neighborhood::{apply_move, generate_moves, select_move, TabuList};
use crate::problem::Problem;
use crate::solution::Solution;

use log::{debug, info};
use std::time::{Duration, Instant};

/// The main solver structure orchestrating construction and tabu search.
pub struct TabuSearch {
    pub problem: Problem,
    pub config: Config,
    pub best_solution: Option<Solution>,
    pub run_time: Duration,
    pub iterations: u32,
    stagnation: u32,
    tabu: TabuList,
    cache: RouteCache,
    start_time: Instant,
    deadline: Option<Instant>,
}

impl TabuSearch {
    /// Create a new solver instance for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Self {
        let tabu = TabuList::new(config.tabu_capacity);

        TabuSearch {
            problem,
            config,
            best_solution: None,
            run_time: Duration::from_secs(0),
            iterations: 0,
            stagnation: 0,
            tabu,
            cache: RouteCache::new(),
            start_time: Instant::now(),
            deadline: None,
        }
    }

    /// Run the solver until a termination criterion is met.
    ///
    /// Construction failures surface as [`Infeasibility`]; otherwise the
    /// best feasible solution observed during the search is returned. Its
    /// cost is non-increasing over the run and never above the greedy
    /// starting cost.
    pub fn run(&mut self) -> Result<&Solution, Infeasibility> {
        self.start_time = Instant::now();
        self.deadline = self.config.time_limit.map(|limit| self.start_time + limit);
        self.iterations = 0;
        self.stagnation = 0;

        let mut working = construct(&self.problem)?;
        let mut best = working.clone();
        info!("starting tabu search from cost {:.5}", best.cost);

        // Reference cost for stagnation detection, updated only when the
        // best cost actually moves.
        let mut reference_cost = best.cost;

        while !self.should_terminate() {
            self.cache.clear();

            let candidates = generate_moves(&working, &self.problem, &mut self.cache, &self.config);
            let Some(chosen) = select_move(&candidates, &self.tabu) else {
                debug!(
                    "iteration {}: neighborhood exhausted, stopping",
                    self.iterations
                );
                break;
            };

            self.tabu.insert(chosen);
            apply_move(&mut working, &self.problem, &chosen);
            working.remove_empty_routes();

            let feasible = working.evaluate(&self.problem);
            debug_assert!(feasible, "accepted move produced an infeasible route");

            self.iterations += 1;

            if working.cost < best.cost {
                best = working.clone();
                info!(
                    "iteration {}: new best cost {:.5} ({} routes)",
                    self.iterations,
                    best.cost,
                    best.get_route_count()
                );
            }

            if (reference_cost - best.cost).abs() < self.config.cost_tolerance {
                self.stagnation += 1;
            } else {
                self.stagnation = 0;
                reference_cost = best.cost;
            }
        }

        self.run_time = self.start_time.elapsed();
        info!(
            "search finished: {} iterations, best cost {:.5}",
            self.iterations, best.cost
        );

        Ok(&*self.best_solution.insert(best))
    }

    /// Check if a cooperative termination criterion is met. Evaluated
    /// between iterations, never mid-enumeration.
    fn should_terminate(&self) -> bool {
        if self.stagnation >= self.config.max_stagnation {
            debug!("stagnation threshold reached after {} iterations", self.iterations);
            return true;
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                debug!("time budget exhausted after {} iterations", self.iterations);
                return true;
            }
        }

        false
    }
}

/// Load-and-solve convenience: validates the precondition that at least one
/// customer was loaded, then runs the full pipeline.
pub fn solve(problem: Problem, config: Config) -> Result<Solution, Error> {
    if problem.get_customer_count() == 0 {
        return Err(Error::NoCustomers);
    }

    let mut search = TabuSearch::new(problem, config);
    let best = search.run()?.clone();
    Ok(best)
}
