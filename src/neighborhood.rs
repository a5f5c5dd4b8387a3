//! Neighborhood move generation, application, and the tabu list.
//!
//! Two move kinds are explored: swapping one customer between two routes,
//! and relocating a single customer from one route into another. Candidates
//! are enumerated over every ordered pair of distinct routes, tested for
//! time-window feasibility through the memoized evaluator and for capacity
//! from the cached loads, ranked by cost delta, and truncated before tabu
//! filtering.

use crate::config::Config;
use crate::evaluation::{Evaluation, RouteCache};
use crate::problem::Problem;
use crate::solution::Solution;
use itertools::Itertools;
use std::collections::VecDeque;

/// The kind of a neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Exchange the customers at two positions of two different routes.
    Swap,
    /// Remove the customer at one position and insert it into another route.
    Relocate,
}

/// A single neighborhood transformation, plus the cost delta applying it
/// would produce.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub kind: MoveKind,
    /// Index of the first route and the position within it.
    pub route_a: usize,
    pub pos_a: usize,
    /// Index of the second route and the position within it (for a
    /// relocate, the insertion position).
    pub route_b: usize,
    pub pos_b: usize,
    /// Net cost change of applying this move.
    pub delta: f64,
}

// Move identity deliberately excludes the delta, so a recomputed cost never
// defeats a tabu lookup.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.route_a == other.route_a
            && self.pos_a == other.pos_a
            && self.route_b == other.route_b
            && self.pos_b == other.pos_b
    }
}

/// A bounded recent-move exclusion list. Insertion order determines
/// eviction order: once the capacity is exceeded, the oldest entry goes.
#[derive(Debug)]
pub struct TabuList {
    entries: VecDeque<Move>,
    capacity: usize,
}

impl TabuList {
    /// Create an empty tabu list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        TabuList {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Whether a move with the same identity is currently tabu.
    pub fn contains(&self, mv: &Move) -> bool {
        self.entries.iter().any(|entry| entry == mv)
    }

    /// Record a move, evicting the oldest entry when over capacity.
    pub fn insert(&mut self, mv: Move) {
        self.entries.push_back(mv);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Number of moves currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no moves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enumerate candidate swap and relocate moves for the current solution.
///
/// Trial sequences are built in a scratch copy of the solution and undone
/// after each evaluation; the memoized evaluator absorbs the repeated
/// lookups of unchanged routes. Enumeration stops once
/// `max_candidate_moves` candidates are recorded, and the result is sorted
/// ascending by delta and truncated to `max_sorted_candidates`.
pub fn generate_moves(
    solution: &Solution,
    problem: &Problem,
    cache: &mut RouteCache,
    config: &Config,
) -> Vec<Move> {
    let capacity = problem.vehicle_capacity;
    let route_count = solution.routes.len();
    let mut scratch = solution.clone();
    let mut moves: Vec<Move> = Vec::new();

    'enumeration: for route_a in 0..route_count {
        for route_b in 0..route_count {
            if route_a == route_b {
                continue;
            }

            for i in 0..solution.routes[route_a].sequence.len() {
                for j in 0..solution.routes[route_b].sequence.len() {
                    let customer_a = solution.routes[route_a].sequence[i];
                    let customer_b = solution.routes[route_b].sequence[j];
                    let demand_a = problem.customers[customer_a].demand;
                    let demand_b = problem.customers[customer_b].demand;

                    let old_a = cache.evaluate(problem, &solution.routes[route_a].sequence);
                    let old_b = cache.evaluate(problem, &solution.routes[route_b].sequence);

                    // Swap trial.
                    scratch.routes[route_a].sequence[i] = customer_b;
                    scratch.routes[route_b].sequence[j] = customer_a;

                    let new_a = cache.evaluate(problem, &scratch.routes[route_a].sequence);
                    let new_b = cache.evaluate(problem, &scratch.routes[route_b].sequence);

                    if new_a.is_feasible() && new_b.is_feasible() {
                        let load_a = solution.routes[route_a].load - demand_a + demand_b;
                        let load_b = solution.routes[route_b].load - demand_b + demand_a;

                        if load_a >= 0
                            && load_a as f64 <= capacity
                            && load_b >= 0
                            && load_b as f64 <= capacity
                        {
                            let delta = delta_of(new_a, new_b, old_a, old_b);
                            moves.push(Move {
                                kind: MoveKind::Swap,
                                route_a,
                                pos_a: i,
                                route_b,
                                pos_b: j,
                                delta,
                            });
                            if moves.len() >= config.max_candidate_moves {
                                break 'enumeration;
                            }
                        }
                    }

                    scratch.routes[route_a].sequence[i] = customer_a;
                    scratch.routes[route_b].sequence[j] = customer_b;

                    // Relocate trial: move customer_a in front of position j.
                    let removed = scratch.routes[route_a].sequence.remove(i);
                    scratch.routes[route_b].sequence.insert(j, removed);

                    let new_a = cache.evaluate(problem, &scratch.routes[route_a].sequence);
                    let new_b = cache.evaluate(problem, &scratch.routes[route_b].sequence);

                    if new_a.is_feasible() && new_b.is_feasible() {
                        let load_a = solution.routes[route_a].load - demand_a;
                        let load_b = solution.routes[route_b].load + demand_a;

                        if load_a >= 0
                            && load_a as f64 <= capacity
                            && load_b >= 0
                            && load_b as f64 <= capacity
                        {
                            let delta = delta_of(new_a, new_b, old_a, old_b);
                            moves.push(Move {
                                kind: MoveKind::Relocate,
                                route_a,
                                pos_a: i,
                                route_b,
                                pos_b: j,
                                delta,
                            });
                            if moves.len() >= config.max_candidate_moves {
                                break 'enumeration;
                            }
                        }
                    }

                    let restored = scratch.routes[route_b].sequence.remove(j);
                    scratch.routes[route_a].sequence.insert(i, restored);
                }
            }
        }
    }

    let mut moves: Vec<Move> = moves
        .into_iter()
        .sorted_by(|a, b| a.delta.total_cmp(&b.delta))
        .collect();
    moves.truncate(config.max_sorted_candidates);
    moves
}

fn delta_of(new_a: Evaluation, new_b: Evaluation, old_a: Evaluation, old_b: Evaluation) -> f64 {
    // All four are feasible by the time a candidate is recorded; unchanged
    // routes of a maintained solution are always feasible.
    let cost = |e: Evaluation| e.cost().unwrap_or(f64::INFINITY);
    (cost(new_a) + cost(new_b)) - (cost(old_a) + cost(old_b))
}

/// Pick the best-ranked candidate that is not tabu; when every candidate is
/// tabu, fall back to the single best one regardless.
pub fn select_move(candidates: &[Move], tabu: &TabuList) -> Option<Move> {
    candidates
        .iter()
        .find(|mv| !tabu.contains(mv))
        .or_else(|| candidates.first())
        .copied()
}

/// Apply a selected move to the working solution, updating the two affected
/// sequences and their cached loads in place. The caller prunes any route
/// left empty.
pub fn apply_move(solution: &mut Solution, problem: &Problem, mv: &Move) {
    match mv.kind {
        MoveKind::Swap => {
            let customer_a = solution.routes[mv.route_a].sequence[mv.pos_a];
            let customer_b = solution.routes[mv.route_b].sequence[mv.pos_b];
            let demand_a = problem.customers[customer_a].demand;
            let demand_b = problem.customers[customer_b].demand;

            solution.routes[mv.route_a].load += demand_b - demand_a;
            solution.routes[mv.route_b].load += demand_a - demand_b;

            solution.routes[mv.route_a].sequence[mv.pos_a] = customer_b;
            solution.routes[mv.route_b].sequence[mv.pos_b] = customer_a;
        }
        MoveKind::Relocate => {
            let customer = solution.routes[mv.route_a].sequence.remove(mv.pos_a);
            let demand = problem.customers[customer].demand;

            solution.routes[mv.route_b].sequence.insert(mv.pos_b, customer);
            solution.routes[mv.route_a].load -= demand;
            solution.routes[mv.route_b].load += demand;
        }
    }
}
