//! Greedy construction of an initial feasible solution.

use crate::error::Infeasibility;
use crate::problem::Problem;
use crate::solution::{Route, Solution};
use log::{debug, info};

/// Build an initial feasible solution with a greedy earliest-service-start
/// heuristic.
///
/// Routes are opened one at a time. At each step every unvisited customer is
/// scanned; among those that fit the remaining capacity, whose window is
/// still reachable, and from which the depot can be reached before its due
/// time, the one whose service would start earliest is appended (ties go to
/// the lowest index). When no customer qualifies the route is closed and a
/// new one opened. A fresh route that cannot accept any remaining customer
/// means the instance is infeasible.
pub fn construct(problem: &Problem) -> Result<Solution, Infeasibility> {
    check_demands(problem)?;

    let n = problem.customers.len();
    let depot_index = problem.depot_index;
    let depot_due = problem.get_depot().due;
    let capacity = problem.vehicle_capacity;

    let mut visited = vec![false; n];
    visited[depot_index] = true;
    let mut unvisited_count = n - 1;

    let mut solution = Solution::new();

    while unvisited_count > 0 {
        let mut route = Route::new();
        let mut current_location = depot_index;
        let mut current_time = 0.0;

        loop {
            let mut best_customer: Option<usize> = None;
            let mut best_start_time = f64::INFINITY;

            for i in 1..n {
                if visited[i] {
                    continue;
                }
                let customer = &problem.customers[i];

                if (route.load + customer.demand) as f64 > capacity {
                    continue;
                }

                let arrival = current_time + problem.get_distance(current_location, i);
                let start_service = arrival.max(customer.ready);

                if start_service > customer.due {
                    continue;
                }

                let departure = start_service + customer.service;
                if departure + problem.get_distance(i, depot_index) > depot_due {
                    continue;
                }

                if start_service < best_start_time {
                    best_start_time = start_service;
                    best_customer = Some(i);
                }
            }

            match best_customer {
                Some(index) => {
                    let customer = &problem.customers[index];
                    route.sequence.push(index);
                    route.load += customer.demand;
                    current_time = best_start_time + customer.service;
                    current_location = index;

                    visited[index] = true;
                    unvisited_count -= 1;
                }
                None => break,
            }
        }

        if route.is_empty() {
            // A fresh route accepted nobody: some customer can never be
            // served within its window from the depot.
            debug!(
                "construction stuck with {} customers unplaced",
                unvisited_count
            );
            return Err(Infeasibility::Construction);
        }

        solution.routes.push(route);
    }

    if !solution.evaluate(problem) {
        return Err(Infeasibility::Construction);
    }

    info!(
        "greedy construction: {} routes, cost {:.5}",
        solution.get_route_count(),
        solution.cost
    );

    Ok(solution)
}

/// Reject the instance outright if any single customer's demand exceeds the
/// vehicle capacity. Checked before any construction work.
pub fn check_demands(problem: &Problem) -> Result<(), Infeasibility> {
    for (index, customer) in problem.customers.iter().enumerate() {
        if index == problem.depot_index {
            continue;
        }
        if customer.demand as f64 > problem.vehicle_capacity {
            return Err(Infeasibility::DemandExceedsCapacity { customer: index });
        }
    }
    Ok(())
}
