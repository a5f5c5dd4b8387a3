//! Integration tests for the full tabu search pipeline.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::Duration;
use tabu_cvrptw::config::Config;
use tabu_cvrptw::construction::construct;
use tabu_cvrptw::error::Error;
use tabu_cvrptw::evaluation::{evaluate_route, Evaluation};
use tabu_cvrptw::problem::{Customer, Problem};
use tabu_cvrptw::solution::Solution;
use tabu_cvrptw::{solve, TabuSearch};

fn depot() -> Customer {
    Customer::new(0, 0.0, 0.0, 0, 0.0, 10000.0, 0.0)
}

fn test_config() -> Config {
    Config::default()
        .with_max_stagnation(10)
        .with_time_limit(Duration::from_secs(10))
}

/// Asserts the partition and capacity invariants plus per-route
/// feasibility of a final solution.
fn assert_valid_solution(solution: &Solution, problem: &Problem) {
    let mut seen = HashSet::new();
    for route in &solution.routes {
        assert!(!route.is_empty());
        assert!(route.load as f64 <= problem.vehicle_capacity);
        assert!(matches!(
            evaluate_route(problem, &route.sequence),
            Evaluation::Feasible(_)
        ));
        for &customer in &route.sequence {
            assert!(seen.insert(customer));
        }
    }
    assert_eq!(seen.len(), problem.get_customer_count());
}

#[test]
fn test_capacity_locked_instance_keeps_two_routes() {
    // Two customers of demand 6 under capacity 10: no move can merge them,
    // so the greedy solution is already final.
    let customers = vec![
        depot(),
        Customer::new(1, 10.0, 0.0, 6, 0.0, 5000.0, 0.0),
        Customer::new(2, 20.0, 0.0, 6, 0.0, 5000.0, 0.0),
    ];
    let problem = Problem::new("Locked".to_string(), customers, 10.0);

    let initial = construct(&problem).unwrap();
    assert_eq!(initial.get_route_count(), 2);

    let mut search = TabuSearch::new(problem, test_config());
    let best = search.run().unwrap();

    assert_eq!(best.get_route_count(), 2);
    assert!((best.cost - initial.cost).abs() < 1e-6);
}

#[test]
fn test_search_improves_greedy_solution() {
    // Greedy chains 1 and 2 by earliest start and strands 3 on its own
    // route; swapping 2 and 3 shortens the total.
    let customers = vec![
        depot(),
        Customer::new(1, 10.0, 0.0, 1, 0.0, 10000.0, 0.0),
        Customer::new(2, 10.0, 1.0, 1, 0.0, 10000.0, 0.0),
        Customer::new(3, 50.0, 0.0, 1, 0.0, 10000.0, 0.0),
    ];
    let problem = Problem::new("Improvable".to_string(), customers, 2.0);

    let initial = construct(&problem).unwrap();
    let initial_cost = initial.cost;

    let mut search = TabuSearch::new(problem.clone(), test_config());
    let best = search.run().unwrap().clone();

    assert!(best.cost < initial_cost - 1e-6);
    assert_valid_solution(&best, &problem);
    assert!(search.iterations > 0);
}

#[test]
fn test_best_cost_never_exceeds_greedy() {
    let customers = vec![
        depot(),
        Customer::new(1, 12.0, 3.0, 4, 0.0, 5000.0, 10.0),
        Customer::new(2, 25.0, 8.0, 3, 0.0, 5000.0, 10.0),
        Customer::new(3, 7.0, 20.0, 5, 100.0, 5000.0, 10.0),
        Customer::new(4, 30.0, 30.0, 2, 0.0, 5000.0, 10.0),
        Customer::new(5, 3.0, 28.0, 6, 0.0, 5000.0, 10.0),
    ];
    let problem = Problem::new("Bounded".to_string(), customers, 10.0);

    let initial = construct(&problem).unwrap();
    let mut search = TabuSearch::new(problem.clone(), test_config());
    let best = search.run().unwrap();

    assert!(best.cost <= initial.cost + 1e-9);
    assert_valid_solution(best, &problem);
}

#[test]
fn test_random_instance_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut customers = vec![Customer::new(0, 50.0, 50.0, 0, 0.0, 100000.0, 0.0)];
    for id in 1..=20 {
        customers.push(Customer::new(
            id,
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
            rng.gen_range(1..=8),
            0.0,
            rng.gen_range(5000.0..20000.0),
            rng.gen_range(1.0..10.0),
        ));
    }
    let problem = Problem::new("Random".to_string(), customers, 25.0);

    let initial = construct(&problem).unwrap();
    let mut search = TabuSearch::new(
        problem.clone(),
        Config::default()
            .with_max_stagnation(15)
            .with_time_limit(Duration::from_secs(5)),
    );
    let best = search.run().unwrap();

    assert!(best.cost <= initial.cost + 1e-9);
    assert_valid_solution(best, &problem);
}

#[test]
fn test_solve_reports_structural_infeasibility() {
    let customers = vec![depot(), Customer::new(1, 10.0, 0.0, 50, 0.0, 5000.0, 0.0)];
    let problem = Problem::new("Structural".to_string(), customers, 10.0);

    let result = solve(problem, test_config());
    assert!(matches!(result, Err(Error::Infeasible(_))));
}

#[test]
fn test_solve_returns_best_solution() {
    let customers = vec![
        depot(),
        Customer::new(1, 10.0, 0.0, 5, 0.0, 5000.0, 0.0),
        Customer::new(2, 0.0, 10.0, 5, 0.0, 5000.0, 0.0),
    ];
    let problem = Problem::new("Solvable".to_string(), customers, 20.0);

    let best = solve(problem.clone(), test_config()).unwrap();
    assert_valid_solution(&best, &problem);
    assert!(best.cost > 0.0);
}
