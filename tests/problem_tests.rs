//! Unit tests for the problem data structures and instance loader.

use std::fs;
use std::path::PathBuf;
use tabu_cvrptw::error::Error;
use tabu_cvrptw::problem::{Customer, Problem};

/// Creates a small test problem with a depot and three customers.
fn create_test_problem() -> Problem {
    let customers = vec![
        Customer::new(0, 0.0, 0.0, 0, 0.0, 1000.0, 0.0),
        Customer::new(1, 3.0, 4.0, 5, 0.0, 100.0, 10.0),
        Customer::new(2, 10.0, 0.0, 3, 0.0, 200.0, 10.0),
        Customer::new(3, 0.0, 10.0, 4, 50.0, 300.0, 10.0),
    ];

    Problem::new("TestProblem".to_string(), customers, 100.0)
}

/// Writes an instance file into a temp location and returns its path.
fn write_instance(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, body).unwrap();
    path
}

const VALID_INSTANCE: &str = "\
m2kvrptw

VEHICLE
NUMBER     CAPACITY
   2          100

CUSTOMER
CUST NO.   XCOORD.   YCOORD.   DEMAND    READY TIME   DUE DATE   SERVICE TIME

    0         0.0       0.0        0          0.0       1000.0            0.0
    1        10.0       0.0        5          0.0        100.0           10.0
    2         0.0      10.0        3         20.0        200.0           10.0
";

#[test]
fn test_distance_matrix_properties() {
    let problem = create_test_problem();
    let n = problem.customers.len();

    for i in 0..n {
        assert_eq!(problem.get_distance(i, i), 0.0);
        for j in 0..n {
            assert_eq!(problem.get_distance(i, j), problem.get_distance(j, i));
            assert!(problem.get_distance(i, j) >= 0.0);
        }
    }

    // 3-4-5 triangle between depot and customer 1
    assert!((problem.get_distance(0, 1) - 5.0).abs() < 1e-9);
    assert!((problem.get_distance(0, 2) - 10.0).abs() < 1e-9);
}

#[test]
fn test_customer_count_and_depot() {
    let problem = create_test_problem();

    assert_eq!(problem.get_customer_count(), 3);
    assert_eq!(problem.depot_index, 0);
    assert_eq!(problem.get_depot().due, 1000.0);
}

#[test]
fn test_from_file_parses_instance() {
    let path = write_instance("tabu_cvrptw_valid.txt", VALID_INSTANCE);
    let problem = Problem::from_file(&path).unwrap();

    assert_eq!(problem.vehicle_capacity, 100.0);
    assert_eq!(problem.customers.len(), 3);
    assert_eq!(problem.get_customer_count(), 2);

    let depot = problem.get_depot();
    assert_eq!(depot.id, 0);
    assert_eq!(depot.demand, 0);
    assert_eq!(depot.due, 1000.0);

    let first = &problem.customers[1];
    assert_eq!(first.id, 1);
    assert_eq!(first.demand, 5);
    assert_eq!(first.x, 10.0);
    assert_eq!(first.service, 10.0);

    let second = &problem.customers[2];
    assert_eq!(second.ready, 20.0);

    fs::remove_file(path).unwrap();
}

#[test]
fn test_from_file_missing_capacity_line() {
    let path = write_instance("tabu_cvrptw_short.txt", "just\ntwo lines\n");
    let result = Problem::from_file(&path);

    assert!(matches!(result, Err(Error::Parse(_))));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_from_file_truncated_record() {
    let body = VALID_INSTANCE.to_string() + "    3        5.0\n";
    let path = write_instance("tabu_cvrptw_truncated.txt", &body);
    let result = Problem::from_file(&path);

    assert!(matches!(result, Err(Error::Parse(_))));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_from_file_invalid_number() {
    let body = VALID_INSTANCE.replace("   2          100", "   2          abc");
    let path = write_instance("tabu_cvrptw_badnum.txt", &body);
    let result = Problem::from_file(&path);

    assert!(matches!(result, Err(Error::Parse(_))));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_from_file_missing_file() {
    let result = Problem::from_file("/nonexistent/tabu_cvrptw_missing.txt");
    assert!(matches!(result, Err(Error::Io(_))));
}
