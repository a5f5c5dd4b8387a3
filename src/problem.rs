//! Problem definition and data structures for the CVRPTW.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Represents a customer (or the depot) in the CVRPTW.
///
/// The `id` is the externally visible identifier from the instance file; it
/// is distinct from the customer's index in [`Problem::customers`], which is
/// what routes store. Index 0 is always the depot, and the depot's `due`
/// bounds the latest allowed return time of every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: i64,
    /// Earliest time service may start.
    pub ready: f64,
    /// Latest time service may start (or, for the depot, latest return).
    pub due: f64,
    /// Time spent servicing this customer.
    pub service: f64,
}

impl Customer {
    /// Create a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: i64, ready: f64, due: f64, service: f64) -> Self {
        Customer {
            id,
            x,
            y,
            demand,
            ready,
            due,
            service,
        }
    }

    /// Calculate the Euclidean distance between two customers.
    pub fn distance(&self, other: &Customer) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Represents a CVRPTW problem instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub customers: Vec<Customer>,
    pub depot_index: usize,
    pub vehicle_capacity: f64,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a new CVRPTW problem. The first customer is the depot.
    pub fn new(name: String, customers: Vec<Customer>, vehicle_capacity: f64) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&customers);

        Problem {
            name,
            customers,
            depot_index: 0,
            vehicle_capacity,
            distance_matrix,
        }
    }

    /// Calculate the travel distance (= travel time) between two indices.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Get the number of customers (excluding the depot).
    pub fn get_customer_count(&self) -> usize {
        self.customers.len().saturating_sub(1)
    }

    /// Get the depot record.
    pub fn get_depot(&self) -> &Customer {
        &self.customers[self.depot_index]
    }

    /// Generate the full distance matrix for all customers.
    fn compute_distance_matrix(customers: &[Customer]) -> Vec<Vec<f64>> {
        let n = customers.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = customers[i].distance(&customers[j]);
                }
            }
        }

        matrix
    }

    /// Load a problem from an instance file.
    ///
    /// Expected layout: four header lines, then a line holding the vehicle
    /// count and capacity, then five more header lines, then one customer
    /// record `id x y demand ready due service` per line with the depot
    /// first. The vehicle count is ignored (homogeneous unlimited fleet).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());

        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        let lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;

        let capacity_line = lines
            .get(4)
            .ok_or_else(|| Error::Parse("missing vehicle capacity line".to_string()))?;
        let mut parts = capacity_line.split_whitespace();
        let _vehicle_count = parts
            .next()
            .ok_or_else(|| Error::Parse("missing vehicle count".to_string()))?;
        let vehicle_capacity: f64 = parts
            .next()
            .ok_or_else(|| Error::Parse("missing vehicle capacity".to_string()))?
            .parse()
            .map_err(|_| Error::Parse("invalid vehicle capacity".to_string()))?;

        let mut customers = Vec::new();
        for line in lines.iter().skip(9) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 7 {
                return Err(Error::Parse(format!(
                    "truncated customer record: {:?}",
                    line
                )));
            }

            let parse_f = |s: &str| -> Result<f64, Error> {
                s.parse()
                    .map_err(|_| Error::Parse(format!("invalid number: {}", s)))
            };
            let id: usize = fields[0]
                .parse()
                .map_err(|_| Error::Parse(format!("invalid customer id: {}", fields[0])))?;
            let demand: i64 = fields[3]
                .parse()
                .map_err(|_| Error::Parse(format!("invalid demand: {}", fields[3])))?;

            customers.push(Customer::new(
                id,
                parse_f(fields[1])?,
                parse_f(fields[2])?,
                demand,
                parse_f(fields[4])?,
                parse_f(fields[5])?,
                parse_f(fields[6])?,
            ));
        }

        Ok(Problem::new(name, customers, vehicle_capacity))
    }
}
