//! Output writing and reporting helpers.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::problem::Problem;
use crate::solution::Solution;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Save a solution to a file.
///
/// First line: route count and total cost with 5-decimal precision. Then
/// one line per route listing the external customer ids in visit order
/// (depot omitted).
pub fn save_solution<P: AsRef<Path>>(
    solution: &Solution,
    problem: &Problem,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "{} {:.5}", solution.get_route_count(), solution.cost)?;

    for route in &solution.routes {
        let ids: Vec<String> = route
            .sequence
            .iter()
            .map(|&index| problem.customers[index].id.to_string())
            .collect();
        writeln!(file, "{}", ids.join(" "))?;
    }

    Ok(())
}

/// Write the infeasibility marker: a single `-1` line.
pub fn save_infeasible<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "-1")?;
    Ok(())
}

/// Summary of a completed search run.
pub struct SearchStatistics {
    pub iterations: u32,
    pub runtime: Duration,
    pub best_cost: f64,
    pub best_route_count: usize,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Iterations: {}
- Runtime: {}
- Best Solution Cost: {:.5}
- Best Solution Routes: {}",
            self.iterations,
            format_duration(self.runtime),
            self.best_cost,
            self.best_route_count
        )
    }
}
