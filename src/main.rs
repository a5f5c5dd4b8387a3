//! Command-line front end for the tabu search CVRPTW solver.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tabu_cvrptw::config::Config;
use tabu_cvrptw::error::Error;
use tabu_cvrptw::problem::Problem;
use tabu_cvrptw::solution::Solution;
use tabu_cvrptw::utils::{save_infeasible, save_solution, SearchStatistics};
use tabu_cvrptw::TabuSearch;

/// Tabu search solver for the CVRPTW.
#[derive(Debug, Parser)]
#[command(name = "tabu_cvrptw", version, about)]
struct Args {
    /// Path to the instance file.
    instance: PathBuf,

    /// Path of the solution file to write.
    #[arg(short, long, default_value = "wynik.txt")]
    output: PathBuf,

    /// Optional JSON file with configuration overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock time limit in seconds (overrides the config file).
    #[arg(long)]
    time_limit: Option<u64>,
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)
                .map_err(|e| Error::Parse(format!("invalid config file: {}", e)))?
        }
        None => Config::default(),
    };

    if let Some(seconds) = args.time_limit {
        config = config.with_time_limit(Duration::from_secs(seconds));
    }

    Ok(config)
}

fn run(args: &Args) -> Result<(), Error> {
    let problem = Problem::from_file(&args.instance)?;
    if problem.get_customer_count() == 0 {
        return Err(Error::NoCustomers);
    }
    info!(
        "{} customers loaded from {}",
        problem.get_customer_count(),
        args.instance.display()
    );

    let config = load_config(args)?;
    let mut search = TabuSearch::new(problem, config);

    match search.run().map(Solution::clone) {
        Ok(best) => {
            let stats = SearchStatistics {
                iterations: search.iterations,
                runtime: search.run_time,
                best_cost: best.cost,
                best_route_count: best.get_route_count(),
            };
            info!("{}", stats.format());
            save_solution(&best, &search.problem, &args.output)?;
        }
        Err(infeasibility) => {
            info!("instance is infeasible: {}", infeasibility);
            save_infeasible(&args.output)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
