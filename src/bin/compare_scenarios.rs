//! Run a batch of savings scenarios from CSV and compare them side by side
//!
//! Usage: cargo run --bin compare_scenarios -- scenarios.csv [--json out.json]

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use tvm_projection::io::load_scenarios;
use tvm_projection::scenario::{best_by_real_value, ScenarioRunner};

#[derive(Parser)]
#[command(about = "Compare savings scenarios loaded from CSV")]
struct Args {
    /// Scenario CSV (name,principal,annual_rate,horizon_years,periodic_contribution,periods_per_year,contribution_timing,inflation_rate,apply_inflation)
    #[arg(env = "TVM_SCENARIOS")]
    scenarios: PathBuf,

    /// Write the comparison as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

/// One line of the comparison table
#[derive(Serialize)]
struct ComparisonRow {
    name: String,
    ending_balance: Option<f64>,
    real_ending_value: Option<f64>,
    total_contributed: Option<f64>,
    cagr_pct: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let scenarios = load_scenarios(&args.scenarios)
        .with_context(|| format!("failed to load {}", args.scenarios.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::with_scenarios(scenarios);
    let proj_start = Instant::now();
    let outcomes = runner.run_all();
    println!("Projections complete in {:?}", proj_start.elapsed());

    let rows: Vec<ComparisonRow> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => ComparisonRow {
                name: outcome.name.clone(),
                ending_balance: Some(result.ending_balance),
                real_ending_value: Some(result.real_ending_value),
                total_contributed: Some(result.total_contributed),
                cagr_pct: Some(result.summary.compound_annual_growth_rate_pct),
                error: None,
            },
            Err(err) => ComparisonRow {
                name: outcome.name.clone(),
                ending_balance: None,
                real_ending_value: None,
                total_contributed: None,
                cagr_pct: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    println!("\n{:<20} {:>16} {:>16} {:>16} {:>8}",
        "Scenario", "Ending", "Real", "Contributed", "CAGR%");
    println!("{}", "-".repeat(80));
    for row in &rows {
        match &row.error {
            None => println!("{:<20} {:>16.2} {:>16.2} {:>16.2} {:>8.2}",
                row.name,
                row.ending_balance.unwrap_or_default(),
                row.real_ending_value.unwrap_or_default(),
                row.total_contributed.unwrap_or_default(),
                row.cagr_pct.unwrap_or_default(),
            ),
            Some(err) => println!("{:<20} error: {}", row.name, err),
        }
    }

    if let Some(best) = best_by_real_value(&outcomes) {
        println!("\nBest real outcome: {}", best);
    }

    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &rows)?;
        println!("Comparison written to {}", path.display());
    }

    Ok(())
}
