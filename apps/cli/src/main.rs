#![deny(warnings)]

//! Headless CLI: builds strategies from a scenario, runs the simulation and
//! prints the projections.

mod report;
mod scenario;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::Report;
use scenario::ScenarioFile;
use sim_core::{catalog, SimulationRequest};
use sim_planner::build_strategies;
use sim_runtime::SimulationRunner;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    scenario: Option<PathBuf>,
    months: Option<u32>,
    budget: Option<f64>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    json: bool,
    list: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next().map(PathBuf::from),
            "--months" => args.months = it.next().and_then(|s| s.parse().ok()),
            "--budget" => args.budget = it.next().and_then(|s| s.parse().ok()),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--delay-ms" => args.delay_ms = it.next().and_then(|s| s.parse().ok()),
            "--json" => args.json = true,
            "--list" => args.list = true,
            _ => {}
        }
    }
    args
}

fn print_catalog() {
    println!("Customer segments: {}", catalog::CUSTOMER_SEGMENTS.join(", "));
    println!("  micro segments: {}", catalog::MICRO_SEGMENTS.join(", "));
    println!("Product lines: {}", catalog::PRODUCT_LINES.join(", "));
    println!("Macro factors:");
    for f in catalog::MACRO_FACTORS {
        println!("  {:<4} {:<28} {}", f.id, f.name, f.category);
    }
    println!("Micro factors:");
    for f in catalog::MICRO_FACTORS {
        println!("  {:<4} {:<28} {}", f.id, f.name, f.category);
    }
    println!("Events:");
    for e in catalog::EVENTS {
        println!("  {:<4} {:<34} {:>+6.2} {}", e.id, e.name, e.impact, e.category);
    }
}

/// Rng for base ROI draws: a separate ChaCha stream of the run seed.
fn planner_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(1);
            rng
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    if args.list {
        print_catalog();
        return Ok(());
    }

    let mut file = match &args.scenario {
        Some(path) => ScenarioFile::load(path)?,
        None => ScenarioFile::builtin(),
    };
    if let Some(m) = args.months {
        file.months = m;
    }
    if let Some(b) = args.budget {
        file.selection.total_budget = b;
    }
    if args.seed.is_some() {
        file.config.rng_seed = args.seed;
    }
    if let Some(d) = args.delay_ms {
        file.config.delay_ms = d;
    }
    file.check()?;
    info!(scenario = ?args.scenario, months = file.months, seed = ?file.config.rng_seed, "starting CLI");

    let strategies = build_strategies(&file.selection, &mut planner_rng(file.config.rng_seed))
        .context("building strategies")?;
    let request = SimulationRequest {
        strategies,
        scenario: file.scenario(),
    };
    let mut runner = SimulationRunner::new(file.config.clone())?;
    let results = runner.run(&request).await.context("running simulation")?;

    let report = Report::new(&results);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
