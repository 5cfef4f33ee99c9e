//! hm-city — command-line driver for the housing-market simulation.
//!
//! Loads a neighbourhood table (or the built-in sample city), applies a TOML
//! configuration plus command-line overrides, and either
//!
//! - runs one simulation, writing `round_summaries.csv`,
//!   `neighbourhood_stats.csv` and `summary.json` to `--out`, or
//! - runs `--batch N` independent seeds in parallel and writes the final
//!   round of each to `summary.json`.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hm_agent::{
    JitterPlacement, Market, NeighbourhoodRecord, NullPlacement, Placement, load_neighbourhoods_csv,
    load_neighbourhoods_reader,
};
use hm_core::Config;
use hm_output::{CsvWriter, NeighbourhoodRow, OutputWriter, SimOutputObserver};
use hm_sim::{BatchRun, RoundStats, SimBuilder, SimObserver, run_batch};

// ── Sample city ───────────────────────────────────────────────────────────────

// Capacities are real dwelling counts; `housing_fraction` scales them down.
const SAMPLE_CITY_CSV: &str = "\
name,housing_quality,shops,crime,nature,expense,capacity,base_price,x,y
Centrum,7.4,0.95,0.35,0.10,1400,52000,520000,4.897,52.373
West,7.1,0.70,0.55,0.25,1150,78000,430000,4.860,52.378
Zuid,7.9,0.80,0.70,0.40,1500,83000,610000,4.875,52.345
Oost,6.9,0.60,0.55,0.45,1050,68000,390000,4.935,52.360
Noord,6.4,0.35,0.60,0.70,850,47000,310000,4.920,52.400
Nieuw-West,6.1,0.40,0.45,0.60,800,70000,300000,4.800,52.360
Zuidoost,5.8,0.45,0.40,0.55,750,45000,270000,4.975,52.310
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hm-city")]
#[command(about = "Agent-based housing-market simulation")]
struct Args {
    /// Neighbourhood table (CSV); the built-in sample city when omitted
    #[arg(long)]
    neighbourhoods: Option<PathBuf>,

    /// TOML configuration file; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `run.max_rounds`
    #[arg(long)]
    rounds: Option<u64>,

    /// Override `run.seed` (first seed of a batch)
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "output/city")]
    out: PathBuf,

    /// Run N independent seeds instead of one simulation
    #[arg(long)]
    batch: Option<u64>,

    /// Half-width of the random square dwellings are placed in around each
    /// neighbourhood centroid; 0 places everything on the centroid
    #[arg(long, default_value_t = 0.005)]
    jitter: f64,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs each round and forwards everything to the output observer.
struct ProgressObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    summary_rows:  usize,
    snapshot_rows: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, summary_rows: 0, snapshot_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_round_end(&mut self, stats: &RoundStats) {
        info!(
            round = stats.round,
            deals = stats.deals,
            population = stats.population,
            homeless = stats.homeless,
            unhappy_share = stats.unhappy_share,
            avg_price = stats.avg_price,
            "round"
        );
        self.summary_rows += 1;
        self.inner.on_round_end(stats);
    }

    fn on_snapshot(&mut self, round: u64, market: &Market) {
        self.snapshot_rows += market.neighbourhoods.len();
        self.inner.on_snapshot(round, market);
    }

    fn on_sim_end(&mut self, final_round: u64) {
        self.inner.on_sim_end(final_round);
    }
}

// ── summary.json ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RunSummary<'a> {
    config:         &'a Config,
    rounds:         u64,
    final_round:    Option<&'a RoundStats>,
    neighbourhoods: Vec<NeighbourhoodRow>,
}

#[derive(Serialize)]
struct BatchSummary<'a> {
    config: &'a Config,
    runs:   &'a [BatchRun],
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // 1. Configuration: file (or defaults), then CLI overrides.
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(rounds) = args.rounds {
        config.run.max_rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    config.validate()?;

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // 2. Neighbourhood table.
    let records: Vec<NeighbourhoodRecord> = match &args.neighbourhoods {
        Some(path) => load_neighbourhoods_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => load_neighbourhoods_reader(Cursor::new(SAMPLE_CITY_CSV))?,
    };
    info!(neighbourhoods = records.len(), "neighbourhood table loaded");

    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;

    // 3a. Batch mode.
    if let Some(n) = args.batch {
        let seeds: Vec<u64> = (0..n).map(|i| config.run.seed.wrapping_add(i)).collect();
        let t0 = Instant::now();
        let runs = run_batch(&records, &config, &seeds)?;
        info!(members = runs.len(), secs = t0.elapsed().as_secs_f64(), "batch complete");

        println!(
            "{:<8} {:>7} {:>10} {:>9} {:>12} {:>14}",
            "Seed", "Rounds", "Population", "Homeless", "Contentment", "Avg price"
        );
        println!("{}", "-".repeat(65));
        for run in &runs {
            if let Some(s) = &run.final_stats {
                println!(
                    "{:<8} {:>7} {:>10} {:>9} {:>12.3} {:>14.0}",
                    run.seed, run.rounds, s.population, s.homeless, s.avg_contentment, s.avg_price
                );
            }
        }
        write_json(&args.out.join("summary.json"), &BatchSummary { config: &config, runs: &runs })?;
        return Ok(());
    }

    // 3b. Single run.
    let placement: Box<dyn Placement> = if args.jitter > 0.0 {
        Box::new(JitterPlacement { half_width: args.jitter })
    } else {
        Box::new(NullPlacement)
    };
    let mut sim = SimBuilder::new(config.clone(), records).placement(placement).build()?;

    let writer = CsvWriter::new(&args.out)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let rounds = sim.run(&mut obs);
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete: {rounds} rounds in {:.3} s", elapsed.as_secs_f64());
    println!("  round_summaries.csv     : {} rows", obs.summary_rows);
    println!("  neighbourhood_stats.csv : {} rows", obs.snapshot_rows);
    println!();

    // 4. Final neighbourhood table.
    let rows: Vec<NeighbourhoodRow> =
        sim.market.neighbourhoods.iter().map(|n| NeighbourhoodRow::new(sim.round, n)).collect();
    println!(
        "{:<14} {:>6} {:>8} {:>7} {:>12} {:>12}",
        "Neighbourhood", "Units", "Vacant", "Moves", "Contentment", "Avg price"
    );
    println!("{}", "-".repeat(64));
    for (row, n) in rows.iter().zip(&sim.market.neighbourhoods) {
        println!(
            "{:<14} {:>6} {:>8} {:>7} {:>12.3} {:>12.0}",
            row.neighbourhood,
            row.occupied + row.vacant,
            row.vacant,
            n.moves(),
            row.avg_contentment,
            row.avg_price,
        );
    }

    let summary = RunSummary {
        config:         &config,
        rounds:         sim.round,
        final_round:    sim.last_stats(),
        neighbourhoods: rows,
    };
    write_json(&args.out.join("summary.json"), &summary)?;
    Ok(())
}
