//! Command line front-end.
//!
//! ```text
//! regatta optimize --schedule schedule.toml --optimization optimization.toml --out-yaml list.yml
//! regatta inspect --schedule schedule.toml --pairing-list list.yml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use regatta::{
    team_names, write_csv_file, OptimizationConfig, OptimizationResult, Optimizer, PairingList,
    ScheduleConfig,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "regatta", version, about = "Fair pairing lists for sailing leagues", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Builds a new pairing list
    Optimize(OptimizeArgs),
    /// Scores an existing pairing list
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    /// Schedule configuration (teams, boats, flights), TOML or YAML
    #[arg(short, long)]
    schedule: PathBuf,

    /// Optimization tuning, TOML or YAML
    #[arg(short, long)]
    optimization: PathBuf,

    /// Overrides the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Saves the pairing list as YAML
    #[arg(long)]
    out_yaml: Option<PathBuf>,

    /// Saves the pairing list as CSV
    #[arg(long)]
    out_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Schedule configuration the pairing list was built for
    #[arg(short, long)]
    schedule: PathBuf,

    /// Pairing list in YAML
    #[arg(short, long)]
    pairing_list: PathBuf,

    /// Cost weights; defaults apply when omitted
    #[arg(short, long)]
    optimization: Option<PathBuf>,

    /// Saves the pairing list as CSV
    #[arg(long)]
    out_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    regatta::console::init();

    match cli.command {
        Command::Optimize(args) => optimize(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn optimize(args: OptimizeArgs) -> Result<()> {
    let schedule = load_schedule(&args.schedule)?;
    let mut config = OptimizationConfig::load(&args.optimization)
        .with_context(|| format!("loading {}", args.optimization.display()))?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let result = Optimizer::from_config(&schedule, config)?.solve()?;
    print_result(&schedule, &result);

    if let Some(path) = &args.out_yaml {
        PairingList::from_schedule(&result.schedule).write_yaml_file(path)?;
        info!(event = "saved", path = %path.display());
    }
    if let Some(path) = &args.out_csv {
        write_csv_file(&result.schedule, path)?;
        info!(event = "saved", path = %path.display());
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let schedule = load_schedule(&args.schedule)?;
    let config = match &args.optimization {
        Some(path) => OptimizationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => OptimizationConfig::default(),
    };

    let list = PairingList::from_yaml_file(&args.pairing_list)
        .with_context(|| format!("loading {}", args.pairing_list.display()))?;
    let pairings = list
        .into_schedule(schedule.shape()?)
        .with_context(|| format!("{} does not fit the schedule", args.pairing_list.display()))?;

    let result = Optimizer::from_config(&schedule, config)?.evaluate(pairings);
    print_result(&schedule, &result);

    if let Some(path) = &args.out_csv {
        write_csv_file(&result.schedule, path)?;
    }
    Ok(())
}

fn load_schedule(path: &Path) -> Result<ScheduleConfig> {
    let schedule =
        ScheduleConfig::load(path).with_context(|| format!("loading {}", path.display()))?;
    schedule.validate()?;
    Ok(schedule)
}

fn print_result(schedule: &ScheduleConfig, result: &OptimizationResult) {
    for (index, flight) in result.schedule.flights().iter().enumerate() {
        println!("{}", format!("Flight {}", index + 1).bright_cyan().bold());
        for (race, teams) in flight.races().iter().enumerate() {
            println!("  {:>2}: {}", race + 1, team_names(schedule, teams).join(" | "));
        }
    }

    let stats = &result.statistics;
    println!();
    println!("match score      {:.3}", result.match_score);
    println!("boat score       {:.3}", result.boat_score);
    println!(
        "saved shuttles   {} ({} harbour, {} sea)",
        stats.saved_shuttles(),
        stats.shuttles_harbour,
        stats.shuttles_sea
    );
    println!("boat changes     {}", stats.boat_changes);
}
