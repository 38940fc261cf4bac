//! Score Simulator CLI
//!
//! Simulates the fixtures of a date from the cached (or freshly fetched) feed.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "score_simulator")]
#[command(about = "Simulate football scores from shot and xG statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the version
    Version,

    /// Simulate the matches of a date
    Play {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Simulations averaged per match
        #[arg(long)]
        runs: Option<usize>,

        /// Minutes per match
        #[arg(long)]
        fulltime: Option<u32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Use the local cache only
        #[arg(long, default_value = "false")]
        offline: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Play { date, runs, fulltime, seed, offline } => {
            let mut config = score_core::SimConfig::from_env()?;
            if let Some(runs) = runs {
                config.runs = runs;
            }
            if let Some(fulltime) = fulltime {
                config.fulltime = fulltime;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.validate()?;

            let today = chrono::Local::now().date_naive();
            let date = date.unwrap_or_else(|| score_data::date_key(today));

            let store = score_data::MatchStore::new();
            let matches = if offline {
                store.read().context("No usable cache for --offline")?
            } else {
                let source = score_data::HttpSource::new()?;
                store.get(&source, today)?
            };

            let records = score_data::MatchStore::select(&date, &matches);
            if records.is_empty() {
                println!("No matches on {}", date);
                return Ok(());
            }

            for (record, result) in records.iter().zip(score_data::play_matches(records, &config)) {
                match result {
                    Ok(result) => print_result(&result),
                    Err(e) => eprintln!("{} - {}: {:#}", record.competition.name, record.name, e),
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(feature = "cli")]
fn print_result(result: &score_core::MatchResult) {
    println!("{}", result.headline());
    println!(
        "   shots {:>3} {} {:<3}",
        result.home.shots,
        result.shots_progress_bar(),
        result.away.shots
    );
    println!(
        "   xG  {:>5.2} {} {:<5.2}",
        result.home.xg,
        result.xg_progress_bar(),
        result.away.xg
    );
    if !result.home.goal_minutes.is_empty() {
        println!("   {}: {}", result.home.name, result.home.goal_log());
    }
    if !result.away.goal_minutes.is_empty() {
        println!("   {}: {}", result.away.name, result.away.goal_log());
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("score_simulator CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
