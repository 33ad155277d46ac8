use std::path::PathBuf;

use clap::Parser;

use trumpbot_bench::config::{BenchmarkConfig, ResolvedOutputs};
use trumpbot_bench::logging::init_logging;
use trumpbot_bench::tournament::TournamentRunner;

/// Self-play harness for the trick-taking bot.
#[derive(Debug, Parser)]
#[command(
    name = "trumpbot-bench",
    author,
    version,
    about = "Deterministic self-play harness for trick-taking policies"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of hands to play.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no hands are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::load(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;
    println!(
        "Loaded configuration '{run_id}' ({hands} hand{}, trump mode {:?})",
        if hands == 1 { "" } else { "s" },
        config.trump
    );

    if cli.validate_only {
        println!("Validation-only mode: no hands played.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run complete for '{run_id}': {} hands, {} decisions in {:.1?} → {} rows at {}",
        summary.hands_played,
        summary.decisions,
        summary.elapsed,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry) = summary.telemetry.as_ref() {
        println!(
            "Telemetry: {} decisions, branches {:?}",
            telemetry.decisions, telemetry.branch_counts
        );
    }

    Ok(())
}
