/// Sonance - volume conversion and playback scheduling tools
use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use sonance_cli::{
    convert::{convert, ConvertInput},
    simulate, SessionConfig, SimulationReport,
};
use sonance_values::ConversionMode;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sonance")]
#[command(about = "Volume conversion and gapless playback scheduling tools", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between decibels and linear volume, or semitones and pitch ratios
    Convert(ConvertArgs),
    /// Run a session file against a simulated audio clock
    Simulate {
        /// Session file (TOML)
        #[arg(short, long, env = "SONANCE_SESSION")]
        session: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["db", "linear", "semitones", "ratio"])
))]
struct ConvertArgs {
    /// Volume in decibels (-80 to 0)
    #[arg(long, allow_hyphen_values = true)]
    db: Option<f32>,
    /// Normalized volume (0 to 1)
    #[arg(long)]
    linear: Option<f32>,
    /// Pitch offset in semitones
    #[arg(long, allow_hyphen_values = true)]
    semitones: Option<f32>,
    /// Pitch ratio (1.0 = unchanged)
    #[arg(long)]
    ratio: Option<f32>,
    /// Use the fast approximate volume conversion
    #[arg(long)]
    approximate: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "sonance=debug"
    } else {
        "sonance=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert(args) => {
            run_convert(&args)?;
        }
        Commands::Simulate { session, json } => {
            run_simulate(session, json)?;
        }
    }

    Ok(())
}

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let input = if let Some(db) = args.db {
        ConvertInput::Decibels(db)
    } else if let Some(linear) = args.linear {
        ConvertInput::Linear(linear)
    } else if let Some(semitones) = args.semitones {
        ConvertInput::Semitones(semitones)
    } else if let Some(ratio) = args.ratio {
        ConvertInput::Ratio(ratio)
    } else {
        anyhow::bail!("nothing to convert");
    };

    let result = convert(input, ConversionMode::from_approximate(args.approximate));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    Ok(())
}

fn run_simulate(session: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = SessionConfig::load(session.as_deref()).context("Failed to load session")?;
    let report = simulate::run(&config).context("Simulation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!(
        "Simulated {:.3}s in {} frames",
        report.elapsed_secs, report.frames
    );

    println!("\nScheduled clips:");
    for entry in &report.scheduled {
        println!(
            "  slot {}  {:>12.6}s - {:>12.6}s  {}",
            entry.slot, entry.start, entry.end, entry.clip
        );
    }
    if report.resyncs > 0 {
        println!("  ({} resyncs after driver stalls)", report.resyncs);
    }
    println!("  {} slots stopped at end of session", report.slots_stopped);

    println!("\nFades:");
    println!(
        "  events: {} applied, {} rejected",
        report.events_applied, report.events_rejected
    );
    println!(
        "  fades:  {} started, {} completed, {} cancelled",
        report.fades_started, report.fades_completed, report.fades_cancelled
    );
    println!("  stops:  {} fired", report.stops_fired);
    println!(
        "  channel: volume {:.4} (peak {:.4}), {}",
        report.final_volume,
        report.peak_volume,
        if report.playing { "playing" } else { "stopped" }
    );
}
