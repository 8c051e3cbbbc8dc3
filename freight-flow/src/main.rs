use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use freight_flow::config::AccountingConfig;
use freight_flow::run::{RunError, check_empty_plan, run_flows};

/// Freight wagon flow accounting over a tree-shaped rail network.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding boundary stations and the root marker.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decompose an OD matrix into station and segment flows.
    Flows {
        /// Station adjacency list (`station parent` per line, after a header).
        #[arg(long)]
        topology: PathBuf,

        /// OD matrix as CSV.
        #[arg(long)]
        od: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Check an empty-wagon redistribution plan for balance and cost.
    CheckEmpty {
        #[arg(long)]
        topology: PathBuf,

        /// `station,loss` CSV of empty-wagon surplus and deficit.
        #[arg(long)]
        loss: PathBuf,

        /// `interval,distance,up,down` CSV of planned transfers.
        #[arg(long)]
        plan: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Logs go to stderr so the report on stdout can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = match &cli.config {
        Some(path) => AccountingConfig::from_json_file(path)?,
        None => AccountingConfig::default(),
    };

    match cli.command {
        Command::Flows {
            topology,
            od,
            format,
        } => {
            let report = run_flows(&topology, &od, &config)?;
            match format {
                Format::Text => print!("{report}"),
                Format::Json => {
                    println!("{}", report.to_json()?);
                }
            }
        }
        Command::CheckEmpty {
            topology,
            loss,
            plan,
        } => {
            let summary = check_empty_plan(&topology, &loss, &plan, &config)?;
            println!("Plan balances every station.");
            println!("  intervals used: {}", summary.intervals_used);
            println!("  wagons moved:   {}", summary.wagons_moved);
            println!("  empty distance: {}", summary.empty_distance);
        }
    }

    Ok(())
}
