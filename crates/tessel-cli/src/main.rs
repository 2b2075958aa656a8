//! Tessel Command-Line Interface
//!
//! Generates surface and toric code memory experiments as stim circuit
//! text and checks them through their detector error model.
//!
//! ```text
//! tessel generate -t surface_code:rotated_memory_x -d 5 -r 5 --after-clifford-depolarization 0.001
//! tessel analyze  -t toric_code:unrotated_memory_z -d 3 --config noise.yaml --format json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::analyze::OutputFormat;
use commands::{analyze, generate, version};
use config::GenerationArgs;

/// Tessel - surface and toric code circuit generation
#[derive(Parser)]
#[command(name = "tessel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a memory experiment as stim circuit text
    Generate {
        #[command(flatten)]
        args: GenerationArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a memory experiment and analyse its detector error model
    Analyze {
        #[command(flatten)]
        args: GenerationArgs,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the detector error model as text
        #[arg(long)]
        dem_output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate { args, output } => generate::execute(&args, output.as_deref()),

        Commands::Analyze {
            args,
            format,
            dem_output,
        } => analyze::execute(&args, format, dem_output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
