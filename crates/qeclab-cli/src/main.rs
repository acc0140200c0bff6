//! QEC Lab Command-Line Interface
//!
//! Sweep small error-correcting codes over noise strengths and compare them
//! with an unencoded qubit.
//!
//! ```text
//!   qeclab sweep --code steane --noise depolarizing --ps 0.001,0.01,0.05 --baseline
//!   qeclab baseline --noise amplitude_damping --logical 1
//!   qeclab active --error-qubit 2
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{active, baseline, codes, engines, sweep, version};

/// QEC Lab - logical error rates of small quantum codes
#[derive(Parser)]
#[command(name = "qeclab")]
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
    /// Sweep a code over a grid of noise strengths
    Sweep(sweep::SweepArgs),

    /// Measure the flip rate of one unencoded qubit
    Baseline(baseline::BaselineArgs),

    /// Run the mid-circuit active-correction demo
    Active(active::ActiveArgs),

    /// List available codes
    Codes,

    /// List available engines
    Engines,

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
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Sweep(args) => sweep::execute(args),
        Commands::Baseline(args) => baseline::execute(args),
        Commands::Active(args) => active::execute(args),
        Commands::Codes => {
            codes::execute();
            Ok(())
        }
        Commands::Engines => engines::execute(),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
