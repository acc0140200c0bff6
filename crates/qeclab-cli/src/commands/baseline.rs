//! Baseline command implementation.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde_json::json;

use qeclab_codes::LogicalBit;
use qeclab_sweep::SweepRunner;

use super::common::{ProgressObserver, check_format, create_engine, print_points};

#[derive(Args, Debug)]
pub struct BaselineArgs {
    /// Noise channel
    #[arg(short, long, default_value = "bit_flip")]
    pub noise: String,

    /// Comma-separated noise strengths
    #[arg(long, value_delimiter = ',', default_values_t = [0.001, 0.005, 0.01, 0.02, 0.05])]
    pub ps: Vec<f64>,

    /// Shots per strength
    #[arg(short, long, default_value_t = 4096)]
    pub shots: u32,

    /// Prepared basis state (0 or 1)
    #[arg(short, long, default_value = "0")]
    pub logical: LogicalBit,

    /// Engine seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Engine (stabilizer, statevector)
    #[arg(short, long, default_value = "stabilizer")]
    pub engine: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Execute the baseline command.
pub fn execute(args: BaselineArgs) -> Result<()> {
    check_format(&args.format)?;
    let engine = create_engine(&args.engine, args.seed)?;

    let points = SweepRunner::new(engine.as_ref())
        .with_observer(ProgressObserver::new())
        .run_physical_grid_from(args.logical, &args.noise, &args.ps, args.shots)?;

    if args.format == "json" {
        let value = json!({
            "noise_type": args.noise,
            "logical_bit": args.logical,
            "engine": engine.name(),
            "shots": args.shots,
            "points": points,
        });
        let text = serde_json::to_string_pretty(&value).context("Failed to serialize baseline")?;
        println!("{text}");
    } else {
        println!(
            "\n{} Unencoded qubit from |{}⟩ under {} ({} shots per point)",
            style("✓").green().bold(),
            args.logical,
            style(&args.noise).yellow(),
            args.shots
        );
        print_points(&points, None);
    }
    Ok(())
}
