//! Active command implementation.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde_json::json;

use qeclab_codes::LogicalBit;
use qeclab_noise::NoiseRegistry;
use qeclab_sweep::ActiveCorrectionDemo;

use super::common::{check_format, create_engine};

#[derive(Args, Debug)]
pub struct ActiveArgs {
    /// Data qubit (0, 1 or 2) that receives the injected X
    #[arg(long, default_value_t = 1, conflicts_with = "no_error")]
    pub error_qubit: usize,

    /// Run without injecting an error
    #[arg(long)]
    pub no_error: bool,

    /// Encoded basis state (0 or 1)
    #[arg(short, long, default_value = "0")]
    pub logical: LogicalBit,

    /// Number of shots
    #[arg(short, long, default_value_t = 1024)]
    pub shots: u32,

    /// Engine seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Engine (stabilizer, statevector)
    #[arg(short, long, default_value = "stabilizer")]
    pub engine: String,

    /// Optional background noise channel
    #[arg(short, long)]
    pub noise: Option<String>,

    /// Strength of the background noise
    #[arg(long, default_value_t = 0.0, requires = "noise")]
    pub strength: f64,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Execute the active command.
pub fn execute(args: ActiveArgs) -> Result<()> {
    check_format(&args.format)?;

    let error_qubit = (!args.no_error).then_some(args.error_qubit);
    let demo = ActiveCorrectionDemo::new(args.logical).with_error_qubit(error_qubit)?;
    let engine = create_engine(&args.engine, args.seed)?;

    let outcome = match &args.noise {
        Some(noise) => demo.run_noisy(
            engine.as_ref(),
            &NoiseRegistry::with_defaults(),
            noise,
            args.strength,
            args.shots,
        )?,
        None => demo.run(engine.as_ref(), args.shots)?,
    };

    if args.format == "json" {
        let value = json!({
            "engine": engine.name(),
            "noise_type": args.noise,
            "strength": args.strength,
            "outcome": outcome,
        });
        let text = serde_json::to_string_pretty(&value).context("Failed to serialize outcome")?;
        println!("{text}");
        return Ok(());
    }

    let injected = match outcome.error_qubit {
        Some(q) => format!("X on data qubit {q}"),
        None => "no error".to_string(),
    };
    println!(
        "\n{} Active correction of |{}⟩ with {} on {}",
        style("✓").green().bold(),
        outcome.logical_bit,
        injected,
        style(engine.name()).green()
    );
    println!("  {:>8}  {:>8}", style("data").bold(), style("count").bold());
    for (bits, count) in outcome.data_counts.sorted() {
        println!("  {bits:>8}  {count:>8}");
    }

    let rate = format!("{:.2}%", outcome.success_rate * 100.0);
    println!(
        "\n  Recovered: {} ({}/{})",
        if outcome.successes == u64::from(outcome.shots) {
            style(rate).green().bold()
        } else {
            style(rate).yellow().bold()
        },
        outcome.successes,
        outcome.shots
    );
    Ok(())
}
