//! Sweep command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::info;

use qeclab_codes::{CodeKind, LogicalBit};
use qeclab_sweep::{SweepConfig, SweepRunner};

use super::common::{ProgressObserver, check_format, create_engine, print_report, write_output};

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Code to sweep (repetition, shor, surface, steane)
    #[arg(long)]
    pub code: Option<CodeKind>,

    /// Noise channel (bit_flip, phase_flip, depolarizing, amplitude_damping)
    #[arg(short, long)]
    pub noise: Option<String>,

    /// Comma-separated noise strengths
    #[arg(long, value_delimiter = ',')]
    pub ps: Option<Vec<f64>>,

    /// Shots per strength
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Encoded basis state (0 or 1)
    #[arg(short, long)]
    pub logical: Option<LogicalBit>,

    /// Engine seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Engine (stabilizer, statevector)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Also measure the unencoded single-qubit baseline
    #[arg(long)]
    pub baseline: bool,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SweepArgs {
    /// Command-line flags win over file and environment values.
    fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if let Some(code) = self.code {
            config.code = code;
        }
        if let Some(noise) = &self.noise {
            config.noise.clone_from(noise);
        }
        if let Some(ps) = &self.ps {
            config.ps.clone_from(ps);
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(logical) = self.logical {
            config.logical_bit = logical;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(engine) = &self.engine {
            config.engine.clone_from(engine);
        }
        config.baseline |= self.baseline;
        config
    }
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs) -> Result<()> {
    check_format(&args.format)?;

    let config = SweepConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(config);
    config.validate().context("Invalid sweep configuration")?;
    info!("Sweep configuration: {:?}", config);

    let engine = create_engine(&config.engine, config.seed)?;

    println!(
        "{} {} under {} on {} ({} strengths, {} shots each)",
        style("→").cyan().bold(),
        style(config.code).cyan(),
        style(&config.noise).yellow(),
        style(engine.name()).green(),
        config.ps.len(),
        config.shots
    );

    let report = SweepRunner::new(engine.as_ref())
        .with_observer(ProgressObserver::new())
        .run_config(&config)?;

    let json = report.to_json().context("Failed to serialize report")?;
    if args.format == "json" {
        println!("{json}");
    } else {
        print_report(&report);
    }

    if let Some(path) = &args.output {
        write_output(path, &json)?;
    }
    Ok(())
}
