//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qeclab_adapter_sim::default_registry;
use qeclab_hal::{Backend, BackendConfig};
use qeclab_sweep::{PointProgress, SweepObserver, SweepPlan, SweepPoint, SweepReport};

/// Create a named engine, seeded when `seed` is given.
pub fn create_engine(name: &str, seed: Option<u64>) -> Result<Box<dyn Backend>> {
    let mut config = BackendConfig::new(name);
    if let Some(seed) = seed {
        config = config.with_extra("seed", serde_json::json!(seed));
    }
    default_registry()
        .create(name, config)
        .with_context(|| format!("Failed to create engine '{name}'"))
}

/// Validate an output format name.
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "table" | "json" => Ok(()),
        other => anyhow::bail!("Unknown output format: '{other}' (expected table or json)"),
    }
}

/// Write `contents` to `path`.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    println!(
        "{} Wrote {}",
        style("✓").green().bold(),
        style(path.display()).green()
    );
    Ok(())
}

/// Progress bar that also echoes each point's progress line.
#[derive(Default)]
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// An observer with no bar until the first sweep starts.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SweepObserver for ProgressObserver {
    fn on_start(&mut self, plan: &SweepPlan<'_>) {
        let bar = ProgressBar::new(plan.total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_message(format!("{} | {}", plan.label, plan.noise_type));
        self.bar = Some(bar);
    }

    fn on_point(&mut self, progress: &PointProgress<'_>) {
        match &self.bar {
            Some(bar) => {
                bar.println(progress.line());
                bar.inc(1);
            }
            None => eprintln!("{}", progress.line()),
        }
    }

    fn on_finish(&mut self, _points: &[SweepPoint]) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Print sweep points, with the baseline alongside when present.
pub fn print_points(points: &[SweepPoint], baseline: Option<&[SweepPoint]>) {
    println!(
        "  {:>10}  {:>12}  {:>12}  {:>8}  {:>9}",
        style("p").bold(),
        style("logical").bold(),
        style("physical").bold(),
        style("errors").bold(),
        style("fallbacks").bold()
    );

    for (i, point) in points.iter().enumerate() {
        let physical = baseline
            .and_then(|b| b.get(i))
            .map_or_else(|| "-".to_string(), |b| format!("{:.4}", b.logical_error_rate));
        let logical = format!("{:.4}", point.logical_error_rate);
        let below = baseline
            .and_then(|b| b.get(i))
            .is_some_and(|b| point.logical_error_rate < b.logical_error_rate);

        println!(
            "  {:>10.4}  {:>12}  {:>12}  {:>8}  {:>9}",
            point.strength,
            if below {
                style(logical).green()
            } else {
                style(logical).yellow()
            },
            physical,
            point.errors,
            point.fallbacks
        );
    }
}

/// Print a full sweep report as a table.
pub fn print_report(report: &SweepReport) {
    println!(
        "\n{} {} under {} ({} shots per point, |{}⟩, {})",
        style("✓").green().bold(),
        style(&report.code).cyan(),
        style(&report.noise_type).yellow(),
        report.shots,
        report.logical_bit,
        report.engine
    );
    print_points(&report.points, report.baseline.as_deref());

    if report.baseline.is_some() {
        match report.pseudo_threshold() {
            Some(threshold) => println!(
                "\n  Pseudo-threshold: {}",
                style(format!("{threshold:.4}")).cyan().bold()
            ),
            None => println!("\n  Pseudo-threshold: not crossed on this grid"),
        }
    }
    println!(
        "  Created: {}",
        style(report.created_at.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    );
}
