//! Progress side channel for sweeps.
//!
//! Observers see each point after it is computed. They cannot change the
//! result.

use tracing::info;

use crate::result::SweepPoint;

/// What a sweep is about to do.
#[derive(Debug, Clone, Copy)]
pub struct SweepPlan<'a> {
    /// Code name, or `"physical qubit"` for a baseline.
    pub label: &'a str,
    /// Noise type name.
    pub noise_type: &'a str,
    /// Number of points.
    pub total: usize,
    /// Shots per point.
    pub shots: u32,
}

/// A point that just finished.
#[derive(Debug, Clone, Copy)]
pub struct PointProgress<'a> {
    /// Code name, or `"physical qubit"` for a baseline.
    pub label: &'a str,
    /// Noise type name.
    pub noise_type: &'a str,
    /// Zero-based position in the grid.
    pub index: usize,
    /// Number of points in the grid.
    pub total: usize,
    /// The computed point.
    pub point: &'a SweepPoint,
}

impl PointProgress<'_> {
    /// The one-line progress report, e.g.
    /// `[3-qubit repetition code | noise=bit_flip] p=0.0100, logical error=0.0003`.
    pub fn line(&self) -> String {
        format!(
            "[{} | noise={}] p={:.4}, logical error={:.4}",
            self.label, self.noise_type, self.point.strength, self.point.logical_error_rate
        )
    }
}

/// Receives progress while a sweep runs.
pub trait SweepObserver {
    /// Called once before the first point.
    fn on_start(&mut self, _plan: &SweepPlan<'_>) {}

    /// Called after every point.
    fn on_point(&mut self, progress: &PointProgress<'_>);

    /// Called once after the last point.
    fn on_finish(&mut self, _points: &[SweepPoint]) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SweepObserver for NullObserver {
    fn on_point(&mut self, _progress: &PointProgress<'_>) {}
}

/// Logs one `info!` line per point.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SweepObserver for TracingObserver {
    fn on_point(&mut self, progress: &PointProgress<'_>) {
        info!("{}", progress.line());
    }
}

impl<F> SweepObserver for F
where
    F: FnMut(&PointProgress<'_>),
{
    fn on_point(&mut self, progress: &PointProgress<'_>) {
        self(progress)
    }
}
