//! Sweep points and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qeclab_codes::{DecodeTally, LogicalBit};

/// One strength of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Noise strength, `p` or `gamma`.
    pub strength: f64,
    /// Fraction of shots decoded to the wrong bit.
    pub logical_error_rate: f64,
    /// Shots executed.
    pub shots: u32,
    /// Shots decoded to the wrong bit.
    pub errors: u64,
    /// Shots decoded through the parity-vote fallback.
    pub fallbacks: u64,
}

impl SweepPoint {
    /// Summarise a decoded histogram.
    pub fn from_tally(strength: f64, shots: u32, tally: &DecodeTally) -> Self {
        Self {
            strength,
            logical_error_rate: tally.rate(),
            shots,
            errors: tally.errors,
            fallbacks: tally.fallbacks,
        }
    }
}

/// A finished sweep with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Code name.
    pub code: String,
    /// Noise type name.
    pub noise_type: String,
    /// Encoded basis state.
    pub logical_bit: LogicalBit,
    /// Engine that ran the circuits.
    pub engine: String,
    /// Shots per point.
    pub shots: u32,
    /// Engine seed, if one was fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Encoded results, in input order.
    pub points: Vec<SweepPoint>,
    /// Unencoded single-qubit results on the same grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Vec<SweepPoint>>,
}

impl SweepReport {
    /// Create a report stamped with the current time.
    pub fn new(
        code: impl Into<String>,
        noise_type: impl Into<String>,
        logical_bit: LogicalBit,
        engine: impl Into<String>,
        shots: u32,
        points: Vec<SweepPoint>,
    ) -> Self {
        Self {
            code: code.into(),
            noise_type: noise_type.into(),
            logical_bit,
            engine: engine.into(),
            shots,
            seed: None,
            created_at: Utc::now(),
            points,
            baseline: None,
        }
    }

    /// Attach the engine seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Attach a physical baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: Vec<SweepPoint>) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Strength at which the logical rate first catches up with the
    /// baseline, interpolated linearly between neighbouring points.
    ///
    /// Points are taken in input order. Returns `None` without a baseline
    /// on the same grid, or when the logical rate never crosses it from
    /// below.
    pub fn pseudo_threshold(&self) -> Option<f64> {
        let baseline = self.baseline.as_ref()?;
        if baseline.len() != self.points.len() {
            return None;
        }

        let gaps: Vec<(f64, f64)> = self
            .points
            .iter()
            .zip(baseline)
            .map(|(logical, physical)| {
                (
                    logical.strength,
                    logical.logical_error_rate - physical.logical_error_rate,
                )
            })
            .collect();

        gaps.windows(2).find_map(|w| {
            let ((p0, d0), (p1, d1)) = (w[0], w[1]);
            (d0 < 0.0 && d1 >= 0.0).then(|| p0 + (p1 - p0) * (-d0) / (d1 - d0))
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
