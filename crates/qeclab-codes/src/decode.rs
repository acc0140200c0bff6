//! Decoder verdicts and histogram tallies.

use serde::{Deserialize, Serialize};

use crate::logical::LogicalBit;

/// Which branch of a decoder produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePath {
    /// Plain majority vote, no syndrome involved.
    Majority,
    /// Syndrome lookup succeeded. Each field names the data qubit the
    /// lookup blamed, if any.
    Corrected {
        /// Qubit whose bit flip was undone before readout.
        x_flip: Option<usize>,
        /// Qubit the X-type syndrome blamed for a phase flip.
        z_flip: Option<usize>,
    },
    /// The syndrome could not be resolved and a parity vote decided.
    Fallback,
}

impl DecodePath {
    /// Whether the parity-vote branch was taken.
    pub fn is_fallback(&self) -> bool {
        matches!(self, DecodePath::Fallback)
    }
}

/// The decoded logical bit of one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Estimated logical bit.
    pub bit: LogicalBit,
    /// How it was obtained.
    pub path: DecodePath,
}

impl Decoded {
    /// Verdict of a majority decoder.
    pub fn majority(bit: bool) -> Self {
        Self {
            bit: LogicalBit::from_bool(bit),
            path: DecodePath::Majority,
        }
    }

    /// Verdict after a successful syndrome lookup.
    pub fn corrected(bit: bool, x_flip: Option<usize>, z_flip: Option<usize>) -> Self {
        Self {
            bit: LogicalBit::from_bool(bit),
            path: DecodePath::Corrected { x_flip, z_flip },
        }
    }

    /// Verdict of the parity-vote fallback.
    pub fn fallback(bit: bool) -> Self {
        Self {
            bit: LogicalBit::from_bool(bit),
            path: DecodePath::Fallback,
        }
    }
}

/// Shot counts accumulated while decoding a histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeTally {
    /// Shots whose decoded bit differed from the expected one.
    pub errors: u64,
    /// Shots decoded through [`DecodePath::Fallback`].
    pub fallbacks: u64,
    /// All shots in the histogram.
    pub total: u64,
}

impl DecodeTally {
    /// Add `count` shots with the given verdict.
    pub fn record(&mut self, decoded: &Decoded, expected: LogicalBit, count: u64) {
        self.total += count;
        if decoded.bit != expected {
            self.errors += count;
        }
        if decoded.path.is_fallback() {
            self.fallbacks += count;
        }
    }

    /// Fraction of shots decoded wrongly, 0 for an empty tally.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.errors as f64 / self.total as f64
        }
    }
}
