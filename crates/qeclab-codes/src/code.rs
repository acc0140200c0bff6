//! The contract shared by every code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qeclab_hal::Counts;
use qeclab_ir::Circuit;

use crate::decode::{DecodeTally, Decoded};
use crate::error::{CodeError, CodeResult};
use crate::logical::LogicalBit;
use crate::outcome::Outcome;
use crate::repetition::RepetitionCode3;
use crate::shor::ShorCode9;
use crate::steane::SteaneCode7;
use crate::surface::RotatedSurfaceCodeD3;

/// A small error-correcting code protecting one logical qubit.
///
/// # Contract
///
/// - Codes are immutable and hold no state between runs.
/// - `build_circuit()` returns a fresh circuit that encodes the logical bit
///   and ends by measuring every qubit the decoder reads. Noise is never
///   part of the circuit.
/// - `decode()` is total: every well-formed outcome yields a bit, falling
///   back to a parity vote when the syndrome is ambiguous.
pub trait QecCode: Send + Sync {
    /// Human-readable name of the code.
    fn name(&self) -> &str;

    /// Number of physical qubits, ancillas included.
    fn num_physical(&self) -> usize;

    /// Number of encoded qubits.
    fn num_logical(&self) -> usize {
        1
    }

    /// Width of the outcome bitstrings the decoder expects.
    fn num_clbits(&self) -> usize {
        self.num_physical()
    }

    /// Build the encoding and measurement circuit for `logical`.
    fn build_circuit(&self, logical: LogicalBit) -> CodeResult<Circuit>;

    /// Decode one shot.
    fn decode(&self, outcome: &Outcome) -> Decoded;

    /// Decode every bitstring of `counts` against `expected`.
    fn tally(&self, counts: &Counts, expected: LogicalBit) -> CodeResult<DecodeTally> {
        if counts.total_shots() == 0 {
            return Err(CodeError::EmptyHistogram);
        }

        let width = self.num_clbits();
        let mut tally = DecodeTally::default();
        for (bitstring, count) in counts.iter() {
            let outcome = Outcome::parse(bitstring, width)?;
            tally.record(&self.decode(&outcome), expected, count);
        }

        debug!(
            "{}: {} of {} shots wrong, {} via fallback",
            self.name(),
            tally.errors,
            tally.total,
            tally.fallbacks
        );
        Ok(tally)
    }

    /// Fraction of shots whose decoded bit differs from `expected`.
    fn logical_error_rate_from_counts(
        &self,
        counts: &Counts,
        expected: LogicalBit,
    ) -> CodeResult<f64> {
        Ok(self.tally(counts, expected)?.rate())
    }
}

/// The codes shipped with the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    /// [`RepetitionCode3`]
    Repetition,
    /// [`ShorCode9`]
    Shor,
    /// [`RotatedSurfaceCodeD3`]
    Surface,
    /// [`SteaneCode7`]
    Steane,
}

impl CodeKind {
    /// Every shipped code.
    pub const ALL: [CodeKind; 4] = [
        CodeKind::Repetition,
        CodeKind::Shor,
        CodeKind::Surface,
        CodeKind::Steane,
    ];

    /// Short identifier used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            CodeKind::Repetition => "repetition",
            CodeKind::Shor => "shor",
            CodeKind::Surface => "surface",
            CodeKind::Steane => "steane",
        }
    }

    /// Construct the code.
    pub fn build(self) -> Box<dyn QecCode> {
        match self {
            CodeKind::Repetition => Box::new(RepetitionCode3),
            CodeKind::Shor => Box::new(ShorCode9),
            CodeKind::Surface => Box::new(RotatedSurfaceCodeD3::new()),
            CodeKind::Steane => Box::new(SteaneCode7::new()),
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodeKind {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.name() == s).ok_or_else(|| {
            let available: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
            CodeError::InvalidInput(format!(
                "unknown code '{s}' (available: {})",
                available.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_kind_round_trip() {
        for kind in CodeKind::ALL {
            assert_eq!(kind.name().parse::<CodeKind>().unwrap(), kind);
            let code = kind.build();
            assert_eq!(code.num_logical(), 1);
            let circuit = code.build_circuit(LogicalBit::Zero).unwrap();
            assert_eq!(circuit.num_qubits(), code.num_physical());
            assert_eq!(circuit.num_clbits(), code.num_clbits());
        }
        assert!(matches!(
            "toric".parse::<CodeKind>(),
            Err(CodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_histogram() {
        for kind in CodeKind::ALL {
            let code = kind.build();
            let err = code
                .logical_error_rate_from_counts(&Counts::new(), LogicalBit::Zero)
                .unwrap_err();
            assert!(matches!(err, CodeError::EmptyHistogram));
        }
    }

    #[test]
    fn test_wrong_width_is_malformed() {
        let code = CodeKind::Repetition.build();
        let counts: Counts = [("0000", 4u64)].into_iter().collect();
        assert!(matches!(
            code.tally(&counts, LogicalBit::Zero),
            Err(CodeError::MalformedOutcome { expected: 3, .. })
        ));

        // Short keys never reach a decoder's bit lookups.
        for kind in CodeKind::ALL {
            let code = kind.build();
            let width = code.num_clbits();
            let counts: Counts = [("0".repeat(width - 1), 5u64)].into_iter().collect();
            let err = code.tally(&counts, LogicalBit::Zero).unwrap_err();
            assert!(
                matches!(err, CodeError::MalformedOutcome { expected, .. } if expected == width),
                "{kind}"
            );
            assert!(Outcome::parse("000", width).is_err());
        }
    }
}
