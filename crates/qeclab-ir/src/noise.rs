//! Noise channel descriptors.
//!
//! A [`GateNoise`] is handed to an engine alongside a circuit. The engine
//! applies the one-qubit channel to every qubit a matching single-qubit gate
//! touches, and the two-qubit channel after each matching two-qubit gate.
//! Measurements and resets are never noisy.

use serde::{Deserialize, Serialize};

/// A single-qubit noise channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoiseModel {
    /// Bit-flip channel: applies X with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Depolarizing channel: with probability `p` the qubit is replaced by
    /// the maximally mixed state, i.e. I, X, Y or Z is applied uniformly.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Amplitude damping: energy relaxation from |1⟩ to |0⟩.
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },
}

/// Probabilities of applying each non-identity Pauli.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PauliWeights {
    /// Probability of X.
    pub x: f64,
    /// Probability of Y.
    pub y: f64,
    /// Probability of Z.
    pub z: f64,
}

impl PauliWeights {
    /// Total error probability.
    pub fn total(&self) -> f64 {
        self.x + self.y + self.z
    }
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::BitFlip { .. } => "bit_flip",
            NoiseModel::PhaseFlip { .. } => "phase_flip",
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::AmplitudeDamping { .. } => "amplitude_damping",
        }
    }

    /// Get the primary error parameter of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p }
            | NoiseModel::Depolarizing { p } => *p,
            NoiseModel::AmplitudeDamping { gamma } => *gamma,
        }
    }

    /// Pauli decomposition of the channel.
    ///
    /// Returns `None` for amplitude damping, which is not a Pauli channel.
    pub fn pauli_weights(&self) -> Option<PauliWeights> {
        match *self {
            NoiseModel::BitFlip { p } => Some(PauliWeights {
                x: p,
                ..PauliWeights::default()
            }),
            NoiseModel::PhaseFlip { p } => Some(PauliWeights {
                z: p,
                ..PauliWeights::default()
            }),
            NoiseModel::Depolarizing { p } => Some(PauliWeights {
                x: p / 4.0,
                y: p / 4.0,
                z: p / 4.0,
            }),
            NoiseModel::AmplitudeDamping { .. } => None,
        }
    }

    /// Whether the channel is the identity.
    pub fn is_noiseless(&self) -> bool {
        self.error_param() == 0.0
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
            other => write!(f, "{}(p={:.4})", other.name(), other.error_param()),
        }
    }
}

/// Noise applied after a two-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoQubitNoise {
    /// The single-qubit channel applied to each qubit independently.
    Independent(NoiseModel),
    /// Two-qubit depolarizing: with probability `p` a uniformly random
    /// two-qubit Pauli is applied, so each of the 15 non-identity Paulis
    /// occurs with probability `p / 16`.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },
}

impl TwoQubitNoise {
    /// Whether the channel is the identity.
    pub fn is_noiseless(&self) -> bool {
        match self {
            TwoQubitNoise::Independent(model) => model.is_noiseless(),
            TwoQubitNoise::Depolarizing { p } => *p == 0.0,
        }
    }
}

/// Gates that carry noise unless a [`GateNoise`] overrides the list.
pub const DEFAULT_NOISY_GATES: [&str; 7] = ["id", "x", "y", "z", "h", "sx", "cx"];

/// Noise attached to gates by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateNoise {
    /// Channel applied after matching single-qubit gates.
    pub one_qubit: Option<NoiseModel>,
    /// Channel applied after matching two-qubit gates.
    pub two_qubit: Option<TwoQubitNoise>,
    /// Names of the gates that are noisy.
    pub gates: Vec<String>,
}

impl GateNoise {
    /// No noise at all.
    pub fn noiseless() -> Self {
        Self {
            one_qubit: None,
            two_qubit: None,
            gates: vec![],
        }
    }

    /// Noise on the default gate list.
    pub fn new(one_qubit: NoiseModel, two_qubit: TwoQubitNoise) -> Self {
        Self {
            one_qubit: Some(one_qubit),
            two_qubit: Some(two_qubit),
            gates: DEFAULT_NOISY_GATES.iter().map(|g| (*g).to_string()).collect(),
        }
    }

    /// Replace the list of noisy gates.
    #[must_use]
    pub fn with_gates<I, S>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gates = gates.into_iter().map(Into::into).collect();
        self
    }

    /// Whether gates named `name` carry noise.
    pub fn applies_to(&self, name: &str) -> bool {
        self.gates.iter().any(|g| g == name)
    }

    /// Whether running under this noise is equivalent to running noiselessly.
    pub fn is_noiseless(&self) -> bool {
        self.gates.is_empty()
            || (self.one_qubit.is_none_or(|m| m.is_noiseless())
                && self.two_qubit.is_none_or(|m| m.is_noiseless()))
    }
}

impl Default for GateNoise {
    fn default() -> Self {
        Self::noiseless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depolarizing_weights() {
        let w = NoiseModel::Depolarizing { p: 0.2 }.pauli_weights().unwrap();
        assert!((w.x - 0.05).abs() < 1e-12);
        assert!((w.total() - 0.15).abs() < 1e-12);
        assert!(
            NoiseModel::AmplitudeDamping { gamma: 0.1 }
                .pauli_weights()
                .is_none()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(NoiseModel::BitFlip { p: 0.01 }.to_string(), "bit_flip(p=0.0100)");
        assert_eq!(
            NoiseModel::AmplitudeDamping { gamma: 0.5 }.to_string(),
            "amplitude_damping(γ=0.5000)"
        );
    }

    #[test]
    fn test_gate_noise_gate_list() {
        let model = NoiseModel::BitFlip { p: 0.1 };
        let noise = GateNoise::new(model, TwoQubitNoise::Independent(model));
        assert!(noise.applies_to("cx"));
        assert!(noise.applies_to("id"));
        assert!(!noise.applies_to("measure"));
        assert!(!noise.is_noiseless());

        let only_h = noise.clone().with_gates(["h"]);
        assert!(!only_h.applies_to("x"));
        assert!(GateNoise::noiseless().is_noiseless());
    }

    #[test]
    fn test_zero_strength_is_noiseless() {
        let noise = GateNoise::new(
            NoiseModel::Depolarizing { p: 0.0 },
            TwoQubitNoise::Depolarizing { p: 0.0 },
        );
        assert!(noise.is_noiseless());
    }
}
