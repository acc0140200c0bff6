//! Builders for the supported noise channels.
//!
//! Each builder takes a single strength and returns a [`GateNoise`] that an
//! engine applies after every default noisy gate. Strengths outside [0, 1],
//! NaN included, are rejected rather than clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use qeclab_ir::{GateNoise, NoiseModel, TwoQubitNoise};

use crate::error::{NoiseError, NoiseResult};

/// The noise channels that ship with the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseType {
    /// X with probability `p`.
    BitFlip,
    /// Z with probability `p`.
    PhaseFlip,
    /// Uniform Pauli with probability `p`.
    Depolarizing,
    /// Relaxation with rate `gamma`.
    AmplitudeDamping,
}

impl NoiseType {
    /// Every built-in channel.
    pub const ALL: [NoiseType; 4] = [
        NoiseType::BitFlip,
        NoiseType::PhaseFlip,
        NoiseType::Depolarizing,
        NoiseType::AmplitudeDamping,
    ];

    /// Registry name of the channel.
    pub fn name(self) -> &'static str {
        match self {
            NoiseType::BitFlip => "bit_flip",
            NoiseType::PhaseFlip => "phase_flip",
            NoiseType::Depolarizing => "depolarizing",
            NoiseType::AmplitudeDamping => "amplitude_damping",
        }
    }

    /// Name of the strength parameter.
    pub fn param_name(self) -> &'static str {
        match self {
            NoiseType::AmplitudeDamping => "gamma",
            _ => "p",
        }
    }

    /// Build the channel at `strength`.
    pub fn build(self, strength: f64) -> NoiseResult<GateNoise> {
        match self {
            NoiseType::BitFlip => bit_flip(strength),
            NoiseType::PhaseFlip => phase_flip(strength),
            NoiseType::Depolarizing => depolarizing(strength),
            NoiseType::AmplitudeDamping => amplitude_damping(strength),
        }
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseType {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| NoiseError::UnknownNoiseType {
                name: s.to_string(),
                available: Self::ALL.iter().map(|t| t.name().to_string()).collect(),
            })
    }
}

fn check_range(noise_type: NoiseType, value: f64) -> NoiseResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(NoiseError::InvalidParameter {
            noise_type: noise_type.name().to_string(),
            param: noise_type.param_name(),
            value,
        })
    }
}

/// Bit-flip noise on every one- and two-qubit gate.
pub fn bit_flip(p: f64) -> NoiseResult<GateNoise> {
    let p = check_range(NoiseType::BitFlip, p)?;
    let model = NoiseModel::BitFlip { p };
    Ok(GateNoise::new(model, TwoQubitNoise::Independent(model)))
}

/// Phase-flip noise on every one- and two-qubit gate.
pub fn phase_flip(p: f64) -> NoiseResult<GateNoise> {
    let p = check_range(NoiseType::PhaseFlip, p)?;
    let model = NoiseModel::PhaseFlip { p };
    Ok(GateNoise::new(model, TwoQubitNoise::Independent(model)))
}

/// Depolarizing noise: one-qubit depolarizing after single-qubit gates and
/// true two-qubit depolarizing after `cx`.
pub fn depolarizing(p: f64) -> NoiseResult<GateNoise> {
    let p = check_range(NoiseType::Depolarizing, p)?;
    Ok(GateNoise::new(
        NoiseModel::Depolarizing { p },
        TwoQubitNoise::Depolarizing { p },
    ))
}

/// Amplitude damping on every qubit a noisy gate touches.
pub fn amplitude_damping(gamma: f64) -> NoiseResult<GateNoise> {
    let gamma = check_range(NoiseType::AmplitudeDamping, gamma)?;
    let model = NoiseModel::AmplitudeDamping { gamma };
    Ok(GateNoise::new(model, TwoQubitNoise::Independent(model)))
}
