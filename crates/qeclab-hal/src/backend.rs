//! The engine seam.
//!
//! Codes build circuits; engines sample them. Everything in between goes
//! through [`Backend`]:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ execute() ──→ Counts
//!                      └──────────── run() ───────────┘
//! ```
//!
//! Execution is synchronous. A sweep calls `run()` once per grid point and
//! waits for the histogram before moving on.

use serde::{Deserialize, Serialize};

use qeclab_ir::{Circuit, GateNoise};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Name plus free-form settings used to construct an engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    /// Engine-specific settings such as `seed` or `max_qubits`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set one engine-specific option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer setting.
    ///
    /// Returns `Ok(None)` when the key is absent and a configuration error
    /// when it holds anything other than a non-negative integer.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

/// A shot-based sampler of noisy circuits.
///
/// Implementors provide `execute()`. Its histogram must hold exactly `shots`
/// outcomes, and noise may only follow gates named in [`GateNoise::gates`]
/// (measurement and reset stay ideal). Callers normally go through `run()`,
/// which checks shots and capabilities first and the histogram total after.
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// Fixed when the engine is built.
    fn capabilities(&self) -> &Capabilities;

    /// Compare `circuit` against [`Backend::capabilities`].
    fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(self.capabilities().check(circuit))
    }

    /// Execute `circuit` for `shots` repetitions under `noise`.
    fn execute(
        &self,
        circuit: &Circuit,
        noise: &GateNoise,
        shots: u32,
    ) -> HalResult<ExecutionResult>;

    /// Checked `execute()`.
    fn run(
        &self,
        circuit: &Circuit,
        noise: &GateNoise,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let max_shots = self.capabilities().max_shots;
        if shots == 0 || shots > max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (must be between 1 and {max_shots})"
            )));
        }

        if let ValidationResult::Invalid { reasons } = self.validate(circuit)? {
            if circuit.num_qubits() > self.capabilities().num_qubits as usize {
                return Err(HalError::CircuitTooLarge(reasons.join("; ")));
            }
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let result = self.execute(circuit, noise, shots)?;
        let total = result.counts.total_shots();
        if total != u64::from(shots) {
            return Err(HalError::Simulation(format!(
                "{} returned {total} outcomes for {shots} shots",
                self.name()
            )));
        }
        Ok(result)
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    /// Every limit the circuit breaks, one message each.
    Invalid {
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Construction from a [`BackendConfig`], used by the registry.
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
