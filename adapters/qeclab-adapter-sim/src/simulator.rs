//! The `statevector` engine.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, instrument};

use qeclab_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, ExecutionResult, HalError, HalResult,
};
use qeclab_ir::{Circuit, GateNoise};

use crate::executor::{rng_from_config, run_shots, sample_final_state};
use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Dense-amplitude engine.
///
/// Amplitude damping runs as an exact quantum-jump trajectory, so this is
/// the engine to cross-check the stabilizer engine against. Memory is
/// 2^n amplitudes; `max_qubits` defaults to 20.
pub struct StatevectorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    rng: Mutex<SmallRng>,
}

impl StatevectorBackend {
    pub fn new() -> Self {
        Self::build(
            BackendConfig::new("statevector"),
            DEFAULT_MAX_QUBITS,
            SmallRng::from_entropy(),
        )
    }

    /// Same stream of outcomes for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            BackendConfig::new("statevector"),
            DEFAULT_MAX_QUBITS,
            SmallRng::seed_from_u64(seed),
        )
    }

    fn build(config: BackendConfig, max_qubits: u32, rng: SmallRng) -> Self {
        Self {
            config,
            capabilities: Capabilities::statevector(max_qubits),
            rng: Mutex::new(rng),
        }
    }
}

impl Default for StatevectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for StatevectorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit, noise), fields(qubits = circuit.num_qubits()))]
    fn execute(
        &self,
        circuit: &Circuit,
        noise: &GateNoise,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let width = circuit.num_qubits();
        let limit = self.capabilities.num_qubits;
        if width > limit as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "{width} qubits need 2^{width} amplitudes, limit is {limit} qubits"
            )));
        }

        let started = Instant::now();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let counts = if let Some(counts) = sample_final_state(circuit, noise, shots, &mut rng)? {
            counts
        } else {
            run_shots(circuit, noise, shots, &mut rng, || Statevector::new(width))?
        };

        let elapsed = started.elapsed();
        debug!(?elapsed, "statevector run finished");
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl BackendFactory for StatevectorBackend {
    /// Options: `seed`, and `max_qubits` (clamped to `u32`).
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
            None => DEFAULT_MAX_QUBITS,
        };
        let rng = rng_from_config(&config)?;
        Ok(Self::build(config, max_qubits, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qeclab_ir::{NoiseModel, QubitId, TwoQubitNoise};

    #[test]
    fn test_default_limits() {
        let backend = StatevectorBackend::new();
        assert_eq!(backend.name(), "statevector");
        assert_eq!(backend.capabilities().num_qubits, 20);
        assert!(backend.capabilities().has_feature("exact_amplitude_damping"));
    }

    #[test]
    fn test_bell_pairs_agree() {
        let backend = StatevectorBackend::with_seed(2);
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();

        let counts = backend
            .run(&circuit, &GateNoise::noiseless(), 1000)
            .unwrap()
            .counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 400);
    }

    #[test]
    fn test_amplitude_damping_rate() {
        // |1⟩ then one damped identity: decays with probability gamma.
        let backend = StatevectorBackend::with_seed(8);
        let mut circuit = Circuit::with_size("t1", 1, 1);
        circuit.x(QubitId(0)).unwrap().measure_all().unwrap();

        let model = NoiseModel::AmplitudeDamping { gamma: 0.25 };
        let noise = GateNoise::new(model, TwoQubitNoise::Independent(model));
        let result = backend.run(&circuit, &noise, 8000).unwrap();

        let decayed = result.counts.get("0") as f64 / 8000.0;
        assert!((decayed - 0.25).abs() < 0.03, "decayed = {decayed}");
    }

    #[test]
    fn test_configured_width_limit() {
        let config = BackendConfig::new("statevector").with_extra("max_qubits", serde_json::json!(5));
        let backend = StatevectorBackend::from_config(config).unwrap();
        let circuit = Circuit::with_size("wide", 10, 0);
        assert!(matches!(
            backend.run(&circuit, &GateNoise::noiseless(), 100),
            Err(HalError::CircuitTooLarge(_))
        ));
        // execute() guards on its own too.
        assert!(matches!(
            backend.execute(&circuit, &GateNoise::noiseless(), 100),
            Err(HalError::CircuitTooLarge(_))
        ));
    }
}
