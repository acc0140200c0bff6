//! The `stabilizer` engine.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, instrument};

use qeclab_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, ExecutionResult, HalError, HalResult,
};
use qeclab_ir::{Circuit, GateNoise};

use crate::executor::{rng_from_config, run_shots};
use crate::tableau::{MAX_QUBITS, Tableau};

/// Tableau engine for Clifford circuits with mid-circuit measurement and
/// feedback, polynomial in the qubit count. Pauli channels are exact; amplitude
/// damping is exact on Z eigenstates and Pauli-twirled elsewhere.
pub struct StabilizerBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    rng: Mutex<SmallRng>,
}

impl StabilizerBackend {
    pub fn new() -> Self {
        Self::build(BackendConfig::new("stabilizer"), MAX_QUBITS as u32, SmallRng::from_entropy())
    }

    /// Same stream of outcomes for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            BackendConfig::new("stabilizer"),
            MAX_QUBITS as u32,
            SmallRng::seed_from_u64(seed),
        )
    }

    fn build(config: BackendConfig, max_qubits: u32, rng: SmallRng) -> Self {
        Self {
            config,
            capabilities: Capabilities::stabilizer(max_qubits),
            rng: Mutex::new(rng),
        }
    }
}

impl Default for StabilizerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for StabilizerBackend {
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
        if width > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "{width} qubits, tableau holds {}",
                self.capabilities.num_qubits
            )));
        }

        let started = Instant::now();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let counts = run_shots(circuit, noise, shots, &mut rng, || Tableau::new(width))?;

        let elapsed = started.elapsed();
        debug!(?elapsed, "stabilizer run finished");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl BackendFactory for StabilizerBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config.extra_u64("max_qubits")?.unwrap_or(MAX_QUBITS as u64);
        if max_qubits == 0 || max_qubits > MAX_QUBITS as u64 {
            return Err(HalError::Configuration(format!(
                "max_qubits must be between 1 and {MAX_QUBITS}, got {max_qubits}"
            )));
        }

        let rng = rng_from_config(&config)?;
        Ok(Self::build(config, max_qubits as u32, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qeclab_ir::{NoiseModel, QubitId, TwoQubitNoise};

    fn ghz(n: u32) -> Circuit {
        let mut circuit = Circuit::with_size("ghz", n, n);
        circuit.h(QubitId(0)).unwrap();
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
        }
        circuit.measure_all().unwrap();
        circuit
    }

    #[test]
    fn test_stabilizer_capabilities() {
        let backend = StabilizerBackend::new();
        let caps = backend.capabilities();
        assert_eq!(caps.num_qubits, 64);
        assert!(caps.has_feature("stabilizer"));
    }

    #[test]
    fn test_ghz_state() {
        let backend = StabilizerBackend::with_seed(1);
        let result = backend
            .run(&ghz(17), &GateNoise::noiseless(), 1000)
            .unwrap();

        let zeros = "0".repeat(17);
        let ones = "1".repeat(17);
        assert_eq!(result.shots, 1000);
        assert_eq!(result.counts.get(&zeros) + result.counts.get(&ones), 1000);
    }

    #[test]
    fn test_seed_reproducible() {
        let model = NoiseModel::Depolarizing { p: 0.2 };
        let noise = GateNoise::new(model, TwoQubitNoise::Depolarizing { p: 0.2 });

        let a = StabilizerBackend::with_seed(42)
            .run(&ghz(3), &noise, 500)
            .unwrap();
        let b = StabilizerBackend::with_seed(42)
            .run(&ghz(3), &noise, 500)
            .unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("stabilizer")
            .with_extra("seed", serde_json::json!(9))
            .with_extra("max_qubits", serde_json::json!(5));
        let backend = StabilizerBackend::from_config(config).unwrap();
        assert_eq!(backend.capabilities().num_qubits, 5);

        let result = backend.run(&ghz(6), &GateNoise::noiseless(), 10);
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

        let too_wide = BackendConfig::new("stabilizer").with_extra("max_qubits", serde_json::json!(65));
        assert!(StabilizerBackend::from_config(too_wide).is_err());
    }
}
