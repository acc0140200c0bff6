//! Active correction on a three-qubit repetition code.
//!
//! Unlike the sweep codes, which decode after the fact, this circuit
//! measures its two parity checks mid-circuit and fixes the data with
//! classically conditioned X gates before the final readout:
//!
//! ```text
//!   data:     q0 q1 q2        encode |bbb⟩, optionally inject X
//!   syndrome: q3 = q0⊕q1      q4 = q1⊕q2
//!
//!   syndrome value (s0 + 2·s1) │ 0  │ 1  │ 2  │ 3
//!   corrected qubit            │ -  │ q0 │ q2 │ q1
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qeclab_codes::LogicalBit;
use qeclab_hal::{Backend, Counts};
use qeclab_ir::{Circuit, GateNoise};
use qeclab_noise::NoiseRegistry;

use crate::error::{SweepError, SweepResult};

/// Register holding the data readout.
pub const DATA_REGISTER: &str = "data";
/// Register holding the two parity checks.
pub const SYNDROME_REGISTER: &str = "syndrome";

/// Syndrome value to the data qubit it blames.
const CORRECTIONS: [(u64, usize); 3] = [(1, 0), (2, 2), (3, 1)];

/// Builds and runs the active-correction circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCorrectionDemo {
    logical_bit: LogicalBit,
    error_qubit: Option<usize>,
}

/// Result of one demo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveOutcome {
    /// Encoded basis state.
    pub logical_bit: LogicalBit,
    /// Data qubit that received the injected X, if any.
    pub error_qubit: Option<usize>,
    /// Shots executed.
    pub shots: u32,
    /// Shots whose data register read back the encoded word.
    pub successes: u64,
    /// `successes / shots`.
    pub success_rate: f64,
    /// Histogram of the data register alone.
    pub data_counts: Counts,
}

impl ActiveCorrectionDemo {
    /// Encode `logical_bit` and inject an X on data qubit 1.
    pub fn new(logical_bit: LogicalBit) -> Self {
        Self {
            logical_bit,
            error_qubit: Some(1),
        }
    }

    /// Choose where to inject the error. `None` runs without one.
    pub fn with_error_qubit(mut self, error_qubit: Option<usize>) -> SweepResult<Self> {
        if let Some(q) = error_qubit {
            if q > 2 {
                return Err(SweepError::InvalidInput(format!(
                    "error qubit must be 0, 1 or 2, got {q}"
                )));
            }
        }
        self.error_qubit = error_qubit;
        Ok(self)
    }

    /// Encoded basis state.
    pub fn logical_bit(&self) -> LogicalBit {
        self.logical_bit
    }

    /// Injected error position.
    pub fn error_qubit(&self) -> Option<usize> {
        self.error_qubit
    }

    /// Encode, inject, extract, correct, read out.
    pub fn build_circuit(&self) -> SweepResult<Circuit> {
        let mut circuit = Circuit::new("active_correction");
        let q = circuit.add_qreg("q", 5);
        let data = circuit.add_creg(DATA_REGISTER, 3);
        let syndrome = circuit.add_creg(SYNDROME_REGISTER, 2);

        if self.logical_bit.is_one() {
            circuit.x(q[0])?;
        }
        circuit.cx(q[0], q[1])?.cx(q[0], q[2])?;
        circuit.barrier(q[..3].iter().copied())?;

        if let Some(e) = self.error_qubit {
            circuit.x(q[e])?;
        }
        circuit.barrier(q.iter().copied())?;

        circuit
            .cx(q[0], q[3])?
            .cx(q[1], q[3])?
            .cx(q[1], q[4])?
            .cx(q[2], q[4])?;
        circuit.measure(q[3], syndrome[0])?.measure(q[4], syndrome[1])?;

        for (value, target) in CORRECTIONS {
            circuit.x_if(q[target], SYNDROME_REGISTER, value)?;
        }
        for (&qubit, &clbit) in q.iter().zip(&data) {
            circuit.measure(qubit, clbit)?;
        }
        Ok(circuit)
    }

    /// Run without noise.
    pub fn run(&self, backend: &dyn Backend, shots: u32) -> SweepResult<ActiveOutcome> {
        self.run_with_noise(backend, &GateNoise::noiseless(), 0.0, shots)
    }

    /// Run under a named noise channel.
    pub fn run_noisy(
        &self,
        backend: &dyn Backend,
        registry: &NoiseRegistry,
        noise_type: &str,
        strength: f64,
        shots: u32,
    ) -> SweepResult<ActiveOutcome> {
        let noise = registry.build(noise_type, strength)?;
        self.run_with_noise(backend, &noise, strength, shots)
    }

    #[instrument(skip(self, backend, noise), fields(logical = %self.logical_bit, error_qubit = ?self.error_qubit))]
    fn run_with_noise(
        &self,
        backend: &dyn Backend,
        noise: &GateNoise,
        strength: f64,
        shots: u32,
    ) -> SweepResult<ActiveOutcome> {
        if shots == 0 {
            return Err(SweepError::InvalidInput(
                "shots must be at least 1".to_string(),
            ));
        }

        let circuit = self.build_circuit()?;
        let result = backend
            .run(&circuit, noise, shots)
            .map_err(|source| SweepError::EngineExecution { strength, source })?;

        let mut data_counts = Counts::new();
        for (bitstring, count) in result.counts.iter() {
            // Clbits 0..3 are the data register.
            let data = bitstring.get(..3).ok_or_else(|| {
                SweepError::InvalidInput(format!("outcome '{bitstring}' is too short"))
            })?;
            data_counts.insert(data, count);
        }

        let ideal = self.logical_bit.to_string().repeat(3);
        let successes = data_counts.get(&ideal);
        let success_rate = successes as f64 / f64::from(shots);
        debug!("{} of {} shots read back {}", successes, shots, ideal);

        Ok(ActiveOutcome {
            logical_bit: self.logical_bit,
            error_qubit: self.error_qubit,
            shots,
            successes,
            success_rate,
            data_counts,
        })
    }
}
