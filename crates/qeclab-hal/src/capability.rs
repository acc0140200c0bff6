//! What an engine can run.
//!
//! [`Capabilities::check`] lets a backend turn a circuit away before any
//! shots are spent on it.

use serde::{Deserialize, Serialize};

use qeclab_ir::{Circuit, InstructionKind, StandardGate};

use crate::backend::ValidationResult;

/// Limits and feature flags advertised by one engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub name: String,
    /// Widest circuit accepted.
    pub num_qubits: u32,
    pub gate_set: GateSet,
    /// Upper bound on shots per run.
    pub max_shots: u32,
    /// Additional capability flags: `"statevector"`, `"stabilizer"`,
    /// `"mid_circuit_measurement"`, `"dynamic_circuits"`,
    /// `"exact_amplitude_damping"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of the dense statevector engine.
    pub fn statevector(num_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            num_qubits,
            gate_set: GateSet::clifford(),
            max_shots: 1_000_000,
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "dynamic_circuits".into(),
                "exact_amplitude_damping".into(),
            ],
        }
    }

    /// Capabilities of the stabilizer tableau engine.
    pub fn stabilizer(num_qubits: u32) -> Self {
        Self {
            name: "stabilizer".into(),
            num_qubits,
            gate_set: GateSet::clifford(),
            max_shots: 1_000_000,
            features: vec![
                "stabilizer".into(),
                "mid_circuit_measurement".into(),
                "dynamic_circuits".into(),
            ],
        }
    }

    /// Whether the engine advertises `feature`.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Check a circuit against qubit count and gate support.
    pub fn check(&self, circuit: &Circuit) -> ValidationResult {
        let mut reasons = vec![];

        if circuit.num_qubits() > self.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits, {} supports at most {}",
                circuit.num_qubits(),
                self.name,
                self.num_qubits
            ));
        }

        for inst in circuit.dag().topological_ops() {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if !self.gate_set.contains(gate.name()) {
                    reasons.push(format!("gate '{}' is not supported", gate.name()));
                }
                if gate.is_conditional() && !self.has_feature("dynamic_circuits") {
                    reasons.push(format!(
                        "conditional '{}' needs dynamic circuits",
                        gate.name()
                    ));
                }
            }
        }

        reasons.dedup();
        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }
}

/// Gate names an engine accepts, split by arity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    pub single_qubit: Vec<String>,
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the circuit IR can express.
    pub fn clifford() -> Self {
        let names = |arity: u32| {
            StandardGate::ALL
                .iter()
                .filter(|g| g.num_qubits() == arity)
                .map(|g| g.name().to_string())
                .collect()
        };
        Self {
            single_qubit: names(1),
            two_qubit: names(2),
        }
    }

    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qeclab_ir::QubitId;

    #[test]
    fn test_clifford_gate_set() {
        let gates = GateSet::clifford();
        assert_eq!(gates.single_qubit.len(), 8);
        assert_eq!(gates.two_qubit, vec!["cx", "cz"]);
        assert!(gates.contains("sdg"));
        assert!(!gates.contains("t"));
    }

    #[test]
    fn test_check_rejects_wide_circuit() {
        let caps = Capabilities::statevector(2);
        let mut circuit = Circuit::with_size("wide", 3, 0);
        circuit.h(QubitId(2)).unwrap();

        match caps.check(&circuit) {
            ValidationResult::Invalid { reasons } => assert_eq!(reasons.len(), 1),
            ValidationResult::Valid => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_check_accepts_feedback() {
        let caps = Capabilities::stabilizer(64);
        let mut circuit = Circuit::new("feedback");
        let q = circuit.add_qreg("q", 2);
        let s = circuit.add_creg("s", 1);
        circuit
            .measure(q[1], s[0])
            .unwrap()
            .x_if(q[0], "s", 1)
            .unwrap();

        assert!(caps.check(&circuit).is_valid());
    }
}
