//! Gate kinds and classical conditions.

use serde::{Deserialize, Serialize};

/// The Clifford gates that encoders, syndrome extraction and corrections use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity. Engines treat it as an idle slot that still picks up noise.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// Phase, sqrt(Z).
    S,
    /// Inverse phase.
    Sdg,
    /// sqrt(X).
    SX,
    /// CNOT, control first.
    CX,
    /// Controlled-Z.
    CZ,
}

impl StandardGate {
    /// Every gate, in declaration order.
    pub const ALL: [StandardGate; 10] = [
        StandardGate::I,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::Sdg,
        StandardGate::SX,
        StandardGate::CX,
        StandardGate::CZ,
    ];

    /// Lower-case gate name. Noise attachment matches on this.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::SX => "sx",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Arity.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        if self.is_two_qubit() { 2 } else { 1 }
    }

    /// Whether the gate acts on a pair.
    #[inline]
    pub fn is_two_qubit(self) -> bool {
        matches!(self, StandardGate::CX | StandardGate::CZ)
    }
}

/// Fire only when a classical register holds `value`.
///
/// The register is read as an unsigned integer with its member 0 as the
/// least significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// Register name.
    pub register: String,
    /// Value that enables the gate.
    pub value: u64,
}

impl ClassicalCondition {
    pub fn new(register: impl Into<String>, value: u64) -> Self {
        Self {
            register: register.into(),
            value,
        }
    }
}

/// A gate, possibly guarded by a classical condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Which unitary.
    pub kind: StandardGate,
    /// Guard; `None` means the gate always fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Name of the underlying unitary.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Arity of the underlying unitary.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Whether execution depends on a classical register.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate {
            kind,
            condition: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        let pairs: Vec<_> = StandardGate::ALL
            .into_iter()
            .filter(|g| g.num_qubits() == 2)
            .map(StandardGate::name)
            .collect();
        assert_eq!(pairs, vec!["cx", "cz"]);
        assert_eq!(StandardGate::I.name(), "id");
    }

    #[test]
    fn test_conditional_gate() {
        let plain = Gate::from(StandardGate::X);
        assert!(!plain.is_conditional());

        let fix = Gate {
            condition: Some(ClassicalCondition::new("syndrome", 0b11)),
            ..plain
        };
        assert!(fix.is_conditional());
        assert_eq!(fix.name(), "x");
    }
}
