//! Operations with their operands.

use serde::{Deserialize, Serialize};

use crate::gate::{ClassicalCondition, Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary, possibly conditional.
    Gate(Gate),
    /// Z-basis measurement; `qubits[i]` is written to `clbits[i]`.
    Measure,
    /// Return qubits to |0⟩.
    Reset,
    /// Scheduling fence with no effect on the state.
    Barrier,
}

/// One node of a circuit.
///
/// A conditional gate lists its condition register's bits in `clbits`, in
/// register order. The DAG uses those wires to order the gate after the
/// measurements that write them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// An unconditional gate.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// A gate guarded by `condition`, reading `register_bits`.
    pub fn conditional(
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
        condition: ClassicalCondition,
        register_bits: Vec<ClbitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Gate(Gate {
                kind: gate,
                condition: Some(condition),
            }),
            qubits: qubits.into_iter().collect(),
            clbits: register_bits,
        }
    }

    /// Measure `qubits[i]` into `clbits[i]`.
    ///
    /// Length agreement is checked when the instruction is applied.
    pub fn measure(qubits: Vec<QubitId>, clbits: Vec<ClbitId>) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        }
    }

    /// Reset `qubits`.
    pub fn reset(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::quantum_only(InstructionKind::Reset, qubits)
    }

    /// Fence `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::quantum_only(InstructionKind::Barrier, qubits)
    }

    fn quantum_only(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// The gate, for gate instructions.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    /// Display name: the gate name, or `measure`, `reset`, `barrier`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Instruction::gate(StandardGate::H, [QubitId(0)]).name(), "h");
        assert_eq!(Instruction::reset([QubitId(0)]).name(), "reset");
        assert_eq!(
            Instruction::measure(vec![QubitId(0)], vec![ClbitId(0)]).name(),
            "measure"
        );
    }

    #[test]
    fn test_conditional_reads_register_bits() {
        let inst = Instruction::conditional(
            StandardGate::X,
            [QubitId(1)],
            ClassicalCondition::new("syndrome", 3),
            vec![ClbitId(3), ClbitId(4)],
        );
        assert_eq!(inst.clbits, vec![ClbitId(3), ClbitId(4)]);
        assert!(inst.as_gate().is_some_and(Gate::is_conditional));
        assert!(!inst.is_measure());
    }
}
