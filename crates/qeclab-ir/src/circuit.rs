//! Fluent circuit builder.

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{ClassicalCondition, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId, Register};

/// A circuit: named registers over a [`CircuitDag`].
///
/// Builder methods validate their operands and return `&mut Self`, so calls
/// chain with `?`.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qregs: Vec<Register>,
    cregs: Vec<Register>,
    dag: CircuitDag,
}

impl Circuit {
    /// An empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: Vec::new(),
            cregs: Vec::new(),
            dag: CircuitDag::new(),
        }
    }

    /// A circuit with one register `q` of `num_qubits` and one register `c`
    /// of `num_clbits`. Zero-sized registers are skipped.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Append a quantum register and return its qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let ids: Vec<_> = (0..size).map(|_| self.dag.add_qubit()).collect();
        self.qregs.push(Register {
            name: name.into(),
            start: ids.first().map_or(self.dag.num_qubits() as u32, |q| q.0),
            size,
        });
        ids
    }

    /// Append a classical register and return its bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let ids: Vec<_> = (0..size).map(|_| self.dag.add_clbit()).collect();
        self.cregs.push(Register {
            name: name.into(),
            start: ids.first().map_or(self.dag.num_clbits() as u32, |c| c.0),
            size,
        });
        ids
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply `gate` to `qubits`.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Identity: an idle slot that still picks up gate noise.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::I, [qubit])
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply `gate` only when classical register `register` reads `value`.
    pub fn gate_if(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
        register: &str,
        value: u64,
    ) -> IrResult<&mut Self> {
        let bits = self.register_clbits(register);
        if bits.is_empty() {
            return Err(IrError::RegisterNotFound(register.to_string()));
        }
        if bits.len() < 64 && value >> bits.len() != 0 {
            return Err(IrError::ConditionOutOfRange {
                register: register.to_string(),
                width: bits.len(),
                value,
            });
        }

        self.dag.apply(Instruction::conditional(
            gate,
            qubits,
            ClassicalCondition::new(register, value),
            bits,
        ))?;
        Ok(self)
    }

    /// Flip `qubit` when `register` reads `value`.
    pub fn x_if(&mut self, qubit: QubitId, register: &str, value: u64) -> IrResult<&mut Self> {
        self.gate_if(StandardGate::X, [qubit], register, value)
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::measure(vec![qubit], vec![clbit]))?;
        Ok(self)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit.
    ///
    /// When there are fewer classical bits than qubits, the missing ones are
    /// added as a register named `meas`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let n = self.dag.num_qubits();
        let missing = n.saturating_sub(self.dag.num_clbits());
        if missing > 0 {
            self.add_creg("meas", missing as u32);
        }

        let qubits = (0..n as u32).map(QubitId).collect();
        let clbits = (0..n as u32).map(ClbitId).collect();
        self.dag.apply(Instruction::measure(qubits, clbits))?;
        Ok(self)
    }

    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::reset([qubit]))?;
        Ok(self)
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.dag.num_qubits()
    }

    pub fn num_clbits(&self) -> usize {
        self.dag.num_clbits()
    }

    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Quantum registers in allocation order.
    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    /// Classical registers in allocation order.
    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    /// Bits of the named classical register, member 0 first. Empty when no
    /// such register exists.
    pub fn register_clbits(&self, name: &str) -> Vec<ClbitId> {
        self.cregs
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.span().map(ClbitId).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_are_contiguous() {
        let mut circuit = Circuit::new("layout");
        let data = circuit.add_qreg("data", 3);
        let anc = circuit.add_qreg("anc", 2);
        circuit.add_creg("data", 3);
        let syndrome = circuit.add_creg("syndrome", 2);

        assert_eq!(data, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(anc, vec![QubitId(3), QubitId(4)]);
        assert_eq!(circuit.register_clbits("syndrome"), syndrome);
        assert_eq!(syndrome, vec![ClbitId(3), ClbitId(4)]);
        assert!(circuit.register_clbits("missing").is_empty());
        assert_eq!(circuit.qregs()[1].span(), 3..5);
    }

    #[test]
    fn test_measure_all_adds_missing_bits() {
        let mut circuit = Circuit::with_size("pad", 3, 1);
        circuit.h(QubitId(0)).unwrap().measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.cregs()[1].name, "meas");
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_unknown_qubit() {
        let mut circuit = Circuit::with_size("small", 1, 0);
        assert!(matches!(
            circuit.cx(QubitId(0), QubitId(4)),
            Err(IrError::UnknownQubit { op: "cx", .. })
        ));
    }

    #[test]
    fn test_conditional_x() {
        let mut circuit = Circuit::new("feedback");
        let q = circuit.add_qreg("q", 2);
        let s = circuit.add_creg("syndrome", 2);
        circuit
            .measure(q[1], s[0])
            .unwrap()
            .x_if(q[0], "syndrome", 0b01)
            .unwrap()
            .reset(q[1])
            .unwrap();

        let ops = circuit.dag().topological_ops();
        let gate = ops[1].as_gate().unwrap();
        assert_eq!(gate.condition.as_ref().unwrap().value, 1);
        assert_eq!(ops[1].clbits, s);
        assert_eq!(ops[2].name(), "reset");
    }

    #[test]
    fn test_conditional_rejects_bad_register() {
        let mut circuit = Circuit::new("feedback");
        let q = circuit.add_qreg("q", 1);
        circuit.add_creg("syndrome", 2);

        assert!(matches!(
            circuit.x_if(q[0], "flags", 1),
            Err(IrError::RegisterNotFound(_))
        ));
        assert!(matches!(
            circuit.x_if(q[0], "syndrome", 4),
            Err(IrError::ConditionOutOfRange { width: 2, .. })
        ));
    }
}
