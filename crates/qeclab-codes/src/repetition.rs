//! Three-qubit bit-flip repetition code.

use qeclab_ir::Circuit;

use crate::code::QecCode;
use crate::decode::Decoded;
use crate::error::CodeResult;
use crate::logical::LogicalBit;
use crate::outcome::{Outcome, majority};

/// Encodes |b⟩ as |bbb⟩ and decodes by majority vote.
///
/// Protects against a single bit flip. Phase flips pass through unseen.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepetitionCode3;

impl QecCode for RepetitionCode3 {
    fn name(&self) -> &str {
        "3-qubit repetition code"
    }

    fn num_physical(&self) -> usize {
        3
    }

    fn build_circuit(&self, logical: LogicalBit) -> CodeResult<Circuit> {
        let mut circuit = Circuit::new("repetition3");
        let q = circuit.add_qreg("data", 3);
        circuit.add_creg("c", 3);

        if logical.is_one() {
            circuit.x(q[0])?;
        }
        circuit.cx(q[0], q[1])?.cx(q[0], q[2])?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    fn decode(&self, outcome: &Outcome) -> Decoded {
        Decoded::majority(majority(outcome.bits().iter().copied()))
    }
}
