//! Nine-qubit Shor code.

use qeclab_ir::{Circuit, QubitId};

use crate::code::QecCode;
use crate::decode::Decoded;
use crate::error::CodeResult;
use crate::logical::LogicalBit;
use crate::outcome::{Outcome, majority};

/// First qubit of each bit-flip block.
const HEADS: [usize; 3] = [0, 3, 6];

/// Shor's concatenation of a phase-flip code over three bit-flip blocks.
///
/// The circuit encodes, unwinds the inner layer and refans the heads into
/// their blocks so a Z-basis readout of all nine qubits carries the logical
/// bit. A phase flip on a block during the encoded window lands as a flipped
/// block after the unwind, which the outer vote removes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorCode9;

fn fan_out_blocks(circuit: &mut Circuit, q: &[QubitId]) -> CodeResult<()> {
    for a in HEADS {
        circuit.cx(q[a], q[a + 1])?.cx(q[a], q[a + 2])?;
    }
    Ok(())
}

fn hadamard_heads(circuit: &mut Circuit, q: &[QubitId]) -> CodeResult<()> {
    for a in HEADS {
        circuit.h(q[a])?;
    }
    Ok(())
}

impl QecCode for ShorCode9 {
    fn name(&self) -> &str {
        "9-qubit Shor code"
    }

    fn num_physical(&self) -> usize {
        9
    }

    fn build_circuit(&self, logical: LogicalBit) -> CodeResult<Circuit> {
        let mut circuit = Circuit::new("shor9");
        let q = circuit.add_qreg("data", 9);
        circuit.add_creg("c", 9);

        if logical.is_one() {
            circuit.x(q[0])?;
        }
        circuit.cx(q[0], q[3])?.cx(q[0], q[6])?;
        hadamard_heads(&mut circuit, &q)?;
        fan_out_blocks(&mut circuit, &q)?;

        // Unwind the inner layer back onto the heads.
        fan_out_blocks(&mut circuit, &q)?;
        hadamard_heads(&mut circuit, &q)?;

        fan_out_blocks(&mut circuit, &q)?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    fn decode(&self, outcome: &Outcome) -> Decoded {
        let blocks = HEADS.map(|a| majority(outcome.bits()[a..a + 3].iter().copied()));
        Decoded::majority(majority(blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(s: &str) -> Outcome {
        Outcome::parse(s, 9).unwrap()
    }

    #[test]
    fn test_one_flip_per_block() {
        let decoded = ShorCode9.decode(&outcome("100010001"));
        assert_eq!(decoded.bit, LogicalBit::Zero);
    }

    #[test]
    fn test_whole_block_flipped() {
        assert_eq!(ShorCode9.decode(&outcome("111000000")).bit, LogicalBit::Zero);
        assert_eq!(ShorCode9.decode(&outcome("111111000")).bit, LogicalBit::One);
    }

    #[test]
    fn test_circuit_shape() {
        let circuit = ShorCode9.build_circuit(LogicalBit::One).unwrap();
        assert_eq!(circuit.num_qubits(), 9);
        // x, 2 outer cx, 6 h, 18 block cx, 1 measure
        assert_eq!(circuit.dag().num_ops(), 28);
    }
}
