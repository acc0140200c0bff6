//! Seven-qubit Steane code.

use qeclab_ir::{Circuit, QubitId};

use crate::code::QecCode;
use crate::decode::Decoded;
use crate::error::CodeResult;
use crate::logical::LogicalBit;
use crate::outcome::{Outcome, majority};

const NUM_DATA: usize = 7;
const ANC_X: usize = 7;
const ANC_Z: usize = 10;
const DATA: [usize; NUM_DATA] = [0, 1, 2, 3, 4, 5, 6];

/// Hamming checks. Check `k` covers the qubits whose one-based index has
/// bit `k` set, so a syndrome value `s` names qubit `s - 1`.
pub const HAMMING_CHECKS: [&[usize]; 3] = [&[0, 2, 4, 6], &[1, 2, 5, 6], &[3, 4, 5, 6]];

/// Weight-3 representatives of logical Z.
const LOGICAL_Z_REPS: [[usize; 3]; 7] = [
    [1, 3, 5],
    [0, 3, 4],
    [2, 3, 6],
    [0, 1, 2],
    [1, 4, 6],
    [0, 5, 6],
    [2, 4, 5],
];

/// Encoder CNOTs after the Hadamards on 0, 1 and 3.
const ENCODER: [(usize, usize); 9] = [
    (0, 2),
    (3, 5),
    (1, 6),
    (0, 4),
    (3, 6),
    (1, 5),
    (0, 6),
    (1, 2),
    (3, 4),
];

/// The [[7,1,3]] CSS code built from the Hamming code, with one round of
/// ancilla-based check extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteaneCode7;

impl SteaneCode7 {
    /// Create the code.
    pub fn new() -> Self {
        Self
    }

    fn extract_syndromes(circuit: &mut Circuit, q: &[QubitId]) -> CodeResult<()> {
        for (k, check) in HAMMING_CHECKS.iter().enumerate() {
            let anc = q[ANC_X + k];
            circuit.h(anc)?;
            for &d in *check {
                circuit.cx(anc, q[d])?;
            }
            circuit.h(anc)?;
        }
        for (k, check) in HAMMING_CHECKS.iter().enumerate() {
            let anc = q[ANC_Z + k];
            for &d in *check {
                circuit.cx(q[d], anc)?;
            }
        }
        Ok(())
    }
}

fn blamed(syndrome: usize) -> Option<usize> {
    syndrome.checked_sub(1)
}

impl QecCode for SteaneCode7 {
    fn name(&self) -> &str {
        "7-qubit Steane code"
    }

    fn num_physical(&self) -> usize {
        13
    }

    fn build_circuit(&self, logical: LogicalBit) -> CodeResult<Circuit> {
        let mut circuit = Circuit::new("steane7");
        let mut q = circuit.add_qreg("data", NUM_DATA as u32);
        q.extend(circuit.add_qreg("anc_x", 3));
        q.extend(circuit.add_qreg("anc_z", 3));
        circuit.add_creg("c", 13);

        for h in [0, 1, 3] {
            circuit.h(q[h])?;
        }
        for (c, t) in ENCODER {
            circuit.cx(q[c], q[t])?;
        }
        if logical.is_one() {
            for d in DATA {
                circuit.x(q[d])?;
            }
        }
        Self::extract_syndromes(&mut circuit, &q)?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    fn decode(&self, outcome: &Outcome) -> Decoded {
        let data_syndrome = outcome.syndrome(&HAMMING_CHECKS);
        let ancilla_syndrome = outcome.register_value(ANC_Z, 3);
        let z_flip = blamed(outcome.register_value(ANC_X, 3));

        if data_syndrome != 0 && ancilla_syndrome != 0 && data_syndrome != ancilla_syndrome {
            let votes = LOGICAL_Z_REPS.map(|rep| outcome.parity(&rep));
            return Decoded::fallback(majority(votes));
        }

        let x_flip = blamed(data_syndrome);
        // Any single flip changes the total parity, so correcting it is one XOR.
        let readout = outcome.parity(&DATA) ^ x_flip.is_some();
        Decoded::corrected(readout, x_flip, z_flip)
    }
}
