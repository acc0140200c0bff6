//! Distance-3 rotated surface code.
//!
//! Data qubits sit on a 3x3 grid, row major:
//!
//! ```text
//!   0 ─ 1 ─ 2
//!   │   │   │
//!   3 ─ 4 ─ 5
//!   │   │   │
//!   6 ─ 7 ─ 8
//! ```
//!
//! Qubits 9..13 are X-type ancillas and 13..17 are Z-type ancillas, in the
//! order of [`X_CHECKS`] and [`Z_CHECKS`]. Logical Z is any row, logical X
//! any column.

use qeclab_ir::{Circuit, QubitId};

use crate::code::QecCode;
use crate::decode::Decoded;
use crate::error::CodeResult;
use crate::logical::LogicalBit;
use crate::outcome::{Outcome, majority};

const NUM_DATA: usize = 9;
const ANC_X: usize = 9;
const ANC_Z: usize = 13;

/// Z-type stabilizers; they detect bit flips.
pub const Z_CHECKS: [&[usize]; 4] = [&[0, 1, 3, 4], &[4, 5, 7, 8], &[3, 6], &[2, 5]];

/// X-type stabilizers; they detect phase flips.
pub const X_CHECKS: [&[usize]; 4] = [&[1, 2, 4, 5], &[3, 4, 6, 7], &[0, 1], &[7, 8]];

const ROWS: [&[usize]; 3] = [&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]];
const LOGICAL_X: [usize; 3] = [0, 3, 6];

/// Syndrome to data qubit for every single-qubit error the checks see.
///
/// Qubits sharing a syndrome differ by a stabilizer, so the first one wins.
fn single_error_table(checks: &[&[usize]; 4]) -> [Option<usize>; 16] {
    let mut table = [None; 16];
    for q in 0..NUM_DATA {
        let syndrome = checks
            .iter()
            .enumerate()
            .filter(|(_, check)| check.contains(&q))
            .fold(0, |acc, (k, _)| acc | (1 << k));
        if table[syndrome].is_none() {
            table[syndrome] = Some(q);
        }
    }
    table
}

/// The smallest rotated surface code, with one round of ancilla-based
/// stabilizer extraction and a lookup-table decoder.
#[derive(Debug, Clone)]
pub struct RotatedSurfaceCodeD3 {
    x_errors: [Option<usize>; 16],
    z_errors: [Option<usize>; 16],
}

impl RotatedSurfaceCodeD3 {
    /// Build the code and its lookup tables.
    pub fn new() -> Self {
        Self {
            x_errors: single_error_table(&Z_CHECKS),
            z_errors: single_error_table(&X_CHECKS),
        }
    }

    /// Data qubit blamed for the bit-flip syndrome `syndrome`, if any.
    pub fn lookup_x_error(&self, syndrome: usize) -> Option<usize> {
        self.x_errors.get(syndrome).copied().flatten()
    }

    /// Data qubit blamed for the phase-flip syndrome `syndrome`, if any.
    pub fn lookup_z_error(&self, syndrome: usize) -> Option<usize> {
        self.z_errors.get(syndrome).copied().flatten()
    }

    fn encode_zero(circuit: &mut Circuit, q: &[QubitId]) -> CodeResult<()> {
        circuit.h(q[0])?.cx(q[0], q[1])?;
        circuit.h(q[8])?.cx(q[8], q[7])?;
        circuit
            .h(q[2])?
            .cx(q[2], q[1])?
            .cx(q[2], q[4])?
            .cx(q[2], q[5])?;
        circuit
            .h(q[6])?
            .cx(q[6], q[3])?
            .cx(q[6], q[4])?
            .cx(q[6], q[7])?;
        Ok(())
    }

    fn extract_syndromes(circuit: &mut Circuit, q: &[QubitId]) -> CodeResult<()> {
        for (k, check) in X_CHECKS.iter().enumerate() {
            let anc = q[ANC_X + k];
            circuit.h(anc)?;
            for &d in *check {
                circuit.cx(anc, q[d])?;
            }
            circuit.h(anc)?;
        }
        for (k, check) in Z_CHECKS.iter().enumerate() {
            let anc = q[ANC_Z + k];
            for &d in *check {
                circuit.cx(q[d], anc)?;
            }
        }
        Ok(())
    }
}

impl Default for RotatedSurfaceCodeD3 {
    fn default() -> Self {
        Self::new()
    }
}

impl QecCode for RotatedSurfaceCodeD3 {
    fn name(&self) -> &str {
        "d=3 rotated surface code"
    }

    fn num_physical(&self) -> usize {
        17
    }

    fn build_circuit(&self, logical: LogicalBit) -> CodeResult<Circuit> {
        let mut circuit = Circuit::new("rotated_surface_d3");
        let mut q = circuit.add_qreg("data", NUM_DATA as u32);
        q.extend(circuit.add_qreg("anc_x", 4));
        q.extend(circuit.add_qreg("anc_z", 4));
        circuit.add_creg("c", 17);

        Self::encode_zero(&mut circuit, &q)?;
        if logical.is_one() {
            for d in LOGICAL_X {
                circuit.x(q[d])?;
            }
        }
        Self::extract_syndromes(&mut circuit, &q)?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    fn decode(&self, outcome: &Outcome) -> Decoded {
        let data_syndrome = outcome.syndrome(&Z_CHECKS);
        let ancilla_syndrome = outcome.register_value(ANC_Z, 4);
        let z_flip = self.lookup_z_error(outcome.register_value(ANC_X, 4));

        let conflicting =
            data_syndrome != 0 && ancilla_syndrome != 0 && data_syndrome != ancilla_syndrome;
        let readout = outcome.parity(ROWS[0]);

        if !conflicting {
            if data_syndrome == 0 {
                return Decoded::corrected(readout, None, z_flip);
            }
            if let Some(q) = self.lookup_x_error(data_syndrome) {
                return Decoded::corrected(readout ^ ROWS[0].contains(&q), Some(q), z_flip);
            }
        }
        Decoded::fallback(majority(ROWS.map(|row| outcome.parity(row))))
    }
}
