//! The interface shared by the simulation states.

use rand::Rng;
use rand::rngs::SmallRng;

use qeclab_ir::StandardGate;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Pauli with index 0..4 in the order I, X, Y, Z.
    pub(crate) fn from_index(index: u32) -> Self {
        match index & 3 {
            0 => Pauli::I,
            1 => Pauli::X,
            2 => Pauli::Y,
            _ => Pauli::Z,
        }
    }

    /// Draw X, Y or Z with the given probabilities, identity otherwise.
    pub(crate) fn sample(x: f64, y: f64, z: f64, rng: &mut SmallRng) -> Self {
        let r: f64 = rng.r#gen();
        if r < x {
            Pauli::X
        } else if r < x + y {
            Pauli::Y
        } else if r < x + y + z {
            Pauli::Z
        } else {
            Pauli::I
        }
    }
}

/// A quantum state that the shot executor can drive.
///
/// Qubit indices are assumed valid; the executor only passes indices of
/// qubits the circuit declares.
pub(crate) trait SimState {
    /// Apply a unitary gate.
    fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]);

    /// Measure `qubit` in the Z basis, collapsing the state.
    fn measure(&mut self, qubit: usize, rng: &mut SmallRng) -> bool;

    /// One draw of the amplitude-damping channel on `qubit`.
    fn amplitude_damp(&mut self, qubit: usize, gamma: f64, rng: &mut SmallRng);

    /// Apply a Pauli error.
    fn apply_pauli(&mut self, qubit: usize, pauli: Pauli) {
        let gate = match pauli {
            Pauli::I => return,
            Pauli::X => StandardGate::X,
            Pauli::Y => StandardGate::Y,
            Pauli::Z => StandardGate::Z,
        };
        self.apply_gate(gate, &[qubit]);
    }

    /// Reset `qubit` to |0⟩.
    fn reset(&mut self, qubit: usize, rng: &mut SmallRng) {
        if self.measure(qubit, rng) {
            self.apply_gate(StandardGate::X, &[qubit]);
        }
    }
}
