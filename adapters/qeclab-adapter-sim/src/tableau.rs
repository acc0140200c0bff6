//! Stabilizer tableau (CHP) simulation state.
//!
//! Rows `0..n` are destabilizers, rows `n..2n` are stabilizers and row `2n`
//! is scratch space for deterministic measurements. Each row stores its X
//! and Z parts as bitmasks over qubits plus a sign bit.

use rand::Rng;
use rand::rngs::SmallRng;

use qeclab_ir::StandardGate;

use crate::state::{Pauli, SimState};

/// Largest register a tableau row bitmask can hold.
pub(crate) const MAX_QUBITS: usize = 64;

#[inline]
fn bit(word: u64, q: usize) -> bool {
    (word >> q) & 1 == 1
}

/// Phase exponent contributed when multiplying Pauli (x1,z1) into (x2,z2).
#[inline]
fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => i32::from(z2) - i32::from(x2),
        (true, false) => i32::from(z2) * (2 * i32::from(x2) - 1),
        (false, true) => i32::from(x2) * (1 - 2 * i32::from(z2)),
    }
}

/// A stabilizer state on up to [`MAX_QUBITS`] qubits.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    n: usize,
    x: Vec<u64>,
    z: Vec<u64>,
    r: Vec<bool>,
}

impl Tableau {
    /// The all-zero state |0...0⟩.
    pub(crate) fn new(num_qubits: usize) -> Self {
        let rows = 2 * num_qubits + 1;
        let mut x = vec![0u64; rows];
        let mut z = vec![0u64; rows];
        for i in 0..num_qubits {
            x[i] = 1 << i;
            z[num_qubits + i] = 1 << i;
        }
        Self {
            n: num_qubits,
            x,
            z,
            r: vec![false; rows],
        }
    }

    fn hadamard(&mut self, a: usize) {
        let m = 1u64 << a;
        for i in 0..2 * self.n {
            let (xa, za) = (self.x[i] & m != 0, self.z[i] & m != 0);
            self.r[i] ^= xa && za;
            if xa != za {
                self.x[i] ^= m;
                self.z[i] ^= m;
            }
        }
    }

    fn phase(&mut self, a: usize) {
        let m = 1u64 << a;
        for i in 0..2 * self.n {
            let (xa, za) = (self.x[i] & m != 0, self.z[i] & m != 0);
            self.r[i] ^= xa && za;
            if xa {
                self.z[i] ^= m;
            }
        }
    }

    fn cnot(&mut self, a: usize, b: usize) {
        let (ma, mb) = (1u64 << a, 1u64 << b);
        for i in 0..2 * self.n {
            let (xa, za) = (self.x[i] & ma != 0, self.z[i] & ma != 0);
            let (xb, zb) = (self.x[i] & mb != 0, self.z[i] & mb != 0);
            self.r[i] ^= xa && zb && (xb == za);
            if xa {
                self.x[i] ^= mb;
            }
            if zb {
                self.z[i] ^= ma;
            }
        }
    }

    /// Conjugate by a Pauli: rows that anticommute with it flip sign.
    fn pauli(&mut self, a: usize, p: Pauli) {
        for i in 0..2 * self.n {
            let (xa, za) = (bit(self.x[i], a), bit(self.z[i], a));
            self.r[i] ^= match p {
                Pauli::I => false,
                Pauli::X => za,
                Pauli::Y => xa ^ za,
                Pauli::Z => xa,
            };
        }
    }

    /// Left-multiply row `h` by row `i`.
    fn rowsum(&mut self, h: usize, i: usize) {
        let mut sum = 2 * i32::from(self.r[h]) + 2 * i32::from(self.r[i]);
        for j in 0..self.n {
            sum += g(
                bit(self.x[i], j),
                bit(self.z[i], j),
                bit(self.x[h], j),
                bit(self.z[h], j),
            );
        }
        self.r[h] = sum.rem_euclid(4) == 2;
        self.x[h] ^= self.x[i];
        self.z[h] ^= self.z[i];
    }

    /// A stabilizer row that anticommutes with Z on `a`, if any.
    fn random_pivot(&self, a: usize) -> Option<usize> {
        (self.n..2 * self.n).find(|&p| bit(self.x[p], a))
    }

    fn deterministic_outcome(&mut self, a: usize) -> bool {
        let s = 2 * self.n;
        self.x[s] = 0;
        self.z[s] = 0;
        self.r[s] = false;
        for i in 0..self.n {
            if bit(self.x[i], a) {
                self.rowsum(s, i + self.n);
            }
        }
        self.r[s]
    }

    /// The Z-basis outcome on `a` if it is deterministic.
    pub(crate) fn peek_z(&mut self, a: usize) -> Option<bool> {
        if self.random_pivot(a).is_some() {
            None
        } else {
            Some(self.deterministic_outcome(a))
        }
    }
}

impl SimState for Tableau {
    fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.pauli(qubits[0], Pauli::X),
            StandardGate::Y => self.pauli(qubits[0], Pauli::Y),
            StandardGate::Z => self.pauli(qubits[0], Pauli::Z),
            StandardGate::H => self.hadamard(qubits[0]),
            StandardGate::S => self.phase(qubits[0]),
            StandardGate::Sdg => {
                self.phase(qubits[0]);
                self.pauli(qubits[0], Pauli::Z);
            }
            StandardGate::SX => {
                self.hadamard(qubits[0]);
                self.phase(qubits[0]);
                self.hadamard(qubits[0]);
            }
            StandardGate::CX => self.cnot(qubits[0], qubits[1]),
            StandardGate::CZ => {
                self.hadamard(qubits[1]);
                self.cnot(qubits[0], qubits[1]);
                self.hadamard(qubits[1]);
            }
        }
    }

    fn apply_pauli(&mut self, qubit: usize, pauli: Pauli) {
        self.pauli(qubit, pauli);
    }

    fn measure(&mut self, a: usize, rng: &mut SmallRng) -> bool {
        let Some(p) = self.random_pivot(a) else {
            return self.deterministic_outcome(a);
        };

        for i in 0..2 * self.n {
            if i != p && bit(self.x[i], a) {
                self.rowsum(i, p);
            }
        }
        let d = p - self.n;
        self.x[d] = self.x[p];
        self.z[d] = self.z[p];
        self.r[d] = self.r[p];

        let outcome: bool = rng.r#gen();
        self.x[p] = 0;
        self.z[p] = 1 << a;
        self.r[p] = outcome;
        outcome
    }

    /// Exact when the qubit sits in a Z eigenstate. Otherwise the channel is
    /// replaced by its Pauli twirl, the closest stabilizer channel.
    fn amplitude_damp(&mut self, a: usize, gamma: f64, rng: &mut SmallRng) {
        match self.peek_z(a) {
            Some(false) => {}
            Some(true) => {
                if rng.r#gen::<f64>() < gamma {
                    self.pauli(a, Pauli::X);
                }
            }
            None => {
                let pxy = gamma / 4.0;
                let pz = (2.0 - gamma - 2.0 * (1.0 - gamma).sqrt()) / 4.0;
                let p = Pauli::sample(pxy, pxy, pz, rng);
                self.pauli(a, p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    #[test]
    fn test_initial_state_measures_zero() {
        let mut t = Tableau::new(3);
        let mut rng = rng();
        for q in 0..3 {
            assert_eq!(t.peek_z(q), Some(false));
            assert!(!t.measure(q, &mut rng));
        }
    }

    #[test]
    fn test_pauli_gates() {
        let mut rng = rng();
        for gate in [StandardGate::X, StandardGate::Y] {
            let mut t = Tableau::new(1);
            t.apply_gate(gate, &[0]);
            assert!(t.measure(0, &mut rng), "{gate:?} should flip |0>");
        }
        let mut t = Tableau::new(1);
        t.apply_gate(StandardGate::Z, &[0]);
        assert!(!t.measure(0, &mut rng));
    }

    #[test]
    fn test_clifford_identities() {
        let mut rng = rng();

        // H S S H = X
        let mut t = Tableau::new(1);
        for g in [StandardGate::H, StandardGate::S, StandardGate::S, StandardGate::H] {
            t.apply_gate(g, &[0]);
        }
        assert_eq!(t.peek_z(0), Some(true));

        // SX SX = X
        let mut t = Tableau::new(1);
        t.apply_gate(StandardGate::SX, &[0]);
        assert_eq!(t.peek_z(0), None);
        t.apply_gate(StandardGate::SX, &[0]);
        assert!(t.measure(0, &mut rng));

        // H S Sdg H = I
        let mut t = Tableau::new(1);
        for g in [StandardGate::H, StandardGate::S, StandardGate::Sdg, StandardGate::H] {
            t.apply_gate(g, &[0]);
        }
        assert_eq!(t.peek_z(0), Some(false));
    }

    #[test]
    fn test_cz_kicks_phase() {
        let mut t = Tableau::new(2);
        t.apply_gate(StandardGate::X, &[0]);
        t.apply_gate(StandardGate::H, &[1]);
        t.apply_gate(StandardGate::CZ, &[0, 1]);
        t.apply_gate(StandardGate::H, &[1]);
        assert_eq!(t.peek_z(1), Some(true));
    }

    #[test]
    fn test_bell_pair_correlated() {
        let mut rng = rng();
        let mut ones = 0;
        for _ in 0..200 {
            let mut t = Tableau::new(2);
            t.apply_gate(StandardGate::H, &[0]);
            t.apply_gate(StandardGate::CX, &[0, 1]);
            assert_eq!(t.peek_z(0), None);
            let a = t.measure(0, &mut rng);
            assert_eq!(t.peek_z(1), Some(a));
            assert_eq!(t.measure(1, &mut rng), a);
            ones += usize::from(a);
        }
        assert!(ones > 50 && ones < 150, "ones = {ones}");
    }

    #[test]
    fn test_reset_after_flip() {
        let mut rng = rng();
        let mut t = Tableau::new(2);
        t.apply_gate(StandardGate::H, &[0]);
        t.apply_gate(StandardGate::CX, &[0, 1]);
        t.reset(1, &mut rng);
        assert_eq!(t.peek_z(1), Some(false));
    }

    #[test]
    fn test_full_damping_relaxes_excited_state() {
        let mut rng = rng();
        let mut t = Tableau::new(1);
        t.apply_gate(StandardGate::X, &[0]);
        t.amplitude_damp(0, 1.0, &mut rng);
        assert_eq!(t.peek_z(0), Some(false));

        t.amplitude_damp(0, 1.0, &mut rng);
        assert_eq!(t.peek_z(0), Some(false));
    }
}
