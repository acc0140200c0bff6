//! Dense amplitudes, used by the `statevector` engine and by the
//! noiseless sampling shortcut.
//!
//! Bit `q` of an amplitude's index is the basis value of qubit `q`.

use num_complex::Complex64;
use rand::Rng;
use rand::rngs::SmallRng;

use qeclab_ir::StandardGate;

use crate::state::SimState;

type Matrix2 = [[Complex64; 2]; 2];

const fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

const ZERO: Complex64 = c(0.0, 0.0);
const ONE: Complex64 = c(1.0, 0.0);
const R: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Row-major unitary of a single-qubit gate. `None` for identity and
/// two-qubit gates.
fn one_qubit_matrix(gate: StandardGate) -> Option<Matrix2> {
    let m = match gate {
        StandardGate::X => [[ZERO, ONE], [ONE, ZERO]],
        StandardGate::Y => [[ZERO, c(0.0, -1.0)], [c(0.0, 1.0), ZERO]],
        StandardGate::Z => [[ONE, ZERO], [ZERO, c(-1.0, 0.0)]],
        StandardGate::H => [[c(R, 0.0), c(R, 0.0)], [c(R, 0.0), c(-R, 0.0)]],
        StandardGate::S => [[ONE, ZERO], [ZERO, c(0.0, 1.0)]],
        StandardGate::Sdg => [[ONE, ZERO], [ZERO, c(0.0, -1.0)]],
        StandardGate::SX => [[c(0.5, 0.5), c(0.5, -0.5)], [c(0.5, -0.5), c(0.5, 0.5)]],
        StandardGate::I | StandardGate::CX | StandardGate::CZ => return None,
    };
    Some(m)
}

/// Index pairs `(lo, hi)` that differ only in bit `qubit`, `lo` having it
/// clear.
fn pairs(len: usize, qubit: usize) -> impl Iterator<Item = (usize, usize)> {
    let bit = 1usize << qubit;
    (0..len).filter(move |i| i & bit == 0).map(move |i| (i, i | bit))
}

#[derive(Debug, Clone)]
pub(crate) struct Statevector {
    amps: Vec<Complex64>,
}

impl Statevector {
    /// |0...0⟩ on `num_qubits` qubits.
    pub(crate) fn new(num_qubits: usize) -> Self {
        let mut amps = vec![ZERO; 1 << num_qubits];
        amps[0] = ONE;
        Self { amps }
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.amps.len().trailing_zeros() as usize
    }

    fn apply_matrix(&mut self, qubit: usize, m: &Matrix2) {
        for (lo, hi) in pairs(self.amps.len(), qubit) {
            let (a, b) = (self.amps[lo], self.amps[hi]);
            self.amps[lo] = m[0][0] * a + m[0][1] * b;
            self.amps[hi] = m[1][0] * a + m[1][1] * b;
        }
    }

    fn weight_of_one(&self, qubit: usize) -> f64 {
        pairs(self.amps.len(), qubit)
            .map(|(_, hi)| self.amps[hi].norm_sqr())
            .sum()
    }

    fn renormalize(&mut self) {
        let norm: f64 = self.amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        if norm > 0.0 {
            self.amps.iter_mut().for_each(|a| *a /= norm);
        }
    }

    /// Draw one basis index from the Born distribution, leaving the state
    /// untouched.
    pub(crate) fn sample(&self, rng: &mut SmallRng) -> usize {
        let target: f64 = rng.r#gen();
        let mut acc = 0.0;
        self.amps
            .iter()
            .position(|a| {
                acc += a.norm_sqr();
                target < acc
            })
            // Rounding may leave the total a hair under 1.
            .or_else(|| self.amps.iter().rposition(|a| a.norm_sqr() > 0.0))
            .unwrap_or(0)
    }
}

impl SimState for Statevector {
    fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::CX => {
                let control = 1usize << qubits[0];
                for (lo, hi) in pairs(self.amps.len(), qubits[1]) {
                    if lo & control != 0 {
                        self.amps.swap(lo, hi);
                    }
                }
            }
            StandardGate::CZ => {
                let both = (1usize << qubits[0]) | (1usize << qubits[1]);
                for (i, a) in self.amps.iter_mut().enumerate() {
                    if i & both == both {
                        *a = -*a;
                    }
                }
            }
            single => {
                if let Some(m) = one_qubit_matrix(single) {
                    self.apply_matrix(qubits[0], &m);
                }
            }
        }
    }

    fn measure(&mut self, qubit: usize, rng: &mut SmallRng) -> bool {
        let one = rng.r#gen::<f64>() < self.weight_of_one(qubit);
        for (lo, hi) in pairs(self.amps.len(), qubit) {
            let discarded = if one { lo } else { hi };
            self.amps[discarded] = ZERO;
        }
        self.renormalize();
        one
    }

    /// Kraus operators K0 = diag(1, √(1-γ)) and K1 = √γ |0⟩⟨1|; the jump
    /// happens with probability γ·P(1).
    fn amplitude_damp(&mut self, qubit: usize, gamma: f64, rng: &mut SmallRng) {
        let jump = rng.r#gen::<f64>() < gamma * self.weight_of_one(qubit);
        let keep = (1.0 - gamma).sqrt();
        for (lo, hi) in pairs(self.amps.len(), qubit) {
            if jump {
                self.amps[lo] = self.amps[hi];
                self.amps[hi] = ZERO;
            } else {
                self.amps[hi] *= keep;
            }
        }
        self.renormalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn close(a: Complex64, re: f64, im: f64) -> bool {
        (a - c(re, im)).norm() < 1e-10
    }

    #[test]
    fn test_fresh_state_is_all_zero() {
        let sv = Statevector::new(3);
        assert_eq!(sv.num_qubits(), 3);
        assert!(close(sv.amps[0], 1.0, 0.0));
        assert!(sv.amps[1..].iter().all(|a| close(*a, 0.0, 0.0)));
    }

    #[test]
    fn test_ghz_amplitudes() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::CX, &[0, 1]);
        sv.apply_gate(StandardGate::CX, &[1, 2]);

        assert!(close(sv.amps[0b000], R, 0.0));
        assert!(close(sv.amps[0b111], R, 0.0));
        assert!((sv.weight_of_one(2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_phase_gates_compose() {
        // S·S = Z, and H Z H = X.
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::S, &[0]);
        sv.apply_gate(StandardGate::S, &[0]);
        sv.apply_gate(StandardGate::H, &[0]);
        assert!(close(sv.amps[1], 1.0, 0.0));

        sv.apply_gate(StandardGate::SX, &[0]);
        sv.apply_gate(StandardGate::SX, &[0]);
        assert!(close(sv.amps[0], 1.0, 0.0));
    }

    #[test]
    fn test_y_on_zero() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::Y, &[0]);
        assert!(close(sv.amps[1], 0.0, 1.0));
    }

    #[test]
    fn test_cz_marks_only_eleven() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::H, &[1]);
        sv.apply_gate(StandardGate::CZ, &[0, 1]);
        assert!(close(sv.amps[0b11], -0.5, 0.0));
        assert!(close(sv.amps[0b01], 0.5, 0.0));
    }

    #[test]
    fn test_measurement_collapses_partner() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::CX, &[0, 1]);

        let first = sv.measure(0, &mut rng);
        let expected = if first { 1.0 } else { 0.0 };
        assert!((sv.weight_of_one(1) - expected).abs() < 1e-12);
        assert_eq!(sv.measure(1, &mut rng), first);
    }

    #[test]
    fn test_damping_endpoints() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::X, &[0]);

        sv.amplitude_damp(0, 0.0, &mut rng);
        assert!((sv.weight_of_one(0) - 1.0).abs() < 1e-12);

        sv.amplitude_damp(0, 1.0, &mut rng);
        assert!(sv.weight_of_one(0) < 1e-12);
    }

    #[test]
    fn test_sampling_a_basis_state() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut sv = Statevector::new(3);
        sv.apply_gate(StandardGate::X, &[2]);
        assert!((0..50).all(|_| sv.sample(&mut rng) == 0b100));
    }
}
