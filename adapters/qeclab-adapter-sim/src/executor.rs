//! Shot loop shared by both engines.
//!
//! Each shot starts from |0...0⟩ and walks the circuit in topological order.
//! After every gate whose name is in [`GateNoise::gates`] the matching
//! channel is drawn once per qubit (or once per pair for two-qubit
//! depolarizing). A conditional gate whose condition is false is skipped
//! together with its noise.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::debug;

use qeclab_hal::{BackendConfig, Counts, HalResult};
use qeclab_ir::{
    Circuit, ClassicalCondition, GateNoise, Instruction, InstructionKind, NoiseModel,
    TwoQubitNoise,
};

use crate::state::{Pauli, SimState};
use crate::statevector::Statevector;

/// Random stream for an engine: the `seed` option when set, entropy
/// otherwise.
pub(crate) fn rng_from_config(config: &BackendConfig) -> HalResult<SmallRng> {
    Ok(match config.extra_u64("seed")? {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    })
}

/// Register value of `condition`, read from the bits listed on the instruction.
fn condition_holds(condition: &ClassicalCondition, register: &[usize], clbits: &[bool]) -> bool {
    let value = register
        .iter()
        .take(64)
        .enumerate()
        .fold(0u64, |acc, (i, &c)| acc | (u64::from(clbits[c]) << i));
    value == condition.value
}

fn apply_one_qubit_noise<S: SimState>(
    state: &mut S,
    qubit: usize,
    model: &NoiseModel,
    rng: &mut SmallRng,
) {
    match model {
        NoiseModel::AmplitudeDamping { gamma } => state.amplitude_damp(qubit, *gamma, rng),
        _ => {
            if let Some(w) = model.pauli_weights() {
                let p = Pauli::sample(w.x, w.y, w.z, rng);
                state.apply_pauli(qubit, p);
            }
        }
    }
}

fn apply_noise<S: SimState>(state: &mut S, qubits: &[usize], noise: &GateNoise, rng: &mut SmallRng) {
    if qubits.len() == 1 {
        if let Some(model) = &noise.one_qubit {
            apply_one_qubit_noise(state, qubits[0], model, rng);
        }
        return;
    }

    match &noise.two_qubit {
        Some(TwoQubitNoise::Independent(model)) => {
            for &q in qubits {
                apply_one_qubit_noise(state, q, model, rng);
            }
        }
        Some(TwoQubitNoise::Depolarizing { p }) => {
            if rng.r#gen::<f64>() < *p {
                // Uniform over all 16 two-qubit Paulis, identity included.
                let k: u32 = rng.gen_range(0..16);
                state.apply_pauli(qubits[0], Pauli::from_index(k));
                state.apply_pauli(qubits[1], Pauli::from_index(k >> 2));
            }
        }
        None => {}
    }
}

fn apply_instruction<S: SimState>(
    state: &mut S,
    inst: &Instruction,
    noise: &GateNoise,
    clbits: &mut [bool],
    rng: &mut SmallRng,
) {
    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
    match &inst.kind {
        InstructionKind::Gate(gate) => {
            if let Some(condition) = &gate.condition {
                let register: Vec<usize> = inst.clbits.iter().map(|c| c.index()).collect();
                if !condition_holds(condition, &register, clbits) {
                    return;
                }
            }
            state.apply_gate(gate.kind, &qubits);
            if noise.applies_to(gate.name()) {
                apply_noise(state, &qubits, noise, rng);
            }
        }
        InstructionKind::Measure => {
            for (q, c) in qubits.iter().zip(&inst.clbits) {
                clbits[c.index()] = state.measure(*q, rng);
            }
        }
        InstructionKind::Reset => {
            for &q in &qubits {
                state.reset(q, rng);
            }
        }
        InstructionKind::Barrier => {}
    }
}

fn to_bitstring(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

fn into_counts(tally: FxHashMap<Vec<bool>, u64>) -> Counts {
    tally
        .into_iter()
        .map(|(bits, count)| (to_bitstring(&bits), count))
        .collect()
}

/// Run `shots` independent trajectories.
pub(crate) fn run_shots<S, F>(
    circuit: &Circuit,
    noise: &GateNoise,
    shots: u32,
    rng: &mut SmallRng,
    mut fresh: F,
) -> HalResult<Counts>
where
    S: SimState,
    F: FnMut() -> S,
{
    let ops = circuit.dag().topological_ops();
    debug!("Circuit has {} instructions", ops.len());

    let mut tally: FxHashMap<Vec<bool>, u64> = FxHashMap::default();
    let mut clbits = vec![false; circuit.num_clbits()];

    for shot in 0..shots {
        let mut state = fresh();
        clbits.fill(false);
        for inst in &ops {
            apply_instruction(&mut state, inst, noise, &mut clbits, rng);
        }
        *tally.entry(clbits.clone()).or_insert(0) += 1;

        if shot > 0 && shot % 1000 == 0 {
            debug!("Completed {} shots", shot);
        }
    }

    Ok(into_counts(tally))
}

/// Qubit to clbit pairs when every measurement is final on its qubit and
/// nothing depends on a measured value.
fn terminal_measurements(ops: &[&Instruction]) -> Option<Vec<(usize, usize)>> {
    let mut measured: Vec<(usize, usize)> = vec![];
    for inst in ops {
        match &inst.kind {
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    measured.push((q.index(), c.index()));
                }
            }
            InstructionKind::Reset => return None,
            InstructionKind::Gate(gate) => {
                if gate.is_conditional()
                    || inst
                        .qubits
                        .iter()
                        .any(|q| measured.iter().any(|(m, _)| *m == q.index()))
                {
                    return None;
                }
            }
            InstructionKind::Barrier => {}
        }
    }
    Some(measured)
}

/// Evolve once and sample every shot from the final state.
///
/// Returns `None` when the circuit needs per-shot trajectories.
pub(crate) fn sample_final_state(
    circuit: &Circuit,
    noise: &GateNoise,
    shots: u32,
    rng: &mut SmallRng,
) -> HalResult<Option<Counts>> {
    if !noise.is_noiseless() {
        return Ok(None);
    }
    let ops = circuit.dag().topological_ops();
    let Some(measured) = terminal_measurements(&ops) else {
        return Ok(None);
    };

    let mut state = Statevector::new(circuit.num_qubits());
    let mut scratch = vec![false; circuit.num_clbits()];
    for inst in ops.iter().filter(|i| i.is_gate()) {
        apply_instruction(&mut state, inst, noise, &mut scratch, rng);
    }
    debug!("Sampling {} shots from a {}-qubit final state", shots, state.num_qubits());

    let mut tally: FxHashMap<Vec<bool>, u64> = FxHashMap::default();
    for _ in 0..shots {
        let outcome = state.sample(rng);
        let mut clbits = vec![false; circuit.num_clbits()];
        for &(q, c) in &measured {
            clbits[c] = (outcome >> q) & 1 == 1;
        }
        *tally.entry(clbits).or_insert(0) += 1;
    }

    Ok(Some(into_counts(tally)))
}
