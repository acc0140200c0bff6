//! Encode on a simulator, decode the histogram.

use qeclab_adapter_sim::{StabilizerBackend, StatevectorBackend};
use qeclab_codes::{CodeKind, LogicalBit, QecCode};
use qeclab_hal::Backend;
use qeclab_ir::GateNoise;

fn engines(seed: u64) -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(StabilizerBackend::with_seed(seed)),
        Box::new(StatevectorBackend::with_seed(seed)),
    ]
}

#[test]
fn test_noiseless_round_trip_every_code() {
    for engine in engines(42) {
        for kind in CodeKind::ALL {
            let code = kind.build();
            for logical in [LogicalBit::Zero, LogicalBit::One] {
                let circuit = code.build_circuit(logical).unwrap();
                let result = engine.run(&circuit, &GateNoise::noiseless(), 200).unwrap();

                let tally = code.tally(&result.counts, logical).unwrap();
                assert_eq!(
                    tally.errors,
                    0,
                    "{} on {} for |{logical}>: {:?}",
                    code.name(),
                    engine.name(),
                    result.counts.sorted()
                );
                assert_eq!(tally.fallbacks, 0);
                assert_eq!(tally.total, 200);
            }
        }
    }
}

#[test]
fn test_noiseless_syndromes_are_quiet() {
    // Every ancilla reads 0 when nothing goes wrong.
    let engine = StabilizerBackend::with_seed(7);
    for kind in [CodeKind::Surface, CodeKind::Steane] {
        let code = kind.build();
        let circuit = code.build_circuit(LogicalBit::One).unwrap();
        let result = engine.run(&circuit, &GateNoise::noiseless(), 100).unwrap();

        let data_width = if kind == CodeKind::Surface { 9 } else { 7 };
        for (bitstring, _) in result.counts.iter() {
            assert!(
                bitstring[data_width..].chars().all(|c| c == '0'),
                "{kind}: {bitstring}"
            );
        }
    }
}

#[test]
fn test_phase_flips_leave_repetition_untouched() {
    let engine = StabilizerBackend::with_seed(9);
    let code = CodeKind::Repetition.build();
    let noise = qeclab_noise::phase_flip(0.3).unwrap();
    let circuit = code.build_circuit(LogicalBit::One).unwrap();

    let result = engine.run(&circuit, &noise, 1_000).unwrap();
    let rate = code
        .logical_error_rate_from_counts(&result.counts, LogicalBit::One)
        .unwrap();
    assert_eq!(rate, 0.0);
}

#[test]
fn test_heavy_bit_flip_noise_breaks_repetition() {
    let engine = StabilizerBackend::with_seed(10);
    let code = CodeKind::Repetition.build();
    let noise = qeclab_noise::bit_flip(0.5).unwrap();
    let circuit = code.build_circuit(LogicalBit::Zero).unwrap();

    let result = engine.run(&circuit, &noise, 4_000).unwrap();
    let rate = code
        .logical_error_rate_from_counts(&result.counts, LogicalBit::Zero)
        .unwrap();
    assert!(rate > 0.3 && rate < 0.7, "rate = {rate}");
}
