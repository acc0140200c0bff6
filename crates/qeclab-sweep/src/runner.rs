//! The baseline and code sweep runners.

use tracing::{debug, instrument};

use qeclab_codes::{DecodeTally, LogicalBit, QecCode};
use qeclab_hal::{Backend, Counts};
use qeclab_ir::{Circuit, GateNoise};
use qeclab_noise::NoiseRegistry;

use crate::config::SweepConfig;
use crate::error::{SweepError, SweepResult};
use crate::observer::{PointProgress, SweepObserver, SweepPlan, TracingObserver};
use crate::result::{SweepPoint, SweepReport};

/// Label used for unencoded single-qubit runs.
pub const PHYSICAL_LABEL: &str = "physical qubit";

/// Runs sweeps one strength at a time against a single engine.
///
/// Every input is checked before the first circuit is executed. After that
/// an engine failure stops the sweep with [`SweepError::EngineExecution`].
pub struct SweepRunner<'a> {
    backend: &'a dyn Backend,
    noise: NoiseRegistry,
    observer: Box<dyn SweepObserver + 'a>,
}

impl<'a> SweepRunner<'a> {
    /// A runner with the built-in noise types that logs each point.
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            noise: NoiseRegistry::with_defaults(),
            observer: Box::new(TracingObserver),
        }
    }

    /// Replace the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl SweepObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Resolve and range-check every strength before anything runs.
    fn prepare(&self, noise_type: &str, ps: &[f64], shots: u32) -> SweepResult<Vec<GateNoise>> {
        if ps.is_empty() {
            return Err(SweepError::InvalidInput(
                "at least one noise strength is required".to_string(),
            ));
        }
        if shots == 0 {
            return Err(SweepError::InvalidInput(
                "shots must be at least 1".to_string(),
            ));
        }

        let builder = self.noise.get(noise_type)?;
        let noise = ps
            .iter()
            .map(|&p| builder(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(noise)
    }

    fn execute(
        &self,
        circuit: &Circuit,
        noise: &GateNoise,
        strength: f64,
        shots: u32,
    ) -> SweepResult<Counts> {
        let result = self
            .backend
            .run(circuit, noise, shots)
            .map_err(|source| SweepError::EngineExecution { strength, source })?;
        Ok(result.counts)
    }

    fn report(&mut self, label: &str, noise_type: &str, index: usize, total: usize, point: &SweepPoint) {
        debug!(
            "{} point {}/{}: p={} errors={} fallbacks={}",
            label,
            index + 1,
            total,
            point.strength,
            point.errors,
            point.fallbacks
        );
        self.observer.on_point(&PointProgress {
            label,
            noise_type,
            index,
            total,
            point,
        });
    }

    /// Flip rate of one unencoded qubit prepared in |0⟩.
    pub fn run_physical_qubit(
        &mut self,
        noise_type: &str,
        strength: f64,
        shots: u32,
    ) -> SweepResult<f64> {
        self.run_physical_qubit_from(LogicalBit::Zero, noise_type, strength, shots)
    }

    /// Flip rate of one unencoded qubit prepared in `prepared`.
    ///
    /// The qubit idles through a single identity gate, the only gate that
    /// carries noise, so preparation itself stays clean.
    pub fn run_physical_qubit_from(
        &mut self,
        prepared: LogicalBit,
        noise_type: &str,
        strength: f64,
        shots: u32,
    ) -> SweepResult<f64> {
        let noise = self.prepare(noise_type, &[strength], shots)?;
        let point = self.physical_point(prepared, &noise[0], strength, shots)?;
        Ok(point.logical_error_rate)
    }

    /// The single-qubit baseline over a grid of strengths, from |0⟩.
    pub fn run_physical_grid(
        &mut self,
        noise_type: &str,
        ps: &[f64],
        shots: u32,
    ) -> SweepResult<Vec<SweepPoint>> {
        self.run_physical_grid_from(LogicalBit::Zero, noise_type, ps, shots)
    }

    /// The single-qubit baseline over a grid of strengths, from `prepared`.
    #[instrument(skip(self, ps))]
    pub fn run_physical_grid_from(
        &mut self,
        prepared: LogicalBit,
        noise_type: &str,
        ps: &[f64],
        shots: u32,
    ) -> SweepResult<Vec<SweepPoint>> {
        let noise = self.prepare(noise_type, ps, shots)?;
        self.observer.on_start(&SweepPlan {
            label: PHYSICAL_LABEL,
            noise_type,
            total: ps.len(),
            shots,
        });

        let mut points = Vec::with_capacity(ps.len());
        for (index, (&strength, noise)) in ps.iter().zip(&noise).enumerate() {
            let point = self.physical_point(prepared, noise, strength, shots)?;
            self.report(PHYSICAL_LABEL, noise_type, index, ps.len(), &point);
            points.push(point);
        }

        self.observer.on_finish(&points);
        Ok(points)
    }

    fn physical_point(
        &self,
        prepared: LogicalBit,
        noise: &GateNoise,
        strength: f64,
        shots: u32,
    ) -> SweepResult<SweepPoint> {
        let circuit = physical_circuit(prepared)?;
        let idle_noise = noise.clone().with_gates(["id"]);
        let counts = self.execute(&circuit, &idle_noise, strength, shots)?;

        let flipped = if prepared.is_one() { "0" } else { "1" };
        let tally = DecodeTally {
            errors: counts.get(flipped),
            fallbacks: 0,
            total: counts.total_shots(),
        };
        if tally.total == 0 {
            return Err(SweepError::EmptyHistogram);
        }
        Ok(SweepPoint::from_tally(strength, shots, &tally))
    }

    /// Logical error rate of `code` at every strength in `ps`, in order.
    #[instrument(skip(self, code, ps), fields(code = code.name()))]
    pub fn run_code_on_noise_grid(
        &mut self,
        code: &dyn QecCode,
        ps: &[f64],
        noise_type: &str,
        shots: u32,
        logical_bit: LogicalBit,
    ) -> SweepResult<Vec<SweepPoint>> {
        let noise = self.prepare(noise_type, ps, shots)?;
        let label = code.name();
        self.observer.on_start(&SweepPlan {
            label,
            noise_type,
            total: ps.len(),
            shots,
        });

        let mut points = Vec::with_capacity(ps.len());
        for (index, (&strength, noise)) in ps.iter().zip(&noise).enumerate() {
            let circuit = code.build_circuit(logical_bit)?;
            let counts = self.execute(&circuit, noise, strength, shots)?;
            let tally = code.tally(&counts, logical_bit)?;

            let point = SweepPoint::from_tally(strength, shots, &tally);
            self.report(label, noise_type, index, ps.len(), &point);
            points.push(point);
        }

        self.observer.on_finish(&points);
        Ok(points)
    }

    /// Run the sweep a configuration describes, plus its baseline when asked.
    ///
    /// The engine is this runner's backend; `config.engine` and
    /// `config.seed` are only recorded in the report.
    pub fn run_config(&mut self, config: &SweepConfig) -> SweepResult<SweepReport> {
        config.validate()?;

        let code = config.code.build();
        let points = self.run_code_on_noise_grid(
            code.as_ref(),
            &config.ps,
            &config.noise,
            config.shots,
            config.logical_bit,
        )?;

        let mut report = SweepReport::new(
            code.name(),
            config.noise.clone(),
            config.logical_bit,
            self.backend.name(),
            config.shots,
            points,
        )
        .with_seed(config.seed);

        if config.baseline {
            let baseline = self.run_physical_grid_from(
                config.logical_bit,
                &config.noise,
                &config.ps,
                config.shots,
            )?;
            report = report.with_baseline(baseline);
        }
        Ok(report)
    }
}

/// Prepare, idle once, measure.
fn physical_circuit(prepared: LogicalBit) -> SweepResult<Circuit> {
    let mut circuit = Circuit::new("physical_qubit");
    let q = circuit.add_qreg("q", 1);
    circuit.add_creg("c", 1);

    if prepared.is_one() {
        circuit.x(q[0])?;
    }
    circuit.id(q[0])?;
    circuit.measure_all()?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qeclab_adapter_sim::StabilizerBackend;

    #[test]
    fn test_physical_circuit_shape() {
        let circuit = physical_circuit(LogicalBit::One).unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.dag().num_ops(), 3);
    }

    #[test]
    fn test_validation_order() {
        let engine = StabilizerBackend::with_seed(1);
        let runner = SweepRunner::new(&engine);

        assert!(matches!(
            runner.prepare("bit_flip", &[], 10),
            Err(SweepError::InvalidInput(_))
        ));
        assert!(matches!(
            runner.prepare("bit_flip", &[0.1], 0),
            Err(SweepError::InvalidInput(_))
        ));
        assert!(matches!(
            runner.prepare("gremlin_noise", &[0.1], 10),
            Err(SweepError::UnknownNoiseType { .. })
        ));
        assert!(matches!(
            runner.prepare("depolarizing", &[0.1, 2.0], 10),
            Err(SweepError::InvalidNoiseParameter { value, .. }) if value == 2.0
        ));
        assert_eq!(runner.prepare("phase_flip", &[0.0, 1.0], 10).unwrap().len(), 2);
    }

    #[test]
    fn test_certain_flip_baseline() {
        let engine = StabilizerBackend::with_seed(2);
        let mut runner = SweepRunner::new(&engine);
        assert_eq!(runner.run_physical_qubit("bit_flip", 1.0, 50).unwrap(), 1.0);
        assert_eq!(
            runner
                .run_physical_qubit_from(LogicalBit::One, "bit_flip", 0.0, 50)
                .unwrap(),
            0.0
        );
    }
}
