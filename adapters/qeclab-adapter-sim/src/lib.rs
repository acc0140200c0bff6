//! QEC Lab Simulation Engines
//!
//! Two local engines behind the [`Backend`](qeclab_hal::Backend) trait:
//!
//! | Engine | State | Qubits | Amplitude damping |
//! |--------|-------|--------|-------------------|
//! | [`StabilizerBackend`] | CHP tableau | up to 64 | exact on Z eigenstates, twirled otherwise |
//! | [`StatevectorBackend`] | dense amplitudes | up to 20 | exact trajectories |
//!
//! Both simulate every shot independently, support mid-circuit measurement
//! and classically conditioned gates, and take an optional seed for
//! reproducible sweeps.
//!
//! # Example
//!
//! ```rust
//! use qeclab_adapter_sim::StabilizerBackend;
//! use qeclab_hal::Backend;
//! use qeclab_ir::{Circuit, GateNoise, QubitId};
//!
//! let mut circuit = Circuit::with_size("flip", 1, 1);
//! circuit.x(QubitId(0)).unwrap().measure_all().unwrap();
//!
//! let backend = StabilizerBackend::with_seed(7);
//! let result = backend.run(&circuit, &GateNoise::noiseless(), 100).unwrap();
//! assert_eq!(result.counts.get("1"), 100);
//! ```

mod executor;
mod simulator;
mod stabilizer;
mod state;
mod statevector;
mod tableau;

use qeclab_hal::BackendRegistry;

pub use simulator::StatevectorBackend;
pub use stabilizer::StabilizerBackend;

/// Name of the engine used when none is configured.
pub const DEFAULT_ENGINE: &str = "stabilizer";

/// A registry holding both local engines.
pub fn default_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<StabilizerBackend>("stabilizer");
    registry.register::<StatevectorBackend>("statevector");
    registry
}
