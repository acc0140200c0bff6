//! QEC Lab Engine Abstraction Layer
//!
//! This crate defines the interface between circuit producers (error
//! correcting codes, sweeps) and the engines that sample them.
//!
//! # Overview
//!
//! - A common [`Backend`] trait: validate a circuit, then execute it for a
//!   number of shots under a [`GateNoise`](qeclab_ir::GateNoise) channel
//! - [`Capabilities`] to describe qubit limits, gates and features
//! - [`Counts`] histograms and [`ExecutionResult`]
//! - A [`BackendRegistry`] to pick an engine by name
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qeclab_adapter_sim::StabilizerBackend;
//! use qeclab_hal::Backend;
//! use qeclab_ir::{Circuit, GateNoise, QubitId};
//!
//! let mut circuit = Circuit::with_size("flip", 1, 1);
//! circuit.x(QubitId(0))?.measure_all()?;
//!
//! let backend = StabilizerBackend::new();
//! let result = backend.run(&circuit, &GateNoise::noiseless(), 1000)?;
//! assert_eq!(result.counts.get("1"), 1000);
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult};
