//! QEC Lab sweeps
//!
//! Monte Carlo estimation of logical error rates. A [`SweepRunner`] takes a
//! code, a noise type and a grid of strengths, and for each strength builds
//! the code's circuit, runs it on an engine under that noise, decodes the
//! histogram and records a [`SweepPoint`].
//!
//! ```text
//!   SweepConfig ──→ SweepRunner ──→ QecCode::build_circuit
//!                        │                  │
//!                        │          Backend::run (noise attached)
//!                        │                  │
//!                        ├── SweepObserver ←┤ QecCode::tally
//!                        ▼
//!                   SweepReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use qeclab_adapter_sim::StabilizerBackend;
//! use qeclab_codes::{LogicalBit, RepetitionCode3};
//! use qeclab_sweep::{NullObserver, SweepRunner};
//!
//! let engine = StabilizerBackend::with_seed(7);
//! let mut runner = SweepRunner::new(&engine).with_observer(NullObserver);
//!
//! let points = runner
//!     .run_code_on_noise_grid(&RepetitionCode3, &[0.0, 0.05], "bit_flip", 500, LogicalBit::Zero)
//!     .unwrap();
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[0].logical_error_rate, 0.0);
//! ```

pub mod active;
pub mod config;
pub mod error;
pub mod observer;
pub mod result;
pub mod runner;

pub use active::{ActiveCorrectionDemo, ActiveOutcome};
pub use config::{ConfigError, SweepConfig};
pub use error::{SweepError, SweepResult};
pub use observer::{NullObserver, PointProgress, SweepObserver, SweepPlan, TracingObserver};
pub use result::{SweepPoint, SweepReport};
pub use runner::{PHYSICAL_LABEL, SweepRunner};
