//! QEC Lab Noise Builders
//!
//! Turns a `(noise type, strength)` pair into a
//! [`GateNoise`](qeclab_ir::GateNoise) channel description.
//!
//! | Name | Parameter | One-qubit gates | Two-qubit gates |
//! |------|-----------|-----------------|-----------------|
//! | `bit_flip` | `p` | X w.p. `p` | X w.p. `p` on each qubit |
//! | `phase_flip` | `p` | Z w.p. `p` | Z w.p. `p` on each qubit |
//! | `depolarizing` | `p` | depolarizing(`p`) | two-qubit depolarizing(`p`) |
//! | `amplitude_damping` | `gamma` | damping(`gamma`) | damping(`gamma`) on each qubit |
//!
//! ```rust
//! use qeclab_noise::NoiseRegistry;
//!
//! let registry = NoiseRegistry::with_defaults();
//! let noise = registry.build("bit_flip", 0.01).unwrap();
//! assert!(noise.applies_to("cx"));
//! assert!(registry.build("bit_flip", 1.5).is_err());
//! ```

pub mod builders;
pub mod error;
pub mod registry;

pub use builders::{NoiseType, amplitude_damping, bit_flip, depolarizing, phase_flip};
pub use error::{NoiseError, NoiseResult};
pub use registry::{NoiseBuilder, NoiseRegistry};
