//! QEC Lab Circuit Intermediate Representation
//!
//! This crate provides the circuit descriptor that error-correcting codes
//! build and simulation engines consume.
//!
//! # Overview
//!
//! A [`Circuit`] is a list of named registers over a dependency graph of
//! operations. Its fluent builder covers what small stabilizer codes need:
//! Clifford gates, measurement, reset, and corrections conditioned on a
//! classical register.
//!
//! Noise is never baked into a circuit. A [`GateNoise`] describes the channel
//! that an engine attaches after each matching gate at execution time.
//!
//! # Example: Encoding a Repetition Codeword
//!
//! ```rust
//! use qeclab_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("repetition", 3, 3);
//! circuit
//!     .x(QubitId(0)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .cx(QubitId(0), QubitId(2)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.dag().num_ops(), 4);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity (carries idle noise) |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `SX` | 1 | sqrt(X) gate |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use noise::{GateNoise, NoiseModel, PauliWeights, TwoQubitNoise};
pub use qubit::{ClbitId, QubitId, Register};
