//! QEC Lab error-correcting codes
//!
//! Every code implements [`QecCode`]: it builds a circuit that encodes a
//! logical bit and measures what the decoder needs, and it turns measured
//! bitstrings back into a logical verdict.
//!
//! | Code | Physical qubits | Decoder |
//! |------|-----------------|---------|
//! | [`RepetitionCode3`] | 3 | majority vote |
//! | [`ShorCode9`] | 9 | block majority, then majority of blocks |
//! | [`RotatedSurfaceCodeD3`] | 17 (9 data + 8 ancilla) | syndrome lookup |
//! | [`SteaneCode7`] | 13 (7 data + 6 ancilla) | Hamming syndrome |
//!
//! Decoding never fails on a well-formed bitstring. When the syndrome can't
//! be resolved the decoder takes a parity vote and marks the verdict with
//! [`DecodePath::Fallback`] so callers can count how often that happened.
//!
//! # Example
//!
//! ```rust
//! use qeclab_codes::{CodeKind, LogicalBit, QecCode};
//! use qeclab_hal::Counts;
//!
//! let code = CodeKind::Repetition.build();
//! let circuit = code.build_circuit(LogicalBit::Zero).unwrap();
//! assert_eq!(circuit.num_qubits(), 3);
//!
//! let counts: Counts = [("000", 90u64), ("011", 10)].into_iter().collect();
//! let rate = code.logical_error_rate_from_counts(&counts, LogicalBit::Zero).unwrap();
//! assert!((rate - 0.1).abs() < 1e-12);
//! ```

pub mod code;
pub mod decode;
pub mod error;
pub mod logical;
pub mod outcome;
pub mod repetition;
pub mod shor;
pub mod steane;
pub mod surface;

pub use code::{CodeKind, QecCode};
pub use decode::{DecodePath, DecodeTally, Decoded};
pub use error::{CodeError, CodeResult};
pub use logical::LogicalBit;
pub use outcome::Outcome;
pub use repetition::RepetitionCode3;
pub use shor::ShorCode9;
pub use steane::SteaneCode7;
pub use surface::RotatedSurfaceCodeD3;
