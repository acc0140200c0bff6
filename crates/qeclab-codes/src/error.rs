//! Error types for code construction and decoding.

use qeclab_ir::IrError;
use thiserror::Error;

/// Errors raised by a [`QecCode`](crate::QecCode).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// A caller-supplied value is outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A histogram with no counts reached the decoder.
    #[error("Cannot estimate an error rate from an empty histogram")]
    EmptyHistogram,

    /// A histogram key is not a bitstring of the expected width.
    #[error("Malformed outcome '{bitstring}': expected {expected} bits of '0' or '1'")]
    MalformedOutcome {
        /// The offending key.
        bitstring: String,
        /// Width the code measures.
        expected: usize,
    },

    /// The encoder produced an invalid circuit.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for code operations.
pub type CodeResult<T> = Result<T, CodeError>;
