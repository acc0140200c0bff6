//! Error types for noise construction.

use thiserror::Error;

/// Errors raised while building a noise channel.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum NoiseError {
    /// No builder is registered under this name.
    #[error("Unknown noise type '{name}' (available: {})", available.join(", "))]
    UnknownNoiseType {
        /// The requested name.
        name: String,
        /// Registered names, sorted.
        available: Vec<String>,
    },

    /// The strength is outside [0, 1] or not a number.
    #[error("Invalid {param} for {noise_type}: {value} (must be in [0, 1])")]
    InvalidParameter {
        /// Channel being built.
        noise_type: String,
        /// Parameter name, `p` or `gamma`.
        param: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Result type for noise construction.
pub type NoiseResult<T> = Result<T, NoiseError>;
