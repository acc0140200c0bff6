//! Error types for sweeps.

use qeclab_codes::CodeError;
use qeclab_hal::HalError;
use qeclab_ir::IrError;
use qeclab_noise::NoiseError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the sweep runners.
///
/// Everything except [`SweepError::EngineExecution`] is raised before the
/// first circuit is executed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SweepError {
    /// A caller-supplied value is outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A histogram with no counts reached the decoder.
    #[error("Cannot estimate an error rate from an empty histogram")]
    EmptyHistogram,

    /// No noise builder is registered under this name.
    #[error("Unknown noise type '{name}' (available: {})", available.join(", "))]
    UnknownNoiseType {
        /// The requested name.
        name: String,
        /// Registered names, sorted.
        available: Vec<String>,
    },

    /// A strength is outside [0, 1] or not a number.
    #[error("Invalid {param} for {noise_type}: {value} (must be in [0, 1])")]
    InvalidNoiseParameter {
        /// Channel being built.
        noise_type: String,
        /// Parameter name, `p` or `gamma`.
        param: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The engine failed while running one grid point.
    #[error("Engine failed at strength {strength}: {source}")]
    EngineExecution {
        /// Strength of the failing point.
        strength: f64,
        /// Error reported by the engine.
        #[source]
        source: HalError,
    },

    /// A code produced an invalid circuit.
    #[error("Circuit construction failed: {0}")]
    Circuit(#[from] IrError),

    /// The sweep configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<NoiseError> for SweepError {
    fn from(err: NoiseError) -> Self {
        match err {
            NoiseError::UnknownNoiseType { name, available } => {
                SweepError::UnknownNoiseType { name, available }
            }
            NoiseError::InvalidParameter {
                noise_type,
                param,
                value,
            } => SweepError::InvalidNoiseParameter {
                noise_type,
                param,
                value,
            },
            other => SweepError::InvalidInput(other.to_string()),
        }
    }
}

impl From<CodeError> for SweepError {
    fn from(err: CodeError) -> Self {
        match err {
            CodeError::InvalidInput(msg) => SweepError::InvalidInput(msg),
            CodeError::EmptyHistogram => SweepError::EmptyHistogram,
            CodeError::Ir(e) => SweepError::Circuit(e),
            other => SweepError::InvalidInput(other.to_string()),
        }
    }
}

/// Result type for sweep operations.
pub type SweepResult<T> = Result<T, SweepError>;
