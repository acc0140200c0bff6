//! Engine-level failures.

use thiserror::Error;

/// Why an engine refused or failed a run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No engine is registered under this name.
    #[error("unknown engine {0}")]
    BackendUnavailable(String),

    #[error("circuit rejected: {0}")]
    InvalidCircuit(String),

    /// The circuit needs more qubits or gates than the engine offers.
    #[error("circuit does not fit the engine: {0}")]
    CircuitTooLarge(String),

    #[error("shot count rejected: {0}")]
    InvalidShots(String),

    /// Bad engine options, such as a non-numeric seed.
    #[error("engine configuration: {0}")]
    Configuration(String),

    #[error("simulation failed: {0}")]
    Simulation(String),
}

pub type HalResult<T> = Result<T, HalError>;
