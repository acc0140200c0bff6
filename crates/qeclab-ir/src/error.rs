//! Errors raised while building circuits.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Why an operation could not be added to a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// `op` names a qubit the circuit never allocated.
    #[error("'{op}' uses {qubit}, which is not in the circuit")]
    UnknownQubit { qubit: QubitId, op: &'static str },

    /// `op` names a classical bit the circuit never allocated.
    #[error("'{op}' uses {clbit}, which is not in the circuit")]
    UnknownClbit { clbit: ClbitId, op: &'static str },

    /// The same qubit appears twice in one operation.
    #[error("'{op}' uses {qubit} more than once")]
    DuplicateQubit { qubit: QubitId, op: &'static str },

    /// Gate arity does not match the operand list.
    #[error("'{op}' acts on {expected} qubit(s), got {got}")]
    WrongArity {
        op: &'static str,
        expected: u32,
        got: usize,
    },

    /// A measurement lists unequal numbers of qubits and classical bits.
    #[error("measurement of {qubits} qubit(s) into {clbits} classical bit(s)")]
    MeasureShape { qubits: usize, clbits: usize },

    /// A condition names a register that does not exist.
    #[error("no classical register named '{0}'")]
    RegisterNotFound(String),

    /// A condition value needs more bits than its register has.
    #[error("condition value {value} does not fit in {width}-bit register '{register}'")]
    ConditionOutOfRange {
        register: String,
        width: usize,
        value: u64,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
