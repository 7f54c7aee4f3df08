use thiserror::Error;

use crate::core::state::MAX_QUBITS;

pub type QuantumResult<T> = Result<T, QuantumError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantumError {
    #[error("too many qubits requested: {requested} (max {max})")]
    TooManyQubits { requested: usize, max: usize },

    #[error("a register needs at least one qubit")]
    NoQubits,

    #[error("qubit {qubit} out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid circuit: {0}")]
    InvalidCircuit(String),
}

impl QuantumError {
    pub fn too_many(requested: usize) -> Self {
        QuantumError::TooManyQubits { requested, max: MAX_QUBITS }
    }

    pub fn invalid_circuit(message: impl Into<String>) -> Self {
        QuantumError::InvalidCircuit(message.into())
    }
}
