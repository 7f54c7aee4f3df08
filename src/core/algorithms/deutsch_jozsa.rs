use tracing::debug;

use crate::core::gates::{hadamard, pauli_z};
use crate::core::state::QuantumState;

/// Verdict read from a measured Deutsch–Jozsa register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleKind {
    Constant,
    Balanced,
}

impl OracleKind {
    /// All-zero outcome means constant; anything else means balanced.
    pub fn from_outcome(outcome: usize) -> Self {
        if outcome == 0 { OracleKind::Constant } else { OracleKind::Balanced }
    }
}

/// H⊗n, optional stand-in balanced oracle, H⊗n.
///
/// The balanced oracle applies Pauli-Z to "qubit" `i` for every `i` in
/// `0..size/2`. Positions at or beyond the register width select no
/// amplitudes and are no-ops, so in practice every qubit gets one Z.
pub fn deutsch_jozsa(state: &mut QuantumState, is_constant: bool) {
    let n = state.num_qubits();
    for q in 0..n {
        hadamard(state, q);
    }
    if !is_constant {
        for position in 0..state.size() / 2 {
            if position < n {
                pauli_z(state, position);
            }
        }
    }
    for q in 0..n {
        hadamard(state, q);
    }
    debug!(is_constant, "deutsch-jozsa");
}
