//! Teleportation between two separately owned registers.
//!
//! A faithful protocol needs both halves of the Bell pair in one Hilbert
//! space. Here the "pair" is prepared locally inside `target` and only the two
//! classical bits travel from `source` to `target`, so this is a local
//! simulation of a non-local protocol rather than true entanglement transfer.
use tracing::debug;

use crate::core::gates::{cnot, hadamard, pauli_x, pauli_z};
use crate::core::measure::{measure, UniformSource};
use crate::core::state::QuantumState;

/// The two classical bits sent from source to target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeleportOutcome {
    /// Bit read from `source_qubit`; drives the Z correction.
    pub m1: u8,
    /// Bit read from `target_qubit` of the source; drives the X correction.
    pub m2: u8,
}

/// Both registers need qubits `source_qubit` and `target_qubit`, which must differ.
pub fn quantum_teleportation<R: UniformSource + ?Sized>(
    source: &mut QuantumState,
    target: &mut QuantumState,
    source_qubit: usize,
    target_qubit: usize,
    rng: &mut R,
) -> TeleportOutcome {
    hadamard(target, target_qubit);
    cnot(target, target_qubit, source_qubit);

    cnot(source, source_qubit, target_qubit);
    hadamard(source, source_qubit);

    let m1 = measure(source, source_qubit, rng);
    let m2 = measure(source, target_qubit, rng);

    if m2 == 1 {
        pauli_x(target, target_qubit);
    }
    if m1 == 1 {
        pauli_z(target, target_qubit);
    }
    debug!(m1, m2, "teleportation corrections");
    TeleportOutcome { m1, m2 }
}
