//! Three-qubit bit-flip repetition code.
//!
//! Logical qubit `k` occupies physical qubits `3k`, `3k+1`, `3k+2`.
use tracing::debug;

use crate::core::gates::{cnot, pauli_x};
use crate::core::measure::{measure, UniformSource};
use crate::core::state::QuantumState;

/// Parity bits `(q0 ⊕ q1, q0 ⊕ q2)` of one code block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Syndrome {
    pub s1: u8,
    pub s2: u8,
}

impl Syndrome {
    /// Offset within the block of the qubit to flip back, if any.
    pub fn flipped_offset(&self) -> Option<usize> {
        match (self.s1, self.s2) {
            (1, 0) => Some(1),
            (0, 1) => Some(2),
            (1, 1) => Some(0),
            _ => None,
        }
    }
}

fn base(logical_qubit: usize) -> usize {
    logical_qubit * 3
}

pub fn encode(state: &mut QuantumState, logical_qubit: usize) {
    let b = base(logical_qubit);
    cnot(state, b, b + 1);
    cnot(state, b, b + 2);
}

/// Measures all three physical qubits of the block; the block is consumed.
pub fn syndrome<R: UniformSource + ?Sized>(
    state: &mut QuantumState,
    logical_qubit: usize,
    rng: &mut R,
) -> Syndrome {
    let b = base(logical_qubit);
    let q0 = measure(state, b, rng);
    let q1 = measure(state, b + 1, rng);
    let q2 = measure(state, b + 2, rng);
    let s = Syndrome { s1: q0 ^ q1, s2: q0 ^ q2 };
    debug!(logical_qubit, s1 = s.s1, s2 = s.s2, "syndrome");
    s
}

pub fn recover(state: &mut QuantumState, logical_qubit: usize, syndrome: Syndrome) {
    if let Some(offset) = syndrome.flipped_offset() {
        pauli_x(state, base(logical_qubit) + offset);
    }
}
