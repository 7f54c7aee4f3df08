//! Grover search over the full register.
use std::f64::consts::PI;

use tracing::debug;

use crate::core::gates::hadamard;
use crate::core::state::QuantumState;

/// `⌊π/4 · √size⌋`, truncated exactly as the float cast does.
pub fn grover_iterations(size: usize) -> usize {
    (PI / 4.0 * (size as f64).sqrt()) as usize
}

/// Phase-flip the marked basis state.
pub fn grover_oracle(state: &mut QuantumState, marked: usize) {
    let amp = &mut state.data_mut()[marked];
    *amp = -*amp;
}

/// H⊗n, flip |0…0⟩, H⊗n.
pub fn grover_diffusion(state: &mut QuantumState) {
    for q in 0..state.num_qubits() {
        hadamard(state, q);
    }
    grover_oracle(state, 0);
    for q in 0..state.num_qubits() {
        hadamard(state, q);
    }
}

/// Run the whole search from |0…0⟩. Returns the number of iterations applied.
pub fn grover_search(state: &mut QuantumState, marked: usize) -> usize {
    debug_assert!(marked < state.size(), "marked index {marked} outside register");
    for q in 0..state.num_qubits() {
        hadamard(state, q);
    }
    let iterations = grover_iterations(state.size());
    debug!(marked, iterations, "grover search");
    for _ in 0..iterations {
        grover_oracle(state, marked);
        grover_diffusion(state);
    }
    iterations
}
