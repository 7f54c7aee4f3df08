use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::core::gates::{controlled_phase, hadamard};
use crate::core::measure::{measure, UniformSource};
use crate::core::state::QuantumState;

/// H then measure on qubits `0..num_bits`, packing bit `i` at position `i`.
pub fn quantum_random_number<R: UniformSource + ?Sized>(
    state: &mut QuantumState,
    num_bits: usize,
    rng: &mut R,
) -> usize {
    let mut result = 0usize;
    for i in 0..num_bits {
        hadamard(state, i);
        result |= usize::from(measure(state, i, rng)) << i;
    }
    debug!(num_bits, result, "random number");
    result
}

/// Coin flip on qubit 0, then CPhase(0, i, π/2) for every other qubit, `steps` times.
pub fn quantum_walk_1d(state: &mut QuantumState, steps: usize) {
    for _ in 0..steps {
        hadamard(state, 0);
        for i in 1..state.num_qubits() {
            controlled_phase(state, 0, i, FRAC_PI_2);
        }
    }
}
