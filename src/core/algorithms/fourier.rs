//! Quantum Fourier transform and the routines built on it.
use std::f64::consts::PI;
use std::ops::Range;

use tracing::debug;

use crate::core::gates::{controlled_phase, hadamard, phase, swap};
use crate::core::measure::{measure, UniformSource};
use crate::core::state::QuantumState;

/// QFT restricted to the contiguous qubit range `qubits`.
///
/// For each qubit `i` in order: H(i), then Phase(j, π/2^(j−i)) for every later
/// `j` in range; finally the range is bit-reversed with SWAPs.
pub fn qft_on(state: &mut QuantumState, qubits: Range<usize>) {
    let Range { start, end } = qubits;
    for i in start..end {
        hadamard(state, i);
        for j in i + 1..end {
            phase(state, j, PI / 2f64.powi((j - i) as i32));
        }
    }
    let width = end.saturating_sub(start);
    for k in 0..width / 2 {
        swap(state, start + k, end - 1 - k);
    }
}

pub fn quantum_fourier_transform(state: &mut QuantumState) {
    let n = state.num_qubits();
    qft_on(state, 0..n);
}

/// Layout: precision qubits `0..n/2`, target qubit `n−1`.
///
/// Controlled rotations by `true_phase·2^i` are followed by a forward QFT over
/// the whole register (no inverse transform).
pub fn quantum_phase_estimation(state: &mut QuantumState, true_phase: f64) {
    let n = state.num_qubits();
    let precision = n / 2;
    let target = n - 1;
    debug!(precision, target, true_phase, "phase estimation");

    for i in 0..precision {
        hadamard(state, i);
    }
    for i in 0..precision {
        controlled_phase(state, i, target, true_phase * 2f64.powi(i as i32));
    }
    quantum_fourier_transform(state);
}

/// Illustrative period-finding pipeline; no modular exponentiation.
///
/// Layout: first register `0..n/2`, second register `n/2..2·(n/2)`. Returns the
/// first register's measured bits, LSB-first.
pub fn shor_period_finding<R: UniformSource + ?Sized>(
    state: &mut QuantumState,
    number: u32,
    rng: &mut R,
) -> usize {
    debug_assert!(number > 0, "number to factor must be positive");
    let half = state.num_qubits() / 2;

    for i in 0..half {
        hadamard(state, i);
    }
    let angle = 2.0 * PI / f64::from(number);
    for i in 0..half {
        controlled_phase(state, i, half + i, angle);
    }
    qft_on(state, 0..half);

    let period = (0..half).fold(0usize, |acc, i| acc | (usize::from(measure(state, i, rng)) << i));
    debug!(number, period, "period finding");
    period
}
