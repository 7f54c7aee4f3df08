//! Projective single-qubit measurement with collapse.
//!
//! Randomness is injected through [`UniformSource`]; any `rand` generator
//! qualifies, and [`ScriptedDraws`] replays fixed draws for golden tests.
use num_complex::Complex64 as C64;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::core::state::QuantumState;

/// Source of uniform samples in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "ScriptedDraws needs at least one draw");
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v
    }
}

/// Probability of reading 0 on `qubit`.
pub fn prob_zero(state: &QuantumState, qubit: usize) -> f64 {
    state.check_qubit(qubit);
    let mask = 1usize << qubit;
    state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(i, _)| i & mask == 0)
        .map(|(_, z)| z.norm_sqr())
        .sum()
}

/// Measure `qubit`, collapse onto the observed branch and renormalize.
///
/// The outcome is 1 iff the draw is strictly greater than P(0). An outcome
/// whose probability is exactly zero is never selected. Panics if the
/// surviving branch has zero norm.
pub fn measure<R: UniformSource + ?Sized>(state: &mut QuantumState, qubit: usize, rng: &mut R) -> u8 {
    let p0 = prob_zero(state, qubit);
    let u = rng.next_uniform();
    let bit = u8::from(u > p0 || p0 <= 0.0);

    let mask = 1usize << qubit;
    let keep = if bit == 1 { mask } else { 0 };
    for (i, amp) in state.data_mut().iter_mut().enumerate() {
        if i & mask != keep {
            *amp = C64::new(0.0, 0.0);
        }
    }
    let survivors = state.norm_sqr();
    assert!(
        survivors > 0.0,
        "measurement of qubit {qubit} collapsed onto a zero-norm branch (p0 = {p0})"
    );
    state.normalize();

    debug!(qubit, p0, draw = u, bit, "measure");
    bit
}

/// Measure qubits `0..num_qubits` in order and pack the bits LSB-first.
pub fn measure_all<R: UniformSource + ?Sized>(state: &mut QuantumState, rng: &mut R) -> usize {
    (0..state.num_qubits()).fold(0usize, |acc, q| acc | (usize::from(measure(state, q, rng)) << q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gates::hadamard;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn basis_state_measures_deterministically() {
        for draw in [0.0, 0.25, 0.5, 0.999_999] {
            let mut s = QuantumState::basis(3, 0b101).unwrap();
            let mut rng = ScriptedDraws::new(vec![draw]);
            assert_eq!(measure(&mut s, 0, &mut rng), 1);
            assert_eq!(measure(&mut s, 1, &mut rng), 0);
            assert_eq!(measure(&mut s, 2, &mut rng), 1);
            assert_eq!(s.probability(0b101), 1.0);
        }
    }

    #[test]
    fn comparison_is_strictly_against_p_zero() {
        // P(0) = 0.5 (up to rounding) on |+⟩
        let mut s = QuantumState::new(1).unwrap();
        hadamard(&mut s, 0);
        let mut low = ScriptedDraws::new(vec![0.2]);
        assert_eq!(measure(&mut s.clone(), 0, &mut low), 0);
        let mut high = ScriptedDraws::new(vec![0.8]);
        assert_eq!(measure(&mut s, 0, &mut high), 1);
        assert!((s.probability(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collapse_renormalizes() {
        let mut s = QuantumState::new(2).unwrap();
        hadamard(&mut s, 0);
        hadamard(&mut s, 1);
        let mut rng = ScriptedDraws::new(vec![0.9]);
        assert_eq!(measure(&mut s, 1, &mut rng), 1);
        assert!(s.is_normalized(1e-12));
        assert!((s.probability(0b10) - 0.5).abs() < 1e-12);
        assert!((s.probability(0b11) - 0.5).abs() < 1e-12);
        assert_eq!(s.probability(0b00), 0.0);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let run = |seed| {
            let mut s = QuantumState::new(4).unwrap();
            (0..4).for_each(|q| hadamard(&mut s, q));
            let mut rng = StdRng::seed_from_u64(seed);
            measure_all(&mut s, &mut rng)
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn scripted_draws_cycle() {
        let mut d = ScriptedDraws::new(vec![0.1, 0.2]);
        assert_eq!(d.next_uniform(), 0.1);
        assert_eq!(d.next_uniform(), 0.2);
        assert_eq!(d.next_uniform(), 0.1);
        assert_eq!(d.consumed(), 3);
    }
}
