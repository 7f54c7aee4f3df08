//! Dense amplitude vector for a register of up to [`MAX_QUBITS`] qubits.
//!
//! Bit `k` of an amplitude's index is the value of qubit `k` (little-endian),
//! so index 5 = `0b101` is the basis state with qubits 0 and 2 set.
use nalgebra::DVector;
use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, QuantumResult};

pub const MAX_QUBITS: usize = 16;
pub const EPS: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumState {
    num_qubits: usize,
    data: DVector<C64>,
}

impl QuantumState {
    /// Allocate a register in |0…0⟩.
    pub fn new(num_qubits: usize) -> QuantumResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::too_many(num_qubits));
        }
        if num_qubits == 0 {
            return Err(QuantumError::NoQubits);
        }
        let mut data = DVector::from_element(1usize << num_qubits, C64::new(0.0, 0.0));
        data[0] = C64::new(1.0, 0.0);
        Ok(Self { num_qubits, data })
    }

    /// Register prepared in the computational basis state `index`.
    pub fn basis(num_qubits: usize, index: usize) -> QuantumResult<Self> {
        let mut state = Self::new(num_qubits)?;
        if index >= state.size() {
            return Err(QuantumError::InvalidState(format!(
                "basis index {index} outside a {}-amplitude register",
                state.size()
            )));
        }
        state.data[0] = C64::new(0.0, 0.0);
        state.data[index] = C64::new(1.0, 0.0);
        Ok(state)
    }

    /// Build from raw amplitudes; rejects non-normalized input unless `auto_normalize = true`.
    pub fn try_from_amplitudes(amplitudes: Vec<C64>, auto_normalize: bool) -> QuantumResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QuantumError::InvalidState(format!(
                "amplitude count {len} is not a power of two >= 2"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::too_many(num_qubits));
        }
        let mut data = DVector::from_vec(amplitudes);
        let norm = data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if (norm - 1.0).abs() >= 1e-9 {
            if !auto_normalize {
                return Err(QuantumError::InvalidState(format!(
                    "not normalized (||ψ|| = {norm})"
                )));
            }
            if norm < EPS {
                return Err(QuantumError::InvalidState("norm ~ 0".into()));
            }
            data.iter_mut().for_each(|z| *z /= norm);
        }
        Ok(Self { num_qubits, data })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn amplitude(&self, index: usize) -> C64 {
        self.data[index]
    }

    pub fn amplitudes(&self) -> &[C64] {
        self.data.as_slice()
    }

    pub fn as_vector(&self) -> &DVector<C64> {
        &self.data
    }

    pub fn probability(&self, index: usize) -> f64 {
        self.data[index].norm_sqr()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(|z| z.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1 for every externally observable state.
    pub fn norm_sqr(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum()
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() <= tolerance
    }

    /// Rescale to unit norm. Panics on a zero vector.
    pub fn normalize(&mut self) {
        let norm = self.norm_sqr().sqrt();
        assert!(norm > 0.0, "cannot normalize a zero amplitude vector");
        self.data.iter_mut().for_each(|z| *z /= norm);
    }

    pub(crate) fn data_mut(&mut self) -> &mut DVector<C64> {
        &mut self.data
    }

    /// Swap in a fully computed replacement vector.
    pub(crate) fn replace(&mut self, data: DVector<C64>) {
        debug_assert_eq!(data.len(), self.data.len());
        self.data = data;
    }

    #[inline]
    pub(crate) fn check_qubit(&self, qubit: usize) {
        debug_assert!(
            qubit < self.num_qubits,
            "qubit {qubit} out of range for {} qubits",
            self.num_qubits
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_all_zero_basis() {
        let s = QuantumState::new(3).unwrap();
        assert_eq!(s.num_qubits(), 3);
        assert_eq!(s.size(), 8);
        assert_eq!(s.amplitude(0), C64::new(1.0, 0.0));
        assert!(s.amplitudes()[1..].iter().all(|z| z.norm() == 0.0));
    }

    #[test]
    fn rejects_oversized_and_empty_registers() {
        assert_eq!(
            QuantumState::new(17).unwrap_err(),
            QuantumError::TooManyQubits { requested: 17, max: MAX_QUBITS }
        );
        assert_eq!(QuantumState::new(0).unwrap_err(), QuantumError::NoQubits);
        assert_eq!(QuantumState::new(16).unwrap().size(), 1 << 16);
    }

    #[test]
    fn basis_state_places_single_amplitude() {
        let s = QuantumState::basis(2, 3).unwrap();
        assert_eq!(s.probabilities(), vec![0.0, 0.0, 0.0, 1.0]);
        assert!(QuantumState::basis(2, 4).is_err());
    }

    #[test]
    fn from_amplitudes_checks_shape_and_norm() {
        let half = C64::new(0.5, 0.0);
        assert!(QuantumState::try_from_amplitudes(vec![half; 3], true).is_err());
        assert!(QuantumState::try_from_amplitudes(vec![half; 2], false).is_err());

        let s = QuantumState::try_from_amplitudes(vec![C64::new(3.0, 0.0), C64::new(4.0, 0.0)], true)
            .unwrap();
        assert!((s.amplitude(0).re - 0.6).abs() < 1e-12);
        assert!((s.amplitude(1).re - 0.8).abs() < 1e-12);
        assert_eq!(s.num_qubits(), 1);
    }

    #[test]
    #[should_panic(expected = "zero amplitude vector")]
    fn normalize_zero_vector_panics() {
        let mut s = QuantumState::new(1).unwrap();
        s.data_mut()[0] = C64::new(0.0, 0.0);
        s.normalize();
    }
}
