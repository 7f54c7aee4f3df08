//! Full `2^n × 2^n` unitaries for [`Gate`], built independently of the
//! bit-indexed engine. Used to cross-check gate semantics and unitarity.
use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::core::gates::Gate;
use crate::core::state::QuantumState;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

fn m2(a: C64, b: C64, cc: C64, d: C64) -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[a, b, cc, d])
}

pub fn h() -> DMatrix<C64> {
    let s = c(FRAC_1_SQRT_2, 0.0);
    m2(s, s, s, -s)
}
pub fn x() -> DMatrix<C64> {
    m2(c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0))
}
/// Engine convention: `[[0, i], [-i, 0]]` (−Y, equal to Y up to global phase).
pub fn y() -> DMatrix<C64> {
    m2(c(0.0, 0.0), c(0.0, 1.0), c(0.0, -1.0), c(0.0, 0.0))
}
pub fn z() -> DMatrix<C64> {
    m2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0))
}
pub fn phase(theta: f64) -> DMatrix<C64> {
    m2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), C64::from_polar(1.0, theta))
}
pub fn rx(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    m2(c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0))
}
pub fn ry(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    m2(c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0))
}

/// Promote a 1-qubit gate onto `n_qubits` with qubit 0 least significant.
pub fn lift_1q(u: &DMatrix<C64>, n_qubits: usize, target: usize) -> DMatrix<C64> {
    assert_eq!(u.shape(), (2, 2));
    assert!(target < n_qubits);

    // The left operand of a Kronecker product owns the high index bits, so
    // fold from the most significant qubit down.
    let i2 = DMatrix::<C64>::identity(2, 2);
    let mut acc = DMatrix::<C64>::from_element(1, 1, c(1.0, 0.0));
    for q in (0..n_qubits).rev() {
        let m = if q == target { u } else { &i2 };
        acc = acc.kronecker(m);
    }
    acc
}

/// Permutation unitary sending basis `b` to `map(b)`.
fn permutation(n_qubits: usize, map: impl Fn(usize) -> usize) -> DMatrix<C64> {
    let dim = 1usize << n_qubits;
    let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
    for basis in 0..dim {
        m[(map(basis), basis)] = c(1.0, 0.0);
    }
    m
}

fn bit(basis: usize, q: usize) -> bool {
    (basis >> q) & 1 == 1
}

/// Dense unitary of `gate` acting on an `n_qubits` register.
pub fn unitary(gate: &Gate, n_qubits: usize) -> DMatrix<C64> {
    match *gate {
        Gate::H { target } => lift_1q(&h(), n_qubits, target),
        Gate::X { target } => lift_1q(&x(), n_qubits, target),
        Gate::Y { target } => lift_1q(&y(), n_qubits, target),
        Gate::Z { target } => lift_1q(&z(), n_qubits, target),
        Gate::Phase { target, angle } | Gate::Rz { target, angle } => {
            lift_1q(&phase(angle), n_qubits, target)
        }
        Gate::Rx { target, angle } => lift_1q(&rx(angle), n_qubits, target),
        Gate::Ry { target, angle } => lift_1q(&ry(angle), n_qubits, target),
        Gate::Cnot { control, target } => permutation(n_qubits, |b| {
            if bit(b, control) { b ^ (1 << target) } else { b }
        }),
        Gate::Swap { a, b: q } => permutation(n_qubits, |b| {
            if bit(b, a) != bit(b, q) { b ^ (1 << a) ^ (1 << q) } else { b }
        }),
        Gate::Toffoli { control1, control2, target } => permutation(n_qubits, |b| {
            if bit(b, control1) && bit(b, control2) { b ^ (1 << target) } else { b }
        }),
        Gate::Cphase { control, target, angle } => {
            let dim = 1usize << n_qubits;
            let diag = DVector::from_fn(dim, |b, _| {
                if bit(b, control) && bit(b, target) {
                    C64::from_polar(1.0, angle)
                } else {
                    c(1.0, 0.0)
                }
            });
            DMatrix::from_diagonal(&diag)
        }
    }
}

/// `U · ψ` for the gate's dense unitary.
pub fn apply_dense(gate: &Gate, state: &QuantumState) -> DVector<C64> {
    unitary(gate, state.num_qubits()) * state.as_vector()
}

/// Largest entry of `|U†U − I|`.
pub fn unitarity_defect(m: &DMatrix<C64>) -> f64 {
    let u_dag_u = m.adjoint() * m;
    let i = DMatrix::<C64>::identity(m.nrows(), m.ncols());
    (u_dag_u - i).iter().map(|z| z.norm()).fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn every_gate_is_unitary() {
        let gates = [
            Gate::H { target: 1 },
            Gate::Y { target: 0 },
            Gate::Rx { target: 2, angle: 0.3 },
            Gate::Ry { target: 1, angle: 1.1 },
            Gate::Phase { target: 0, angle: PI / 3.0 },
            Gate::Cnot { control: 2, target: 0 },
            Gate::Swap { a: 0, b: 2 },
            Gate::Toffoli { control1: 0, control2: 2, target: 1 },
            Gate::Cphase { control: 1, target: 2, angle: 0.7 },
        ];
        for g in gates {
            let u = unitary(&g, 3);
            assert_eq!(u.shape(), (8, 8));
            assert!(unitarity_defect(&u) < 1e-10, "{g} not unitary");
        }
    }

    #[test]
    fn lift_on_middle_qubit_keeps_neighbours() {
        // Z on qubit 1 of 3 negates exactly the indices with bit 1 set.
        let u = lift_1q(&z(), 3, 1);
        for b in 0..8 {
            let expect = if b & 0b010 != 0 { -1.0 } else { 1.0 };
            assert_eq!(u[(b, b)], c(expect, 0.0), "index {b}");
        }
        assert_eq!(u.iter().filter(|z| z.norm() > 0.0).count(), 8);
    }

    #[test]
    fn lift_is_little_endian() {
        // X on qubit 0 of 2 maps |00⟩ (index 0) to index 1.
        let u = lift_1q(&x(), 2, 0);
        assert_eq!(u[(1, 0)], c(1.0, 0.0));
        let u = lift_1q(&x(), 2, 1);
        assert_eq!(u[(2, 0)], c(1.0, 0.0));
    }
}
