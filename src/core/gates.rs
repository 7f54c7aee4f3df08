//! Gate application on the dense amplitude vector.
//!
//! Every single-target gate works on index pairs `(i0, i1)` where `i0` has the
//! target bit clear and `i1 = i0 | (1 << target)`. Permutation gates swap pairs
//! in place (pairs never overlap); mixing gates build a replacement vector.
//!
//! Qubit indices are not re-validated here beyond `debug_assert!`. Use
//! [`Gate::validate`] at the boundary when indices come from user input.
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;

use nalgebra::DVector;
use num_complex::Complex64 as C64;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::core::error::{QuantumError, QuantumResult};
use crate::core::state::QuantumState;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Mix every `(i0, i1)` pair through `[[a, b], [c, d]]` into a fresh vector.
fn mix_pairs(state: &mut QuantumState, target: usize, m: [[C64; 2]; 2]) {
    state.check_qubit(target);
    let mask = 1usize << target;
    let old = state.as_vector();
    let mut new = DVector::from_element(old.len(), c(0.0, 0.0));
    for i0 in (0..old.len()).filter(|i| i & mask == 0) {
        let i1 = i0 | mask;
        let (a0, a1) = (old[i0], old[i1]);
        new[i0] = m[0][0] * a0 + m[0][1] * a1;
        new[i1] = m[1][0] * a0 + m[1][1] * a1;
    }
    state.replace(new);
}

/// Multiply every amplitude whose index satisfies `mask` fully by `factor`.
fn scale_where_set(state: &mut QuantumState, mask: usize, factor: C64) {
    for (i, amp) in state.data_mut().iter_mut().enumerate() {
        if i & mask == mask {
            *amp *= factor;
        }
    }
}

/// Swap each amplitude whose index has all of `require` set and `target` clear
/// with its partner `i ^ flip`.
fn swap_pairs(state: &mut QuantumState, require: usize, target: usize, flip: usize) {
    let amps = state.data_mut().as_mut_slice();
    for i in 0..amps.len() {
        if i & require == require && i & target == 0 {
            amps.swap(i, i ^ flip);
        }
    }
}

pub fn hadamard(state: &mut QuantumState, target: usize) {
    let s = c(FRAC_1_SQRT_2, 0.0);
    mix_pairs(state, target, [[s, s], [s, -s]]);
}

pub fn pauli_x(state: &mut QuantumState, target: usize) {
    state.check_qubit(target);
    let mask = 1usize << target;
    swap_pairs(state, 0, mask, mask);
}

/// `new[i0] = i·old[i1]`, `new[i1] = −i·old[i0]`, both read before either write.
pub fn pauli_y(state: &mut QuantumState, target: usize) {
    state.check_qubit(target);
    let mask = 1usize << target;
    let amps = state.data_mut().as_mut_slice();
    for i0 in 0..amps.len() {
        if i0 & mask != 0 {
            continue;
        }
        let i1 = i0 | mask;
        let (a0, a1) = (amps[i0], amps[i1]);
        amps[i0] = C64::i() * a1;
        amps[i1] = -C64::i() * a0;
    }
}

pub fn pauli_z(state: &mut QuantumState, target: usize) {
    state.check_qubit(target);
    scale_where_set(state, 1usize << target, c(-1.0, 0.0));
}

/// Multiply the |1⟩ half of `target` by `e^{i·angle}`.
pub fn phase(state: &mut QuantumState, target: usize, angle: f64) {
    state.check_qubit(target);
    scale_where_set(state, 1usize << target, C64::from_polar(1.0, angle));
}

pub fn cnot(state: &mut QuantumState, control: usize, target: usize) {
    state.check_qubit(control);
    state.check_qubit(target);
    debug_assert_ne!(control, target, "CNOT control and target must differ");
    let t = 1usize << target;
    swap_pairs(state, 1usize << control, t, t);
}

pub fn swap(state: &mut QuantumState, q1: usize, q2: usize) {
    state.check_qubit(q1);
    state.check_qubit(q2);
    if q1 == q2 {
        return;
    }
    let (m1, m2) = (1usize << q1, 1usize << q2);
    swap_pairs(state, m1, m2, m1 | m2);
}

pub fn toffoli(state: &mut QuantumState, control1: usize, control2: usize, target: usize) {
    state.check_qubit(control1);
    state.check_qubit(control2);
    state.check_qubit(target);
    debug_assert!(target != control1 && target != control2, "Toffoli target overlaps a control");
    let t = 1usize << target;
    swap_pairs(state, (1usize << control1) | (1usize << control2), t, t);
}

pub fn controlled_phase(state: &mut QuantumState, control: usize, target: usize, angle: f64) {
    state.check_qubit(control);
    state.check_qubit(target);
    let mask = (1usize << control) | (1usize << target);
    scale_where_set(state, mask, C64::from_polar(1.0, angle));
}

pub fn rotation_x(state: &mut QuantumState, target: usize, angle: f64) {
    let (ch, sh) = ((angle / 2.0).cos(), (angle / 2.0).sin());
    mix_pairs(state, target, [[c(ch, 0.0), c(0.0, -sh)], [c(0.0, -sh), c(ch, 0.0)]]);
}

pub fn rotation_y(state: &mut QuantumState, target: usize, angle: f64) {
    let (ch, sh) = ((angle / 2.0).cos(), (angle / 2.0).sin());
    mix_pairs(state, target, [[c(ch, 0.0), c(-sh, 0.0)], [c(sh, 0.0), c(ch, 0.0)]]);
}

pub fn rotation_z(state: &mut QuantumState, target: usize, angle: f64) {
    phase(state, target, angle);
}

/// H on `q1` then CNOT(q1 → q2).
pub fn bell_pair(state: &mut QuantumState, q1: usize, q2: usize) {
    hadamard(state, q1);
    cnot(state, q1, q2);
}

/// Parse `pi`, `2pi`, `pi/8`, `-pi/2`, `3pi/4` or a plain number of radians.
pub fn parse_angle(text: &str) -> Option<f64> {
    let t = text.trim().to_ascii_lowercase().replace(' ', "");
    if let Ok(v) = t.parse::<f64>() {
        return v.is_finite().then_some(v);
    }
    let (sign, body) = match t.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, t.as_str()),
    };
    let (num, den) = match body.split_once('/') {
        Some((n, d)) => (n, d.parse::<f64>().ok()?),
        None => (body, 1.0),
    };
    let coeff = match num.strip_suffix("pi")? {
        "" => 1.0,
        k => k.trim_end_matches('*').parse::<f64>().ok()?,
    };
    if den == 0.0 {
        return None;
    }
    Some(sign * coeff * PI / den)
}

fn deserialize_angle<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }
    match Raw::deserialize(d)? {
        Raw::Num(v) => Ok(v),
        Raw::Text(s) => parse_angle(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised angle `{s}`"))),
    }
}

/// Closed set of gates the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum Gate {
    H { target: usize },
    X { target: usize },
    Y { target: usize },
    Z { target: usize },
    Phase {
        target: usize,
        #[serde(deserialize_with = "deserialize_angle")]
        angle: f64,
    },
    Rx {
        target: usize,
        #[serde(deserialize_with = "deserialize_angle")]
        angle: f64,
    },
    Ry {
        target: usize,
        #[serde(deserialize_with = "deserialize_angle")]
        angle: f64,
    },
    Rz {
        target: usize,
        #[serde(deserialize_with = "deserialize_angle")]
        angle: f64,
    },
    Cnot { control: usize, target: usize },
    Swap { a: usize, b: usize },
    Toffoli { control1: usize, control2: usize, target: usize },
    Cphase {
        control: usize,
        target: usize,
        #[serde(deserialize_with = "deserialize_angle")]
        angle: f64,
    },
}

impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H { .. } => "h",
            Gate::X { .. } => "x",
            Gate::Y { .. } => "y",
            Gate::Z { .. } => "z",
            Gate::Phase { .. } => "phase",
            Gate::Rx { .. } => "rx",
            Gate::Ry { .. } => "ry",
            Gate::Rz { .. } => "rz",
            Gate::Cnot { .. } => "cnot",
            Gate::Swap { .. } => "swap",
            Gate::Toffoli { .. } => "toffoli",
            Gate::Cphase { .. } => "cphase",
        }
    }

    /// Qubits touched, controls first.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H { target }
            | Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::Phase { target, .. }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. }
            | Gate::Rz { target, .. } => vec![target],
            Gate::Cnot { control, target } | Gate::Cphase { control, target, .. } => {
                vec![control, target]
            }
            Gate::Swap { a, b } => vec![a, b],
            Gate::Toffoli { control1, control2, target } => vec![control1, control2, target],
        }
    }

    pub fn angle(&self) -> Option<f64> {
        match *self {
            Gate::Phase { angle, .. }
            | Gate::Rx { angle, .. }
            | Gate::Ry { angle, .. }
            | Gate::Rz { angle, .. }
            | Gate::Cphase { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Check indices against a register width before applying.
    pub fn validate(&self, num_qubits: usize) -> QuantumResult<()> {
        let qubits = self.qubits();
        if let Some(&qubit) = qubits.iter().find(|&&q| q >= num_qubits) {
            return Err(QuantumError::QubitOutOfRange { qubit, num_qubits });
        }
        let needs_distinct = matches!(self, Gate::Cnot { .. } | Gate::Toffoli { .. });
        if needs_distinct {
            for (k, q) in qubits.iter().enumerate() {
                if qubits[k + 1..].contains(q) {
                    return Err(QuantumError::invalid_circuit(format!(
                        "{} uses qubit {q} more than once",
                        self.name()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn apply(&self, state: &mut QuantumState) {
        trace!(gate = %self, "apply");
        match *self {
            Gate::H { target } => hadamard(state, target),
            Gate::X { target } => pauli_x(state, target),
            Gate::Y { target } => pauli_y(state, target),
            Gate::Z { target } => pauli_z(state, target),
            Gate::Phase { target, angle } => phase(state, target, angle),
            Gate::Rx { target, angle } => rotation_x(state, target, angle),
            Gate::Ry { target, angle } => rotation_y(state, target, angle),
            Gate::Rz { target, angle } => rotation_z(state, target, angle),
            Gate::Cnot { control, target } => cnot(state, control, target),
            Gate::Swap { a, b } => swap(state, a, b),
            Gate::Toffoli { control1, control2, target } => {
                toffoli(state, control1, control2, target)
            }
            Gate::Cphase { control, target, angle } => {
                controlled_phase(state, control, target, angle)
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits = self
            .qubits()
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",");
        match self.angle() {
            Some(angle) => write!(f, "{}({qubits}; {angle:.4})", self.name()),
            None => write!(f, "{}({qubits})", self.name()),
        }
    }
}

impl QuantumState {
    pub fn apply(&mut self, gate: &Gate) -> &mut Self {
        gate.apply(self);
        self
    }

    pub fn apply_all<'a>(&mut self, gates: impl IntoIterator<Item = &'a Gate>) -> &mut Self {
        for gate in gates {
            gate.apply(self);
        }
        self
    }
}
