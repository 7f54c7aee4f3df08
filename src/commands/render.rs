use std::fmt::Write;

use crate::core::state::QuantumState;

/// One `|i>: re + imi` line per amplitude whose magnitude exceeds `threshold`.
pub fn render_state(state: &QuantumState, threshold: f64, precision: usize) -> String {
    let mut out = String::new();
    for (i, z) in state.amplitudes().iter().enumerate() {
        if z.norm() > threshold {
            let _ = writeln!(out, "|{i}>: {:.p$} + {:.p$}i", z.re, z.im, p = precision);
        }
    }
    out
}

/// `value` as `width` binary digits, most significant first.
pub fn binary(value: usize, width: usize) -> String {
    format!("{value:0width$b}")
}
