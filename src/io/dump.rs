//! Atomic JSON dumps of a final register.
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use num_complex::Complex64 as C64;
use serde::Serialize;

use crate::core::state::QuantumState;

#[derive(Serialize)]
struct StateDump<'a> {
    num_qubits: usize,
    /// `[re, im]` pairs indexed by basis state.
    amplitudes: &'a [C64],
    probabilities: Vec<f64>,
}

/// Write through a temp file in the destination directory, then rename.
pub fn atomic_write(dest: impl AsRef<Path>, bytes: impl AsRef<[u8]>) -> io::Result<()> {
    let dest = dest.as_ref();
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes.as_ref())?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

pub fn state_json(state: &QuantumState) -> Result<String> {
    let dump = StateDump {
        num_qubits: state.num_qubits(),
        amplitudes: state.amplitudes(),
        probabilities: state.probabilities(),
    };
    serde_json::to_string_pretty(&dump).context("serializing state")
}

pub fn write_state_json(dest: &Path, state: &QuantumState) -> Result<()> {
    let json = state_json(state)?;
    atomic_write(dest, json).with_context(|| format!("writing {}", dest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_round_trips_through_serde_json() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("state.json");
        let state = QuantumState::basis(2, 2).unwrap();
        write_state_json(&dest, &state).unwrap();

        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(v["num_qubits"], 2);
        assert_eq!(v["amplitudes"][2][0], 1.0);
        assert_eq!(v["probabilities"][0], 0.0);
    }
}
