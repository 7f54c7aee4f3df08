use std::io::Write;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use crate::commands::session::Session;
use crate::core::circuit::Circuit;

/// Load a TOML circuit, execute it and print what it measured.
pub fn run_circuit_file<W: Write>(s: &mut Session<W>, path: &Path) -> Result<()> {
    let circuit = Circuit::from_toml_file(path)?;
    info!(path = %path.display(), qubits = circuit.qubits, gates = circuit.gate_count(), "running circuit");
    s.heading(&format!("Circuit {}", path.display()))?;

    let report = circuit.run(s.rng())?;
    if report.measurements.is_empty() {
        writeln!(s.out(), "{}", "no measurements".dimmed())?;
    }
    for (qubit, bit) in &report.measurements {
        writeln!(s.out(), "measure q{qubit} -> {bit}")?;
    }
    s.show("Final state:", &report.state)?;
    s.finish(report.state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::fs;

    #[test]
    fn runs_circuit_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flip.toml");
        fs::write(&path, "qubits = 2\n[[steps]]\ngate = \"x\"\ntarget = 1\n[[steps]]\nmeasure = 1\n")
            .unwrap();

        let mut s = Session::new(Settings::default(), Vec::new());
        run_circuit_file(&mut s, &path).unwrap();
        assert!((s.last_state().unwrap().probability(0b10) - 1.0).abs() < 1e-12);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("measure q1 -> 1"));
    }

    #[test]
    fn missing_file_mentions_path() {
        let mut s = Session::new(Settings::default(), Vec::new());
        let err = run_circuit_file(&mut s, Path::new("/nonexistent/c.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/c.toml"));
    }
}
