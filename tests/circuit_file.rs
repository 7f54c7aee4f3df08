use std::fs;

use qsim::core::circuit::Circuit;
use qsim::core::measure::ScriptedDraws;

const GHZ: &str = r#"
qubits = 3
initial = 0

[[steps]]
gate = "h"
target = 0

[[steps]]
gate = "cnot"
control = 0
target = 1

[[steps]]
gate = "toffoli"
control1 = 0
control2 = 1
target = 2

[[steps]]
gate = "cphase"
control = 0
target = 2
angle = "pi"

[[steps]]
measure = 2
"#;

#[test]
fn ghz_circuit_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghz.toml");
    fs::write(&path, GHZ).unwrap();

    let circuit = Circuit::from_toml_file(&path).unwrap();
    assert_eq!(circuit.gate_count(), 4);

    let report = circuit.run(&mut ScriptedDraws::new(vec![0.75])).unwrap();
    assert_eq!(report.measurements, vec![(2, 1)]);
    let amp = report.state.amplitude(0b111);
    assert!((amp.re + 1.0).abs() < 1e-12);
}

#[test]
fn broken_file_reports_path_and_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "qubits = 2\n[[steps]]\ngate = \"cnot\"\ncontrol = 1\ntarget = 1\n").unwrap();

    let err = Circuit::from_toml_file(&path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("bad.toml"));
    assert!(msg.contains("invalid circuit"));
}
