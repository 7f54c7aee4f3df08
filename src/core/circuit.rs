//! Circuit programs loaded from TOML.
//!
//! ```toml
//! qubits = 2
//! initial = 0          # optional basis index
//! [[steps]]
//! gate = "h"
//! target = 0
//! [[steps]]
//! gate = "cnot"
//! control = 0
//! target = 1
//! [[steps]]
//! measure = 1
//! ```
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{QuantumError, QuantumResult};
use crate::core::gates::Gate;
use crate::core::measure::{measure, UniformSource};
use crate::core::state::{QuantumState, MAX_QUBITS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Measure { measure: usize },
    Gate(Gate),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub qubits: usize,
    #[serde(default)]
    pub initial: usize,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Final register plus every classical bit read along the way.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub state: QuantumState,
    /// `(qubit, bit)` in execution order.
    pub measurements: Vec<(usize, u8)>,
}

impl Circuit {
    pub fn from_toml_str(text: &str) -> QuantumResult<Self> {
        let circuit: Circuit =
            toml::from_str(text).map_err(|e| QuantumError::invalid_circuit(e.to_string()))?;
        circuit.validate()?;
        Ok(circuit)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn validate(&self) -> QuantumResult<()> {
        if self.qubits > MAX_QUBITS {
            return Err(QuantumError::too_many(self.qubits));
        }
        if self.qubits == 0 {
            return Err(QuantumError::NoQubits);
        }
        if self.initial >= 1usize << self.qubits {
            return Err(QuantumError::InvalidState(format!(
                "initial basis index {} outside a {}-qubit register",
                self.initial, self.qubits
            )));
        }
        for (k, step) in self.steps.iter().enumerate() {
            let checked = match step {
                Step::Gate(gate) => gate.validate(self.qubits),
                Step::Measure { measure } if *measure >= self.qubits => {
                    Err(QuantumError::QubitOutOfRange { qubit: *measure, num_qubits: self.qubits })
                }
                Step::Measure { .. } => Ok(()),
            };
            checked.map_err(|e| QuantumError::invalid_circuit(format!("step {}: {e}", k + 1)))?;
        }
        Ok(())
    }

    pub fn gate_count(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s, Step::Gate(_))).count()
    }

    /// Validates, then executes every step from the `initial` basis state.
    pub fn run<R: UniformSource + ?Sized>(&self, rng: &mut R) -> QuantumResult<RunReport> {
        self.validate()?;
        let mut state = QuantumState::basis(self.qubits, self.initial)?;
        let mut measurements = Vec::new();
        for step in &self.steps {
            match step {
                Step::Gate(gate) => gate.apply(&mut state),
                Step::Measure { measure: q } => {
                    measurements.push((*q, measure(&mut state, *q, rng)));
                }
            }
        }
        debug!(qubits = self.qubits, steps = self.steps.len(), "circuit finished");
        Ok(RunReport { state, measurements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measure::ScriptedDraws;
    use std::f64::consts::PI;

    const BELL: &str = r#"
qubits = 2

[[steps]]
gate = "h"
target = 0

[[steps]]
gate = "cnot"
control = 0
target = 1

[[steps]]
measure = 0

[[steps]]
measure = 1
"#;

    #[test]
    fn parses_gates_and_measurements() {
        let c = Circuit::from_toml_str(BELL).unwrap();
        assert_eq!(c.qubits, 2);
        assert_eq!(c.steps.len(), 4);
        assert_eq!(c.steps[1], Step::Gate(Gate::Cnot { control: 0, target: 1 }));
        assert_eq!(c.steps[2], Step::Measure { measure: 0 });
        assert_eq!(c.gate_count(), 2);
    }

    #[test]
    fn bell_measurements_agree() {
        let c = Circuit::from_toml_str(BELL).unwrap();
        let mut rng = ScriptedDraws::new(vec![0.9, 0.1]);
        let report = c.run(&mut rng).unwrap();
        assert_eq!(report.measurements, vec![(0, 1), (1, 1)]);
        assert!((report.state.probability(0b11) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn angle_accepts_expressions() {
        let c = Circuit::from_toml_str(
            "qubits = 1\n[[steps]]\ngate = \"phase\"\ntarget = 0\nangle = \"pi/4\"\n",
        )
        .unwrap();
        assert_eq!(c.steps[0], Step::Gate(Gate::Phase { target: 0, angle: PI / 4.0 }));
    }

    #[test]
    fn rejects_out_of_range_steps() {
        let err = Circuit::from_toml_str("qubits = 2\n[[steps]]\nmeasure = 2\n").unwrap_err();
        assert!(err.to_string().contains("step 1"));
        let err = Circuit::from_toml_str("qubits = 17\n").unwrap_err();
        assert_eq!(err, QuantumError::TooManyQubits { requested: 17, max: 16 });
        assert!(Circuit::from_toml_str("qubits = 2\ninitial = 4\n").is_err());
    }

    #[test]
    fn header_checks_need_no_register() {
        let wide = Circuit { qubits: 16, initial: 1 << 16, steps: vec![] };
        assert!(matches!(wide.validate(), Err(QuantumError::InvalidState(_))));
        let empty = Circuit { qubits: 0, initial: 0, steps: vec![] };
        assert_eq!(empty.validate(), Err(QuantumError::NoQubits));
        let last = Circuit { qubits: 3, initial: 7, steps: vec![Step::Measure { measure: 2 }] };
        assert!(last.validate().is_ok());
        let report = last.run(&mut ScriptedDraws::new(vec![0.5])).unwrap();
        assert_eq!(report.measurements, vec![(2, 1)]);
    }

    #[test]
    fn rejects_unknown_gate() {
        assert!(Circuit::from_toml_str("qubits = 1\n[[steps]]\ngate = \"warp\"\ntarget = 0\n").is_err());
    }
}
