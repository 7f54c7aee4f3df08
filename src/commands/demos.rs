//! The showcase experiments. Each one validates its raw parameters, falls
//! back to a documented default with a notice, runs the engine and prints the
//! registers it passes through.
use std::f64::consts::PI;
use std::io::Write;
use std::ops::RangeInclusive;

use anyhow::Result;
use colored::Colorize;

use crate::commands::render::binary;
use crate::commands::session::Session;
use crate::core::algorithms::{
    deutsch_jozsa, encode, grover_search, quantum_fourier_transform, quantum_phase_estimation,
    quantum_random_number, quantum_teleportation, quantum_walk_1d, recover, shor_period_finding,
    syndrome, OracleKind,
};
use crate::core::gates::{self, parse_angle};
use crate::core::measure::measure_all;
use crate::core::state::QuantumState;

/// Single-qubit preparation applied before an experiment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prep {
    Zero,
    One,
    Plus,
    /// Ry by this many degrees.
    Degrees(f64),
}

impl Prep {
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.trim().to_ascii_lowercase();
        match t.as_str() {
            "zero" | "0" | "|0>" => Some(Prep::Zero),
            "one" | "1" | "|1>" => Some(Prep::One),
            "plus" | "+" | "|+>" => Some(Prep::Plus),
            _ => t
                .strip_prefix("angle:")
                .and_then(|deg| deg.trim().parse::<f64>().ok())
                .map(Prep::Degrees),
        }
    }

    pub fn apply(self, state: &mut QuantumState, qubit: usize) {
        match self {
            Prep::Zero => {}
            Prep::One => gates::pauli_x(state, qubit),
            Prep::Plus => gates::hadamard(state, qubit),
            Prep::Degrees(deg) => gates::rotation_y(state, qubit, deg * PI / 180.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DjOracle {
    Constant0,
    Constant1,
    BalancedA,
    BalancedB,
}

impl DjOracle {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "constant0" | "constant-0" => Some(DjOracle::Constant0),
            "constant1" | "constant-1" => Some(DjOracle::Constant1),
            "balanced-a" | "balanceda" => Some(DjOracle::BalancedA),
            "balanced-b" | "balancedb" => Some(DjOracle::BalancedB),
            _ => None,
        }
    }
}

fn pick<W: Write>(
    s: &mut Session<W>,
    value: i64,
    range: RangeInclusive<i64>,
    default: usize,
    what: &str,
) -> Result<usize> {
    if range.contains(&value) {
        return Ok(value as usize);
    }
    s.notice(&format!("Invalid {what} {value}. Using {default}."))?;
    Ok(default)
}

fn prep_or_zero<W: Write>(s: &mut Session<W>, input: &str) -> Result<Prep> {
    Ok(match Prep::parse(input) {
        Some(p) => p,
        None => {
            s.notice(&format!("Unknown input state `{input}`. Using |0>."))?;
            Prep::Zero
        }
    })
}

pub fn phase<W: Write>(s: &mut Session<W>, qubits: i64, angle: &str, target: i64) -> Result<()> {
    s.heading("Phase Gate Experiment")?;
    let n = pick(s, qubits, 1..=4, 1, "number of qubits")?;
    let mut state = QuantumState::new(n)?;
    for q in 0..n {
        gates::hadamard(&mut state, q);
    }
    s.show("Initial superposition state:", &state)?;

    let angle = match parse_angle(angle) {
        Some(a) => a,
        None => {
            s.notice(&format!("Unrecognised angle `{angle}`. Using pi/4."))?;
            PI / 4.0
        }
    };
    if (0..n as i64).contains(&target) {
        gates::phase(&mut state, target as usize, angle);
        s.show(&format!("Applying Phase({angle:.2}) to qubit {target}:"), &state)?;
    } else {
        s.notice("Invalid target qubit.")?;
    }
    s.finish(state);
    Ok(())
}

pub fn grover<W: Write>(s: &mut Session<W>, qubits: i64, marked: i64) -> Result<()> {
    s.heading("Grover's Search Algorithm")?;
    let n = pick(s, qubits, 2..=4, 3, "number of qubits")?;
    let marked = pick(s, marked, 0..=(1i64 << n) - 1, 0, "state")?;

    let mut state = QuantumState::new(n)?;
    writeln!(s.out(), "Searching for state |{marked}>")?;
    let iterations = grover_search(&mut state, marked);
    s.show(&format!("After {iterations} Grover iteration(s):"), &state)?;

    let result = measure_all(&mut state, s.rng());
    writeln!(s.out(), "Final measurement: |{result}>")?;
    s.finish(state);
    Ok(())
}

pub fn deutsch_jozsa_demo<W: Write>(s: &mut Session<W>, oracle: &str) -> Result<()> {
    s.heading("Deutsch-Jozsa Algorithm")?;
    let oracle = match DjOracle::parse(oracle) {
        Some(o) => o,
        None => {
            s.notice(&format!("Invalid oracle `{oracle}`. Using constant0."))?;
            DjOracle::Constant0
        }
    };

    let mut state = QuantumState::new(3)?;
    match oracle {
        DjOracle::Constant0 => deutsch_jozsa(&mut state, true),
        DjOracle::Constant1 => {
            gates::pauli_x(&mut state, 0);
            deutsch_jozsa(&mut state, true);
        }
        DjOracle::BalancedA => deutsch_jozsa(&mut state, false),
        DjOracle::BalancedB => {
            gates::pauli_x(&mut state, 1);
            deutsch_jozsa(&mut state, false);
        }
    }
    s.show("Final state:", &state)?;

    let outcome = measure_all(&mut state.clone(), s.rng());
    let prepared = matches!(oracle, DjOracle::Constant1 | DjOracle::BalancedB);
    if prepared {
        // The all-zero reading rule only holds for a |000> input.
        writeln!(s.out(), "Measured |{outcome}> (input prepared with X)")?;
        writeln!(s.out(), "If measured |0> from |000>, function is constant")?;
        writeln!(s.out(), "Otherwise, function is balanced")?;
    } else {
        let verdict = match OracleKind::from_outcome(outcome) {
            OracleKind::Constant => "constant",
            OracleKind::Balanced => "balanced",
        };
        writeln!(s.out(), "Measured |{outcome}> => function is {}", verdict.bold())?;
    }
    s.finish(state);
    Ok(())
}

pub fn qft<W: Write>(s: &mut Session<W>, input: &str) -> Result<()> {
    s.heading("Quantum Fourier Transform")?;
    let mut state = QuantumState::new(3)?;
    let t = input.trim().to_ascii_lowercase();
    match t.as_str() {
        "zero" | "0" | "|0>" => {}
        "one" | "1" | "|1>" => gates::pauli_x(&mut state, 0),
        "plus" | "+" | "|+>" => (0..3).for_each(|q| gates::hadamard(&mut state, q)),
        _ => match t.strip_prefix("bits:") {
            Some(bits) if bits.len() == 3 && bits.chars().all(|c| c == '0' || c == '1') => {
                for (q, c) in bits.chars().enumerate() {
                    if c == '1' {
                        gates::pauli_x(&mut state, q);
                    }
                }
            }
            _ => s.notice(&format!("Unknown input state `{input}`. Using |0>."))?,
        },
    }
    s.show("Initial state:", &state)?;
    quantum_fourier_transform(&mut state);
    s.show("After QFT:", &state)?;
    s.finish(state);
    Ok(())
}

pub fn teleport<W: Write>(s: &mut Session<W>, input: &str) -> Result<()> {
    s.heading("Quantum Teleportation")?;
    let prep = prep_or_zero(s, input)?;
    let mut source = QuantumState::new(2)?;
    let mut target = QuantumState::new(2)?;
    prep.apply(&mut source, 0);
    s.show("Initial source state:", &source)?;

    let out = quantum_teleportation(&mut source, &mut target, 0, 1, s.rng());
    writeln!(s.out(), "\nClassical bits sent: m1 = {}, m2 = {}", out.m1, out.m2)?;
    s.show("Final target state:", &target)?;
    s.finish(target);
    Ok(())
}

pub fn error_correction<W: Write>(s: &mut Session<W>, input: &str, error: &str) -> Result<()> {
    s.heading("Quantum Error Correction")?;
    let prep = prep_or_zero(s, input)?;
    let flip = match error.trim().to_ascii_lowercase().as_str() {
        "none" | "" => None,
        "q0" => Some(0),
        "q1" => Some(1),
        "q2" => Some(2),
        other => {
            s.notice(&format!("Unknown error `{other}`. Using none."))?;
            None
        }
    };

    let mut state = QuantumState::new(3)?;
    prep.apply(&mut state, 0);
    s.show("Initial state:", &state)?;
    encode(&mut state, 0);
    s.show("Encoded with the 3-qubit code:", &state)?;
    if let Some(q) = flip {
        gates::pauli_x(&mut state, q);
    }
    s.show("State after error:", &state)?;

    let syn = syndrome(&mut state, 0, s.rng());
    writeln!(s.out(), "\nSyndrome: {}{}", syn.s1, syn.s2)?;
    recover(&mut state, 0, syn);
    s.show("Corrected state:", &state)?;
    s.finish(state);
    Ok(())
}

pub fn random<W: Write>(s: &mut Session<W>, bits: i64) -> Result<()> {
    s.heading("Quantum Random Number Generator")?;
    let n = pick(s, bits, 1..=8, 4, "number of bits")?;
    let mut state = QuantumState::new(n)?;
    let value = quantum_random_number(&mut state, n, s.rng());
    writeln!(s.out(), "Random number: {value} (binary: {})", binary(value, n))?;
    s.finish(state);
    Ok(())
}

pub fn walk<W: Write>(s: &mut Session<W>, positions: i64, steps: i64) -> Result<()> {
    s.heading("Quantum Walk Simulation")?;
    let n = pick(s, positions, 2..=6, 4, "number of positions")?;
    let steps = pick(s, steps, 1..=10, 5, "number of steps")?;
    let mut state = QuantumState::new(n)?;
    s.show("Initial state (particle at position 0):", &state)?;
    quantum_walk_1d(&mut state, steps);
    s.show(&format!("Distribution after {steps} step(s):"), &state)?;
    s.finish(state);
    Ok(())
}

pub fn phase_estimation<W: Write>(s: &mut Session<W>, phase: f64) -> Result<()> {
    s.heading("Quantum Phase Estimation")?;
    let phase = if (0.0..=1.0).contains(&phase) {
        phase
    } else {
        s.notice(&format!("Invalid phase {phase}. Using 0.25."))?;
        0.25
    };
    let mut state = QuantumState::new(5)?;
    writeln!(s.out(), "Estimating phase {phase:.4}")?;
    quantum_phase_estimation(&mut state, phase * 2.0 * PI);
    s.show("Final state:", &state)?;
    s.finish(state);
    Ok(())
}

pub fn shor<W: Write>(s: &mut Session<W>, number: i64) -> Result<()> {
    s.heading("Shor's Period Finding")?;
    let number = pick(s, number, 3..=15, 15, "number")? as u64;
    let mut state = QuantumState::new(8)?;
    writeln!(s.out(), "Finding period for f(x) = a^x mod {number}")?;

    let period = shor_period_finding(&mut state, number as u32, s.rng());
    writeln!(s.out(), "Found period: {period}")?;
    if period > 0 && period % 2 == 0 {
        let half_power = 1u64 << (period / 2);
        writeln!(
            s.out(),
            "Potential factors: {} and {}",
            (half_power + 1) % number,
            (half_power - 1) % number
        )?;
    }
    s.finish(state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn session() -> Session<Vec<u8>> {
        Session::new(Settings { seed: Some(11), ..Settings::default() }, Vec::new())
    }

    fn text(s: Session<Vec<u8>>) -> String {
        String::from_utf8(s.into_output()).unwrap()
    }

    #[test]
    fn prep_parsing() {
        assert_eq!(Prep::parse("plus"), Some(Prep::Plus));
        assert_eq!(Prep::parse("angle:90"), Some(Prep::Degrees(90.0)));
        assert_eq!(Prep::parse("angle:x"), None);
        assert_eq!(DjOracle::parse("Balanced_B"), Some(DjOracle::BalancedB));
    }

    #[test]
    fn invalid_parameters_fall_back() {
        let mut s = session();
        grover(&mut s, 9, -2).unwrap();
        assert_eq!(s.last_state().unwrap().num_qubits(), 3);
        let out = text(s);
        assert!(out.contains("Invalid number of qubits 9. Using 3."));
        assert!(out.contains("Searching for state |0>"));
    }

    #[test]
    fn phase_rejects_bad_target_but_keeps_state() {
        let mut s = session();
        phase(&mut s, 2, "pi/2", 5).unwrap();
        assert_eq!(s.last_state().unwrap().num_qubits(), 2);
        assert!(text(s).contains("Invalid target qubit."));
    }

    #[test]
    fn error_correction_restores_codeword() {
        let mut s = session();
        error_correction(&mut s, "zero", "q2").unwrap();
        assert!((s.last_state().unwrap().probability(0) - 1.0).abs() < 1e-12);
        assert!(text(s).contains("Syndrome: 01"));
    }

    #[test]
    fn constant_oracle_verdict() {
        let mut s = session();
        deutsch_jozsa_demo(&mut s, "constant0").unwrap();
        assert!(text(s).contains("Measured |0>"));
    }

    #[test]
    fn prepared_oracle_prints_reading_rule_not_verdict() {
        let mut s = session();
        deutsch_jozsa_demo(&mut s, "constant1").unwrap();
        let out = text(s);
        assert!(out.contains("Measured |1> (input prepared with X)"));
        assert!(!out.contains("=> function is"));
    }

    #[test]
    fn balanced_oracle_verdict() {
        let mut s = session();
        deutsch_jozsa_demo(&mut s, "balanced-a").unwrap();
        assert!(text(s).contains("Measured |7> => function is"));
    }

    #[test]
    fn qft_bits_input() {
        let mut s = session();
        qft(&mut s, "bits:100").unwrap();
        let state = s.last_state().unwrap();
        assert!(state.probabilities().iter().all(|p| (p - 0.125).abs() < 1e-12));
    }

    #[test]
    fn every_demo_leaves_a_normalized_register() {
        let mut s = session();
        phase(&mut s, 3, "pi", 1).unwrap();
        teleport(&mut s, "angle:60").unwrap();
        random(&mut s, 5).unwrap();
        walk(&mut s, 3, 2).unwrap();
        phase_estimation(&mut s, 0.5).unwrap();
        shor(&mut s, 21).unwrap();
        assert!(s.last_state().unwrap().is_normalized(1e-9));
        let out = text(s);
        assert!(out.contains("Invalid number 21. Using 15."));
        assert!(out.contains("Found period:"));
    }
}
