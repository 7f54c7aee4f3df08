//! Interactive numbered menu. Reads choices and parameters line by line from
//! any `BufRead`, so it can be driven from stdin or a test script.
use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use crate::commands::demos;
use crate::commands::session::Session;

const ITEMS: [&str; 11] = [
    "Phase Gate Experiment",
    "Grover's Search Algorithm",
    "Deutsch-Jozsa Algorithm",
    "Quantum Fourier Transform",
    "Quantum Teleportation",
    "Quantum Error Correction",
    "Quantum Random Number Generator",
    "Quantum Walk Simulation",
    "Quantum Phase Estimation",
    "Shor's Period Finding",
    "Exit",
];

fn banner<W: Write>(s: &mut Session<W>) -> Result<()> {
    writeln!(s.out(), "\n{}", "Quantum Computing Simulator".bold().truecolor(0, 255, 180))?;
    for (i, item) in ITEMS.iter().enumerate() {
        writeln!(s.out(), "{:>2}. {item}", i + 1)?;
    }
    Ok(())
}

/// `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask<W: Write, R: BufRead>(s: &mut Session<W>, input: &mut R, prompt: &str) -> Result<String> {
    write!(s.out(), "{prompt}")?;
    s.out().flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}

/// Unparsable answers become -1, which every range check rejects.
fn ask_int<W: Write, R: BufRead>(s: &mut Session<W>, input: &mut R, prompt: &str) -> Result<i64> {
    Ok(ask(s, input, prompt)?.parse().unwrap_or(-1))
}

fn ask_float<W: Write, R: BufRead>(s: &mut Session<W>, input: &mut R, prompt: &str) -> Result<f64> {
    Ok(ask(s, input, prompt)?.parse().unwrap_or(-1.0))
}

pub fn start<W: Write, R: BufRead>(s: &mut Session<W>, mut input: R) -> Result<()> {
    loop {
        banner(s)?;
        write!(s.out(), "Enter your choice (1-11): ")?;
        s.out().flush()?;
        let Some(line) = read_line(&mut input)? else {
            writeln!(s.out())?;
            break;
        };

        match line.parse::<u32>().unwrap_or(0) {
            1 => {
                let qubits = ask_int(s, &mut input, "Enter number of qubits (1-4): ")?;
                let angle = ask(s, &mut input, "Enter phase angle (pi/8, pi/4, pi/2, pi, 2pi): ")?;
                let target = ask_int(s, &mut input, "Enter target qubit: ")?;
                demos::phase(s, qubits, &angle, target)?;
            }
            2 => {
                let qubits = ask_int(s, &mut input, "Enter number of qubits (2-4): ")?;
                let marked = ask_int(s, &mut input, "Enter state to search for: ")?;
                demos::grover(s, qubits, marked)?;
            }
            3 => {
                writeln!(s.out(), "1. Constant (f(x) = 0)\n2. Constant (f(x) = 1)")?;
                writeln!(s.out(), "3. Balanced (first half)\n4. Balanced (second half)")?;
                let oracle = match ask_int(s, &mut input, "Choose oracle (1-4): ")? {
                    1 => "constant0",
                    2 => "constant1",
                    3 => "balanced-a",
                    4 => "balanced-b",
                    _ => "",
                };
                demos::deutsch_jozsa_demo(s, oracle)?;
            }
            4 => {
                writeln!(s.out(), "1. |0>\n2. |1>\n3. |+>\n4. Custom bits")?;
                let input_state = match ask_int(s, &mut input, "Choose input state (1-4): ")? {
                    1 => "zero".to_string(),
                    2 => "one".to_string(),
                    3 => "plus".to_string(),
                    4 => format!("bits:{}", ask(s, &mut input, "Enter 3 bits for qubits 0,1,2: ")?),
                    _ => String::new(),
                };
                demos::qft(s, &input_state)?;
            }
            5 => {
                writeln!(s.out(), "1. |0>\n2. |1>\n3. |+>\n4. Custom rotation")?;
                let input_state = match ask_int(s, &mut input, "Choose state to teleport (1-4): ")? {
                    1 => "zero".to_string(),
                    2 => "one".to_string(),
                    3 => "plus".to_string(),
                    4 => format!("angle:{}", ask(s, &mut input, "Enter rotation angle in degrees: ")?),
                    _ => String::new(),
                };
                demos::teleport(s, &input_state)?;
            }
            6 => {
                writeln!(s.out(), "1. |0>\n2. |1>\n3. |+>")?;
                let input_state = match ask_int(s, &mut input, "Choose state to protect (1-3): ")? {
                    1 => "zero",
                    2 => "one",
                    3 => "plus",
                    _ => "",
                };
                writeln!(s.out(), "1. No error\n2. Bit flip on qubit 0\n3. Bit flip on qubit 1\n4. Bit flip on qubit 2")?;
                let error = match ask_int(s, &mut input, "Choose error (1-4): ")? {
                    1 => "none",
                    2 => "q0",
                    3 => "q1",
                    4 => "q2",
                    _ => "?",
                };
                demos::error_correction(s, input_state, error)?;
            }
            7 => {
                let bits = ask_int(s, &mut input, "Enter number of bits (1-8): ")?;
                demos::random(s, bits)?;
            }
            8 => {
                let positions = ask_int(s, &mut input, "Enter number of positions (2-6): ")?;
                let steps = ask_int(s, &mut input, "Enter number of steps (1-10): ")?;
                demos::walk(s, positions, steps)?;
            }
            9 => {
                let phase = ask_float(s, &mut input, "Enter phase to estimate (0-1): ")?;
                demos::phase_estimation(s, phase)?;
            }
            10 => {
                let number = ask_int(s, &mut input, "Enter number to factor (3-15): ")?;
                demos::shor(s, number)?;
            }
            11 => {
                writeln!(s.out(), "Thank you for using the Quantum Computing Simulator!")?;
                break;
            }
            _ => writeln!(s.out(), "Invalid choice. Please try again.")?,
        }

        write!(s.out(), "\nPress Enter to continue...")?;
        s.out().flush()?;
        if read_line(&mut input)?.is_none() {
            writeln!(s.out())?;
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn run_script(script: &str) -> (String, bool) {
        let mut s = Session::new(Settings { seed: Some(3), ..Settings::default() }, Vec::new());
        start(&mut s, script.as_bytes()).unwrap();
        let has_state = s.last_state().is_some();
        (String::from_utf8(s.into_output()).unwrap(), has_state)
    }

    #[test]
    fn runs_a_demo_then_exits() {
        let (out, has_state) = run_script("7\n4\n\n11\n");
        assert!(out.contains("Random number:"));
        assert!(out.contains("Thank you for using the Quantum Computing Simulator!"));
        assert!(has_state);
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let (out, has_state) = run_script("");
        assert!(out.contains("Enter your choice (1-11): "));
        assert!(!has_state);
    }

    #[test]
    fn invalid_choice_is_reported() {
        let (out, _) = run_script("42\n\n11\n");
        assert!(out.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn bad_parameters_use_defaults() {
        let (out, _) = run_script("8\nmany\n0\n\n11\n");
        assert!(out.contains("Invalid number of positions -1. Using 4."));
        assert!(out.contains("Invalid number of steps 0. Using 5."));
    }
}
