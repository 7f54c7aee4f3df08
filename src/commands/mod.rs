pub mod demos;
pub mod menu;
pub mod render;
pub mod run;
pub mod session;

use std::io::{self, Write};

use anyhow::Result;

use crate::cli::Command;
use session::Session;

/// Route a parsed subcommand to its driver. `None` opens the menu on stdin.
pub fn dispatch<W: Write>(s: &mut Session<W>, cmd: Option<Command>) -> Result<()> {
    match cmd {
        None | Some(Command::Menu) => menu::start(s, io::stdin().lock()),
        Some(Command::Phase { qubits, angle, target }) => demos::phase(s, qubits, &angle, target),
        Some(Command::Grover { qubits, marked }) => demos::grover(s, qubits, marked),
        Some(Command::DeutschJozsa { oracle }) => demos::deutsch_jozsa_demo(s, &oracle),
        Some(Command::Qft { input }) => demos::qft(s, &input),
        Some(Command::Teleport { input }) => demos::teleport(s, &input),
        Some(Command::ErrorCorrection { input, error }) => demos::error_correction(s, &input, &error),
        Some(Command::Random { bits }) => demos::random(s, bits),
        Some(Command::Walk { positions, steps }) => demos::walk(s, positions, steps),
        Some(Command::PhaseEstimation { phase }) => demos::phase_estimation(s, phase),
        Some(Command::Shor { number }) => demos::shor(s, number),
        Some(Command::Run { file }) => run::run_circuit_file(s, &file),
    }
}
