use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qsim",
    about = "qsim: dense state-vector quantum simulator with algorithm demos",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QsimCli {
    /// Global: verbose engine logging (same as QSIM_DEBUG=1)
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    /// Global: path to settings (TOML); default: ~/.qsim/settings.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: seed for the measurement RNG (overrides the settings file)
    #[arg(long = "seed", value_name = "N", global = true)]
    pub seed: Option<u64>,

    /// Global: write the final register as JSON to FILE
    #[arg(long = "json", value_name = "FILE", global = true)]
    pub json: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Phase gate on a uniform superposition
    Phase {
        #[arg(long = "qubits", default_value_t = 1, allow_negative_numbers = true)]
        qubits: i64,
        /// pi/8, pi/4, pi/2, pi, 2pi or radians
        #[arg(long = "angle", default_value = "pi/4", allow_hyphen_values = true)]
        angle: String,
        #[arg(long = "target", default_value_t = 0, allow_negative_numbers = true)]
        target: i64,
    },

    /// Grover search for one marked basis state
    Grover {
        #[arg(long = "qubits", default_value_t = 3, allow_negative_numbers = true)]
        qubits: i64,
        #[arg(long = "marked", default_value_t = 0, allow_negative_numbers = true)]
        marked: i64,
    },

    /// Deutsch-Jozsa on a 3-qubit register
    DeutschJozsa {
        /// constant0, constant1, balanced-a or balanced-b
        #[arg(long = "oracle", default_value = "constant0")]
        oracle: String,
    },

    /// 3-qubit quantum Fourier transform
    Qft {
        /// zero, one, plus or bits:XYZ
        #[arg(long = "input", default_value = "zero")]
        input: String,
    },

    /// Teleport a prepared qubit between two registers
    Teleport {
        /// zero, one, plus or angle:DEG
        #[arg(long = "input", default_value = "zero")]
        input: String,
    },

    /// Bit-flip repetition code with an optional injected error
    ErrorCorrection {
        /// zero, one or plus
        #[arg(long = "input", default_value = "zero")]
        input: String,
        /// none, q0, q1 or q2
        #[arg(long = "error", default_value = "none")]
        error: String,
    },

    /// Random integer from measured superpositions
    Random {
        #[arg(long = "bits", default_value_t = 4, allow_negative_numbers = true)]
        bits: i64,
    },

    /// Discrete-time quantum walk
    Walk {
        #[arg(long = "positions", default_value_t = 4, allow_negative_numbers = true)]
        positions: i64,
        #[arg(long = "steps", default_value_t = 5, allow_negative_numbers = true)]
        steps: i64,
    },

    /// Phase estimation on a 5-qubit register
    PhaseEstimation {
        /// Fraction of a full turn in [0, 1]
        #[arg(long = "phase", default_value_t = 0.25, allow_negative_numbers = true)]
        phase: f64,
    },

    /// Illustrative Shor period finding on 8 qubits
    Shor {
        #[arg(long = "number", default_value_t = 15, allow_negative_numbers = true)]
        number: i64,
    },

    /// Execute a circuit described in TOML
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Interactive numbered menu (default when no subcommand is given)
    Menu,
}
