//! Fixed compositions of gates and measurements.
//!
//! Each entry point expects a register sized for its layout; the layout is
//! documented per function and not re-derived here.

pub mod deutsch_jozsa;
pub mod error_correction;
pub mod fourier;
pub mod grover;
pub mod sampling;
pub mod teleport;

pub use deutsch_jozsa::{deutsch_jozsa, OracleKind};
pub use error_correction::{encode, recover, syndrome, Syndrome};
pub use fourier::{qft_on, quantum_fourier_transform, quantum_phase_estimation, shor_period_finding};
pub use grover::{grover_diffusion, grover_iterations, grover_oracle, grover_search};
pub use sampling::{quantum_random_number, quantum_walk_1d};
pub use teleport::{quantum_teleportation, TeleportOutcome};
