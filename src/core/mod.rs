//! Simulation engine: register storage, gates, measurement and the algorithm
//! library built on them.

pub mod algorithms;
pub mod circuit;
pub mod debug; // tracing subscriber setup (QSIM_LOG / QSIM_DEBUG)
pub mod dense;
pub mod error;
pub mod gates;
pub mod measure;
pub mod state;

pub use error::{QuantumError, QuantumResult};
pub use gates::Gate;
pub use measure::{measure, measure_all, ScriptedDraws, UniformSource};
pub use state::{QuantumState, MAX_QUBITS};
