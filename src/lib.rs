//! Dense state-vector quantum simulator: the engine lives in [`core`], the
//! command-line driver in [`cli`] and [`commands`].
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
