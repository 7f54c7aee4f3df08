//! Per-invocation driver state: settings, the injected RNG and the output sink.
use std::io::{self, Write};

use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::render::render_state;
use crate::config::Settings;
use crate::core::state::QuantumState;

pub struct Session<W: Write> {
    settings: Settings,
    rng: StdRng,
    out: W,
    last: Option<QuantumState>,
}

impl<W: Write> Session<W> {
    pub fn new(settings: Settings, out: W) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { settings, rng, out, last: None }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Print a heading followed by the visible amplitudes.
    pub fn show(&mut self, label: &str, state: &QuantumState) -> io::Result<()> {
        let body = render_state(state, self.settings.threshold, self.settings.precision);
        writeln!(self.out, "\n{}", label.truecolor(0, 255, 180))?;
        write!(self.out, "{body}")
    }

    pub fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}", format!("=== {title} ===").bold())
    }

    /// Fallback notice for an out-of-range parameter.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {message}", "warn:".yellow().bold())
    }

    /// Remember the register a command ended with (used by `--json`).
    pub fn finish(&mut self, state: QuantumState) {
        self.last = Some(state);
    }

    pub fn last_state(&self) -> Option<&QuantumState> {
        self.last.as_ref()
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
