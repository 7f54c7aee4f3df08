//! Optional user settings: `~/.qsim/settings.toml` or `--config FILE`.
//!
//! ```toml
//! seed = 42          # omit for an entropy-seeded generator
//! threshold = 0.001  # hide amplitudes at or below this magnitude
//! precision = 3      # decimals when printing amplitudes
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub seed: Option<u64>,
    pub threshold: f64,
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { seed: None, threshold: 0.001, precision: 3 }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.qsim\settings.toml on Windows; ~/.qsim/settings.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".qsim").join("settings.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing settings")
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    /// An explicit `--config` must load; the default file is optional and a
    /// broken one only produces a warning.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        if let Some(p) = cli_path {
            return Self::from_toml_file(p);
        }
        match resolve_config_path(cli_path) {
            Some(p) if p.exists() => Ok(Self::from_toml_file(&p).unwrap_or_else(|e| {
                warn!("failed loading {}: {e:#}; using defaults", p.display());
                Self::default()
            })),
            _ => Ok(Self::default()),
        }
    }
}
