use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Trials per oracle run when not configured.
pub const DEFAULT_TRIALS: usize = 75;

/// Market size per trial when not configured.
pub const DEFAULT_SIZE: usize = 15;

/// How many randomized trials an oracle runs, and how large each market is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            size: default_size(),
        }
    }
}

impl OracleConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this shape or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse oracle config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if `trials` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            bail!("trials must be > 0");
        }
        Ok(())
    }
}

const fn default_trials() -> usize {
    DEFAULT_TRIALS
}

const fn default_size() -> usize {
    DEFAULT_SIZE
}
