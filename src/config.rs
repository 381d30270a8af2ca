//! Transformer configuration
//!
//! Loaded from JSON. Every field has a default, so a partial file (or no
//! file at all) is valid.

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::eop::CELESTRAK_EOP_URL;
use crate::error::{FrameError, FrameResult};

const CONFIG_FILE: &str = "config.json";

/// Which strategy a configured transformer should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreference {
    /// High precision when available, sidereal rotation otherwise
    #[default]
    Auto,
    /// Always use the sidereal rotation
    ReducedPrecision,
    /// Require the high-precision service
    HighPrecision,
}

/// Earth orientation data settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EopConfig {
    pub source_url: String,
    pub cache_expiration_days: i64,
    /// Treat instants outside the EOP table as "high precision unavailable"
    pub require_coverage: bool,
}

impl Default for EopConfig {
    fn default() -> Self {
        Self {
            source_url: CELESTRAK_EOP_URL.to_string(),
            cache_expiration_days: 7,
            require_coverage: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub strategy: StrategyPreference,
    /// Fixed UT1-UTC (seconds) applied by the reduced-precision clock
    pub dut1_seconds: f64,
    pub eop: EopConfig,
}

impl FrameConfig {
    /// Platform config file location, e.g. `~/.config/earthframes/config.json` on Linux
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "earthframes").map(|d| d.config_dir().join(CONFIG_FILE))
    }

    /// Load and validate a JSON config file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: FrameConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from [`Self::default_path`]; a missing file yields defaults.
    pub fn load_default() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> FrameResult<()> {
        // UT1-UTC is kept within 0.9 s by leap seconds
        if !self.dut1_seconds.is_finite() || self.dut1_seconds.abs() > 0.9 {
            return Err(FrameError::Config(format!(
                "dut1_seconds must be within ±0.9 s, got {}",
                self.dut1_seconds
            )));
        }
        if self.eop.cache_expiration_days < 0 {
            return Err(FrameError::Config(format!(
                "eop.cache_expiration_days must be non-negative, got {}",
                self.eop.cache_expiration_days
            )));
        }
        Ok(())
    }
}
