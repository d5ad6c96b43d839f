//! Configuration for histograms created by aggregation hosts

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tie_break::DEFAULT_SEED;

/// Environment variable holding a JSON `HistogramConfig`
pub const CONFIG_ENV_VAR: &str = "APPROX_HISTOGRAM_CONFIG";

/// Settings applied to every histogram an aggregation host creates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Steady-state number of bins; the store may hold twice as many between trims
    pub target_bin_count: usize,

    /// Seed of the generator breaking trim ties
    pub seed: u64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            target_bin_count: 10_000,
            seed: DEFAULT_SEED,
        }
    }
}

impl HistogramConfig {
    /// Load configuration from environment variable or use defaults
    pub fn from_env() -> Result<Self> {
        if let Ok(config_json) = std::env::var(CONFIG_ENV_VAR) {
            let config: Self = serde_json::from_str(&config_json)
                .with_context(|| format!("Failed to parse {CONFIG_ENV_VAR}"))?;
            config.validate()?;
            log::debug!("histogram config from environment: {config:?}");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_bin_count == 0 {
            anyhow::bail!("target_bin_count must be at least 1");
        }
        Ok(())
    }
}
