//! Service configuration.
//!
//! ```toml
//! max_count = 1000000
//! pi_point_limit = 1000
//! curve_point_limit = 200
//! seed = 42          # optional, makes every unseeded request reproducible
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SamplingError};
use crate::montecarlo::DEFAULT_POINT_LIMIT;

/// Upper bound on any requested count unless configured otherwise.
pub const DEFAULT_MAX_COUNT: usize = 1_000_000;

/// Default cap on pmf points tabulated for a discrete distribution.
pub const DEFAULT_CURVE_POINT_LIMIT: usize = 200;

/// Limits and defaults applied by [`crate::service::SamplingService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Largest `size`/`samples` a request may ask for.
    pub max_count: usize,
    /// Points echoed back with a π estimate.
    pub pi_point_limit: usize,
    /// Most pmf points returned in a binomial or Poisson `theoretical.curve`.
    pub curve_point_limit: usize,
    /// Seed used when a request carries none. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            pi_point_limit: DEFAULT_POINT_LIMIT,
            curve_point_limit: DEFAULT_CURVE_POINT_LIMIT,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SamplingConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_count == 0 {
            return Err(SamplingError::Config {
                message: "max_count must be positive".into(),
            });
        }
        Ok(())
    }
}
