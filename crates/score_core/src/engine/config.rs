//! # Simulation Configuration
//!
//! Tuning knobs of a simulation call, loadable from JSON.
//!
//! ```rust
//! use score_core::engine::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let quick = SimConfig::quick();
//! assert!(quick.runs < config.runs);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use super::attack::DEFAULT_XG_SIGMA;
use crate::error::{Result, SimError};

/// Env var naming an optional JSON config file for `SimConfig::from_env`
pub const SIM_CONFIG_PATH_ENV: &str = "SCORE_SIM_CONFIG_PATH";

pub const DEFAULT_FULLTIME: u32 = 90;
pub const DEFAULT_RUNS: usize = 100;
/// Upper bound on simulated minutes (extra time and stoppage included)
pub const MAX_FULLTIME: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Minutes per simulated match
    pub fulltime: u32,
    /// Independent runs averaged by `play_n`
    pub runs: usize,
    /// Std deviation of the cosmetic per-shot xG sample
    pub xg_sigma: f64,
    /// Fixed seed; drawn from the thread RNG when absent
    pub seed: Option<u64>,
    /// Run `play_n` on the rayon pool
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fulltime: DEFAULT_FULLTIME,
            runs: DEFAULT_RUNS,
            xg_sigma: DEFAULT_XG_SIGMA,
            seed: None,
            parallel: true,
        }
    }
}

impl SimConfig {
    /// Few runs, for previews
    pub fn quick() -> Self {
        Self { runs: 10, ..Self::default() }
    }

    /// One raw match, no averaging
    pub fn single() -> Self {
        Self { runs: 1, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Default config, replaced by the file named in `SCORE_SIM_CONFIG_PATH` if set.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(SIM_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load(path).map_err(|e| {
            SimError::InvalidConfig(format!(
                "failed to load {SIM_CONFIG_PATH_ENV}='{path}': {e}"
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.fulltime == 0 || self.fulltime > MAX_FULLTIME {
            return Err(SimError::InvalidConfig(format!(
                "fulltime must be 1-{MAX_FULLTIME}, got {}",
                self.fulltime
            )));
        }
        // averaging over zero runs
        if self.runs == 0 {
            return Err(SimError::ZeroRuns);
        }
        if !(0.0..=1.0).contains(&self.xg_sigma) {
            return Err(SimError::InvalidConfig(format!(
                "xg_sigma must be 0.0-1.0, got {}",
                self.xg_sigma
            )));
        }
        Ok(())
    }
}
