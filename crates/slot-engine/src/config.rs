//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paytable::DEFAULT_MAX_EXPANSIONS;

/// Tunables shared by every machine built from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal digits kept by every statistic
    pub stat_precision: u32,

    /// Upper bound on patterns one wildcard rule may expand into
    pub max_pattern_expansions: usize,

    /// Upper bound on spins in one play round, free spins included
    pub max_spins_per_round: u32,

    /// Seed for shared generators (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stat_precision: 6,
            max_pattern_expansions: DEFAULT_MAX_EXPANSIONS,
            max_spins_per_round: 100,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reproducible draws for tests and replays
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Builder: set statistic precision
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.stat_precision = digits;
        self
    }

    /// Builder: cap spins per round
    pub fn with_max_spins(mut self, spins: u32) -> Self {
        self.max_spins_per_round = spins;
        self
    }

    /// Round `value` to `stat_precision` digits; infinities pass through
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let scale = 10f64.powi(self.stat_precision as i32);
        (value * scale).round() / scale
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Import from YAML; missing fields take defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }
}
