//! Engine tuning knobs.
//!
//! Defaults come from the constants below. A host may override any subset
//! from a JSON object (missing keys keep their defaults).

use serde::Deserialize;

use super::catalog::{AUTO_ITEMS, CLICK_ITEMS};
use super::economy::scaled_cost;

/// Cost multiplier applied per owned unit (15% per purchase).
pub const UPGRADE_COST_GROWTH: f64 = 1.15;

/// Passive production fires once per second.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Autosave fires every 10 seconds.
pub const AUTOSAVE_INTERVAL_MS: u64 = 10_000;

/// Time away must exceed one minute before offline earnings are granted.
pub const OFFLINE_THRESHOLD_MS: u64 = 60_000;

/// At most 24 hours of production are credited for one absence.
pub const OFFLINE_CAP_MS: u64 = 24 * 60 * 60 * 1_000;

/// Missed production ticks replayed after a stalled frame loop.
pub const MAX_TICK_BACKLOG: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("cost growth must be finite and greater than 1, got {0}")]
    InvalidGrowth(f64),
    #[error("cost growth {growth} leaves the price of `{id}` flat")]
    FlatCostCurve { id: &'static str, growth: f64 },
    #[error("`{0}` must be greater than zero")]
    ZeroInterval(&'static str),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub growth: f64,
    pub tick_interval_ms: u64,
    pub autosave_interval_ms: u64,
    pub offline_threshold_ms: u64,
    pub offline_cap_ms: u64,
    pub max_tick_backlog: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth: UPGRADE_COST_GROWTH,
            tick_interval_ms: TICK_INTERVAL_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            offline_threshold_ms: OFFLINE_THRESHOLD_MS,
            offline_cap_ms: OFFLINE_CAP_MS,
            max_tick_backlog: MAX_TICK_BACKLOG,
        }
    }
}

impl EngineConfig {
    /// Parse an override document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigOverrideError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.growth.is_finite() || self.growth <= 1.0 {
            return Err(ConfigError::InvalidGrowth(self.growth));
        }
        // floor(base × g^n) rises with n for every n once base × (g - 1) >= 1.
        if let Some(item) = CLICK_ITEMS
            .iter()
            .chain(AUTO_ITEMS)
            .find(|item| scaled_cost(item.base_cost, 1, self.growth) <= item.base_cost)
        {
            return Err(ConfigError::FlatCostCurve {
                id: item.id,
                growth: self.growth,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("tickIntervalMs"));
        }
        if self.autosave_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("autosaveIntervalMs"));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigOverrideError {
    #[error("config override is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
