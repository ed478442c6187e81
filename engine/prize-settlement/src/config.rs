//! Configuration for the prize settlement engine

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chips::TieBreak;
use crate::error::{Result, SettlementError};
use crate::fee_schedule::FeeScheduleTable;
use crate::rounding::{Rounder, RoundingPolicy, DEFAULT_ROUNDING_UNIT};
use crate::types::{FeeSchedule, RankSplit};

/// Settlement engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Ordering among entrants with equal chips
    pub tie_break: TieBreak,

    /// Payout rounding
    pub rounding: RoundingConfig,

    /// Predefined entry-fee tiers
    pub tiers: Vec<FeeSchedule>,
}

/// Rounding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    /// Floor (documented house rule) or round-to-nearest
    pub policy: RoundingPolicy,

    /// Payouts are whole multiples of this many currency units
    pub unit: i64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            policy: RoundingPolicy::Floor,
            unit: DEFAULT_ROUNDING_UNIT,
        }
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::InputOrder,
            rounding: RoundingConfig::default(),
            tiers: default_tiers(),
        }
    }
}

/// House tier table used when no configuration file is given
pub fn default_tiers() -> Vec<FeeSchedule> {
    let split = RankSplit::from_percent(50, 30, 20);
    vec![
        FeeSchedule::new(3000, 500),
        FeeSchedule::new(5000, 1000).with_stake_pool(1000, split),
        FeeSchedule::new(10000, 1500).with_stake_pool(3000, split),
        FeeSchedule::new(20000, 2500).with_stake_pool(5000, split),
    ]
}

impl SettlementConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a configuration file (format picked by extension), then apply
    /// environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settlement configuration from file: {:?}", path);

        let mut config: SettlementConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `SETTLEMENT_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(policy) = std::env::var("SETTLEMENT_ROUNDING_POLICY") {
            self.rounding.policy = policy.parse().map_err(SettlementError::invalid_config)?;
        }

        if let Ok(unit) = std::env::var("SETTLEMENT_ROUNDING_UNIT") {
            self.rounding.unit = unit
                .parse()
                .map_err(|_| SettlementError::invalid_config("Invalid SETTLEMENT_ROUNDING_UNIT"))?;
        }

        if let Ok(tie_break) = std::env::var("SETTLEMENT_TIE_BREAK") {
            self.tie_break = tie_break.parse().map_err(SettlementError::invalid_config)?;
        }

        Ok(())
    }

    /// Reject configurations the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.rounding.unit <= 0 {
            return Err(SettlementError::invalid_config(format!(
                "rounding unit must be positive, got {}",
                self.rounding.unit
            )));
        }

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if !seen.insert(tier.entry_fee) {
                return Err(SettlementError::DuplicateTier {
                    entry_fee: tier.entry_fee,
                });
            }
            if tier.entry_fee < 0 || tier.administrative_fee < 0 || tier.total_stake_pool < 0 {
                return Err(SettlementError::invalid_config(format!(
                    "tier {} has a negative fee",
                    tier.entry_fee
                )));
            }
        }

        Ok(())
    }

    pub fn rounder(&self) -> Rounder {
        Rounder::new(self.rounding.policy, self.rounding.unit)
    }

    /// Tier table built from the configured tiers
    pub fn fee_table(&self) -> Result<FeeScheduleTable> {
        FeeScheduleTable::from_tiers(self.tiers.iter().cloned())
    }

    /// Render as TOML, suitable for `from_file`
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
