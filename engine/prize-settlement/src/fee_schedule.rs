//! Fee schedule resolution
//!
//! Tier lookup is a pure function of the tier table and the user's
//! administrative-fee overrides. Both are passed in explicitly; nothing here
//! holds global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SettlementError};
use crate::types::{Amount, FeeSchedule};

/// Predefined entry-fee tiers keyed by entry fee
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleTable {
    tiers: BTreeMap<Amount, FeeSchedule>,
}

impl FeeScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a tier list, rejecting duplicate entry fees
    pub fn from_tiers(tiers: impl IntoIterator<Item = FeeSchedule>) -> Result<Self> {
        let mut table = Self::new();
        for tier in tiers {
            table.insert(tier)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, tier: FeeSchedule) -> Result<()> {
        if self.tiers.contains_key(&tier.entry_fee) {
            return Err(SettlementError::DuplicateTier {
                entry_fee: tier.entry_fee,
            });
        }
        self.tiers.insert(tier.entry_fee, tier);
        Ok(())
    }

    pub fn get(&self, entry_fee: Amount) -> Option<&FeeSchedule> {
        self.tiers.get(&entry_fee)
    }

    /// Configured entry fees in ascending order
    pub fn entry_fees(&self) -> impl Iterator<Item = Amount> + '_ {
        self.tiers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// User-edited administrative fees keyed by entry fee
///
/// Overrides stay in force until reset and win over the tier default on every
/// resolution. Setting the same value twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeOverrides {
    administrative_fees: BTreeMap<Amount, Amount>,
}

impl FeeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the administrative fee for an entry fee; returns the previous override
    pub fn set(&mut self, entry_fee: Amount, administrative_fee: Amount) -> Option<Amount> {
        self.administrative_fees.insert(entry_fee, administrative_fee)
    }

    /// Drop the override for an entry fee; returns it if there was one
    pub fn reset(&mut self, entry_fee: Amount) -> Option<Amount> {
        self.administrative_fees.remove(&entry_fee)
    }

    pub fn reset_all(&mut self) {
        self.administrative_fees.clear();
    }

    pub fn get(&self, entry_fee: Amount) -> Option<Amount> {
        self.administrative_fees.get(&entry_fee).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Amount, Amount)> + '_ {
        self.administrative_fees
            .iter()
            .map(|(fee, admin)| (*fee, *admin))
    }

    pub fn is_empty(&self) -> bool {
        self.administrative_fees.is_empty()
    }

    /// Apply the override for this schedule's entry fee, if any
    pub fn apply(&self, mut schedule: FeeSchedule) -> FeeSchedule {
        if let Some(administrative_fee) = self.get(schedule.entry_fee) {
            schedule.administrative_fee = administrative_fee;
        }
        schedule
    }
}

/// Where a tournament's fee schedule comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeScheduleSource {
    /// Predefined tier looked up by entry fee
    Tiered(Amount),
    /// Schedule supplied by the caller for a custom tournament
    Custom(FeeSchedule),
}

/// Resolves entry fees to concrete fee schedules
#[derive(Debug, Clone, Copy)]
pub struct FeeScheduleResolver<'a> {
    table: &'a FeeScheduleTable,
    overrides: &'a FeeOverrides,
}

impl<'a> FeeScheduleResolver<'a> {
    pub fn new(table: &'a FeeScheduleTable, overrides: &'a FeeOverrides) -> Self {
        Self { table, overrides }
    }

    /// Look up a tier and apply any administrative-fee override
    pub fn resolve(&self, entry_fee: Amount) -> Option<FeeSchedule> {
        let schedule = self.table.get(entry_fee)?.clone();
        let resolved = self.overrides.apply(schedule);
        debug!(
            entry_fee,
            administrative_fee = resolved.administrative_fee,
            total_stake_pool = resolved.total_stake_pool,
            "Resolved fee tier"
        );
        Some(resolved)
    }

    /// Resolve a tiered or custom source into one concrete schedule.
    ///
    /// Custom schedules pass through untouched; overrides only apply to tiers.
    pub fn resolve_source(&self, source: &FeeScheduleSource) -> Result<FeeSchedule> {
        match source {
            FeeScheduleSource::Tiered(entry_fee) => {
                let entry_fee = *entry_fee;
                self.resolve(entry_fee)
                    .ok_or(SettlementError::TierNotFound { entry_fee })
            }
            FeeScheduleSource::Custom(schedule) => Ok(schedule.clone()),
        }
    }
}
