//! Settlement pipeline
//!
//! Runs the pool, stake, chip and reconcile steps in order and collects the
//! advisory warnings along the way.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::chips::ChipWeightedAllocator;
use crate::config::SettlementConfig;
use crate::error::{Result, SettlementError};
use crate::fee_schedule::{FeeOverrides, FeeScheduleResolver, FeeScheduleSource, FeeScheduleTable};
use crate::pool::PoolCalculator;
use crate::reconciler::Reconciler;
use crate::stakes::StakeAllocator;
use crate::types::{Entrant, FeeSchedule, SettlementResult, SettlementWarning, RANKED_POSITIONS};

/// Settle with the default configuration (floor to 100, input-order ties)
pub fn settle(schedule: &FeeSchedule, entrants: &[Entrant]) -> SettlementResult {
    SettlementEngine::default().settle(schedule, entrants)
}

/// Report duplicate entrant ids; the engine itself does not require unique ids
pub fn validate_entrants(entrants: &[Entrant]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entrants.len());
    for entrant in entrants {
        if !seen.insert(entrant.id.as_str()) {
            return Err(SettlementError::DuplicateEntrant {
                entrant_id: entrant.id.clone(),
            });
        }
    }
    Ok(())
}

/// Prize settlement engine
///
/// Stateless apart from its configuration: every call recomputes the whole
/// settlement from the schedule and entrant list it is given.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute every entrant's payout.
    ///
    /// Never fails: degenerate inputs give empty or all-zero results, and
    /// suspicious inputs are reported through `warnings`.
    pub fn settle(&self, schedule: &FeeSchedule, entrants: &[Entrant]) -> SettlementResult {
        let rounder = self.config.rounder();
        let mut warnings = Vec::new();

        if !schedule.rank_split.sums_to_hundred() {
            warnings.push(SettlementWarning::RankSplitMismatch {
                total: schedule.rank_split.total(),
            });
        }

        let totals = PoolCalculator::compute(
            schedule.entry_fee,
            schedule.administrative_fee,
            PoolCalculator::total_groups(entrants),
            schedule.activity_bonus,
        );
        if totals.gross_pool < 0 {
            warnings.push(SettlementWarning::NegativePool {
                gross_pool: totals.gross_pool,
            });
        }

        let remaining_pool = totals.net_pool.saturating_sub(schedule.total_stake_pool);
        if remaining_pool < 0 && totals.net_pool >= 0 {
            warnings.push(SettlementWarning::StakePoolExceedsNetPool {
                net_pool: totals.net_pool,
                total_stake_pool: schedule.total_stake_pool,
            });
        }

        let stakes = StakeAllocator::new(rounder).allocate(
            schedule.total_stake_pool,
            &schedule.rank_split,
            entrants.len(),
        );
        if stakes.unused != 0 && entrants.len() < RANKED_POSITIONS {
            warnings.push(SettlementWarning::UnusedStakePool {
                ranked_entrants: entrants.len(),
                amount: stakes.unused,
            });
        }

        let chip_allocator = ChipWeightedAllocator::new(rounder, self.config.tie_break);
        let chips = chip_allocator.allocate(remaining_pool, entrants);
        let entrant_prizes = Reconciler::finalize(&chips, &stakes, remaining_pool);

        for warning in &warnings {
            warn!(?warning, entry_fee = schedule.entry_fee, "Settlement warning");
        }

        let result = SettlementResult {
            schedule: schedule.clone(),
            total_groups: totals.total_groups,
            gross_pool: totals.gross_pool,
            net_pool: totals.net_pool,
            remaining_pool,
            total_chips: chips.total_chips,
            rank_stakes: stakes.stakes,
            entrant_prizes,
            unused_stake_pool: stakes.unused,
            warnings,
        };

        info!(
            entrants = entrants.len(),
            gross_pool = result.gross_pool,
            net_pool = result.net_pool,
            distributed = result.total_distributed(),
            unused_stake_pool = result.unused_stake_pool,
            "Settlement computed"
        );

        result
    }

    /// Resolve a tiered or custom schedule, then settle
    pub fn settle_source(
        &self,
        source: &FeeScheduleSource,
        table: &FeeScheduleTable,
        overrides: &FeeOverrides,
        entrants: &[Entrant],
    ) -> Result<SettlementResult> {
        let schedule = FeeScheduleResolver::new(table, overrides).resolve_source(source)?;
        Ok(self.settle(&schedule, entrants))
    }
}
