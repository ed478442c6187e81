//! Combine chip shares and stake bonuses into per-entrant payouts

use tracing::error;

use crate::chips::ChipAllocation;
use crate::stakes::StakeAllocation;
use crate::types::{Amount, EntrantPrize};

pub struct Reconciler;

impl Reconciler {
    /// Build the payout list in ranked (descending chip) order.
    ///
    /// Both allocations arrive with their own shortfall already folded into
    /// their first entry, so each residue is counted exactly once here.
    pub fn finalize(
        chips: &ChipAllocation,
        stakes: &StakeAllocation,
        remaining_pool: Amount,
    ) -> Vec<EntrantPrize> {
        let chip_total = chips.distributed();
        if !chips.shares.is_empty() && chip_total != remaining_pool {
            error!(
                chip_total,
                remaining_pool,
                "Chip shares do not add up to the remaining pool"
            );
        }

        chips
            .shares
            .iter()
            .map(|share| {
                let stake_bonus = stakes.bonus_for_rank(share.rank);
                EntrantPrize {
                    entrant_id: share.entrant_id.clone(),
                    rank: share.rank,
                    chips: share.chips,
                    chip_share_percent: share.chip_share_percent,
                    chip_based_amount: share.chip_based_amount,
                    stake_bonus,
                    total_amount: share.chip_based_amount.saturating_add(stake_bonus),
                }
            })
            .collect()
    }
}
