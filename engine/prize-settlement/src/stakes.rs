//! Fixed stake pool split across the top three finishers

use rust_decimal::Decimal;
use tracing::debug;

use crate::rounding::{decimal_to_amount, proportion, Rounder};
use crate::types::{Amount, RankSplit, RankStake, RANKED_POSITIONS};

/// Output of the stake allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeAllocation {
    /// One entry per filled rank, rank 1 first; amounts include the folded shortfall
    pub stakes: Vec<RankStake>,

    /// Rounding residue that was added to rank 1
    pub shortfall: Amount,

    /// Stake belonging to ranks nobody finished in
    pub unused: Amount,
}

impl StakeAllocation {
    pub fn distributed(&self) -> Amount {
        self.stakes
            .iter()
            .map(|s| s.amount)
            .fold(0, Amount::saturating_add)
    }

    /// Stake bonus for a 1-based rank, zero when the rank got none
    pub fn bonus_for_rank(&self, rank: usize) -> Amount {
        self.stakes
            .iter()
            .find(|s| s.rank == rank)
            .map_or(0, |s| s.amount)
    }
}

/// Splits the stake pool by rank percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct StakeAllocator {
    rounder: Rounder,
}

impl StakeAllocator {
    pub fn new(rounder: Rounder) -> Self {
        Self { rounder }
    }

    /// Allocate the stake pool across at most three ranks.
    ///
    /// Each filled rank gets `pool * pct / 100`, rounded, and the residue of
    /// the filled ranks goes to rank 1. Ranks without a finisher are not
    /// redistributed: their raw amount, cut to whole units but not rounded,
    /// is reported as `unused`.
    pub fn allocate(
        &self,
        total_stake_pool: Amount,
        rank_split: &RankSplit,
        num_ranked_entrants: usize,
    ) -> StakeAllocation {
        let filled = num_ranked_entrants.min(RANKED_POSITIONS);
        if filled == 0 {
            return StakeAllocation {
                stakes: Vec::new(),
                shortfall: 0,
                unused: total_stake_pool,
            };
        }

        let pool = Decimal::from(total_stake_pool);
        let raw_for = |rank: usize| {
            proportion(pool, rank_split.percentage(rank), Decimal::ONE_HUNDRED)
        };

        let unused = (filled + 1..=RANKED_POSITIONS)
            .map(|rank| decimal_to_amount(raw_for(rank).floor()))
            .fold(0, Amount::saturating_add);

        let mut stakes: Vec<RankStake> = (1..=filled)
            .map(|rank| RankStake {
                rank,
                percentage: rank_split.percentage(rank),
                amount: self.rounder.round(raw_for(rank)),
            })
            .collect();

        let allocated = stakes
            .iter()
            .map(|s| s.amount)
            .fold(0, Amount::saturating_add);
        let shortfall = total_stake_pool
            .saturating_sub(unused)
            .saturating_sub(allocated);
        stakes[0].amount = stakes[0].amount.saturating_add(shortfall);

        debug!(filled, shortfall, unused, "Allocated stake pool");

        StakeAllocation {
            stakes,
            shortfall,
            unused,
        }
    }
}
