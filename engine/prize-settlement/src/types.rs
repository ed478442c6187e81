//! Type definitions for tournament settlement

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole currency units (no fractional part)
pub type Amount = i64;

/// Number of finishing positions eligible for a stake bonus
pub const RANKED_POSITIONS: usize = 3;

/// Percentages of the stake pool awarded to ranks 1, 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSplit(pub [Decimal; RANKED_POSITIONS]);

impl RankSplit {
    pub fn new(first: Decimal, second: Decimal, third: Decimal) -> Self {
        Self([first, second, third])
    }

    /// Build a split from whole percentages, e.g. `(50, 30, 20)`
    pub fn from_percent(first: u32, second: u32, third: u32) -> Self {
        Self::new(
            Decimal::from(first),
            Decimal::from(second),
            Decimal::from(third),
        )
    }

    /// Percentage for a 1-based rank; ranks outside 1..=3 get nothing
    pub fn percentage(&self, rank: usize) -> Decimal {
        match rank {
            1..=RANKED_POSITIONS => self.0[rank - 1],
            _ => Decimal::ZERO,
        }
    }

    pub fn total(&self) -> Decimal {
        self.0.iter().copied().sum()
    }

    pub fn sums_to_hundred(&self) -> bool {
        self.total() == Decimal::ONE_HUNDRED
    }
}

impl Default for RankSplit {
    fn default() -> Self {
        Self::from_percent(50, 30, 20)
    }
}

/// Fee schedule for one entry-fee tier
///
/// Once resolved for a settlement this is an owned value; the result keeps its
/// own copy, so later edits to tiers or overrides never touch past results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Buy-in price per group
    pub entry_fee: Amount,

    /// Flat fee withheld per group before the pool is computed
    pub administrative_fee: Amount,

    /// Withheld once per tournament and reserved for the top three finishers
    pub total_stake_pool: Amount,

    #[serde(default)]
    pub rank_split: RankSplit,

    /// Withheld once per tournament and never distributed to entrants
    #[serde(default)]
    pub activity_bonus: Option<Amount>,
}

impl FeeSchedule {
    pub fn new(entry_fee: Amount, administrative_fee: Amount) -> Self {
        Self {
            entry_fee,
            administrative_fee,
            total_stake_pool: 0,
            rank_split: RankSplit::default(),
            activity_bonus: None,
        }
    }

    pub fn with_stake_pool(mut self, total_stake_pool: Amount, rank_split: RankSplit) -> Self {
        self.total_stake_pool = total_stake_pool;
        self.rank_split = rank_split;
        self
    }

    pub fn with_activity_bonus(mut self, activity_bonus: Amount) -> Self {
        self.activity_bonus = Some(activity_bonus);
        self
    }

    pub fn activity_bonus_or_zero(&self) -> Amount {
        self.activity_bonus.unwrap_or(0)
    }
}

/// One player's tournament position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: String,
    pub buy_in_count: u32,
    pub final_chips: u64,
}

impl Entrant {
    pub fn new(id: impl Into<String>, buy_in_count: u32, final_chips: u64) -> Self {
        Self {
            id: id.into(),
            buy_in_count,
            final_chips,
        }
    }
}

/// Gross and net pool for a tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTotals {
    pub total_groups: u64,
    pub gross_pool: Amount,
    pub net_pool: Amount,
}

/// Stake bonus awarded to one finishing rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankStake {
    pub rank: usize,
    pub percentage: Decimal,
    pub amount: Amount,
}

/// Payout line for one entrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrantPrize {
    pub entrant_id: String,
    pub rank: usize,
    pub chips: u64,
    pub chip_share_percent: Decimal,
    pub chip_based_amount: Amount,
    pub stake_bonus: Amount,
    pub total_amount: Amount,
}

/// Advisory conditions reported alongside a result; none of them block settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettlementWarning {
    /// Rank percentages do not add up to 100
    RankSplitMismatch { total: Decimal },

    /// Administrative fee exceeds the entry fee, or a custom schedule is off
    NegativePool { gross_pool: Amount },

    /// Stake pool is larger than what is left after the activity bonus
    StakePoolExceedsNetPool {
        net_pool: Amount,
        total_stake_pool: Amount,
    },

    /// Fewer ranked entrants than stake ranks; this part of the stake pool stays out
    UnusedStakePool {
        ranked_entrants: usize,
        amount: Amount,
    },
}

/// Full settlement for one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Schedule the result was computed from
    pub schedule: FeeSchedule,

    pub total_groups: u64,
    pub gross_pool: Amount,
    pub net_pool: Amount,
    pub remaining_pool: Amount,
    pub total_chips: u128,

    pub rank_stakes: Vec<RankStake>,
    pub entrant_prizes: Vec<EntrantPrize>,

    /// Stake pool left undistributed because ranks went unfilled
    pub unused_stake_pool: Amount,

    pub warnings: Vec<SettlementWarning>,
}

impl SettlementResult {
    /// Sum of every entrant's total payout
    pub fn total_distributed(&self) -> Amount {
        self.entrant_prizes
            .iter()
            .map(|p| p.total_amount)
            .fold(0, Amount::saturating_add)
    }

    /// Payout line for one entrant, if present
    pub fn prize_for(&self, entrant_id: &str) -> Option<&EntrantPrize> {
        self.entrant_prizes
            .iter()
            .find(|p| p.entrant_id == entrant_id)
    }

    /// Whether the payouts account for the whole net pool.
    ///
    /// Undistributed stake from unfilled ranks counts as accounted for.
    /// Always false for an empty field, since nothing is paid out.
    pub fn is_balanced(&self) -> bool {
        let accounted = self
            .total_distributed()
            .saturating_add(self.unused_stake_pool);
        !self.entrant_prizes.is_empty() && accounted == self.net_pool
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
