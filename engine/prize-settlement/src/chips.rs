//! Chip-weighted split of the remaining pool
//!
//! Ranking happens here: entrants are ordered by descending final chips, and
//! that order decides both the stake-bonus ranks and who absorbs the rounding
//! residue.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rounding::{proportion, Rounder};
use crate::types::{Amount, Entrant};

/// Order among entrants with equal chip counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order the entrants were supplied in
    #[default]
    InputOrder,
    /// Lower entrant id ranks first
    EntrantId,
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input_order" | "input" => Ok(TieBreak::InputOrder),
            "entrant_id" | "id" => Ok(TieBreak::EntrantId),
            other => Err(format!("unknown tie break: {other}")),
        }
    }
}

/// One entrant's chip-weighted share, in ranked order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipShare {
    pub entrant_id: String,
    pub rank: usize,
    pub chips: u64,
    pub chip_share_percent: Decimal,
    pub chip_based_amount: Amount,
}

/// Output of the chip-weighted allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipAllocation {
    /// Shares ordered by rank; the first one already carries the shortfall
    pub shares: Vec<ChipShare>,
    /// Sum of final chips; wider than a single count so large fields cannot overflow
    pub total_chips: u128,
    /// Rounding residue that was added to the highest-chip entrant
    pub shortfall: Amount,
}

impl ChipAllocation {
    pub fn distributed(&self) -> Amount {
        self.shares
            .iter()
            .map(|s| s.chip_based_amount)
            .fold(0, Amount::saturating_add)
    }
}

/// Total chips across the field
pub fn total_chips(entrants: &[Entrant]) -> u128 {
    entrants.iter().map(|e| u128::from(e.final_chips)).sum()
}

/// Splits the remaining pool in proportion to final chip counts
#[derive(Debug, Clone, Copy, Default)]
pub struct ChipWeightedAllocator {
    rounder: Rounder,
    tie_break: TieBreak,
}

impl ChipWeightedAllocator {
    pub fn new(rounder: Rounder, tie_break: TieBreak) -> Self {
        Self { rounder, tie_break }
    }

    /// Entrant indices ordered by descending chips, ties per the tie-break rule
    pub fn rank_order(&self, entrants: &[Entrant]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..entrants.len()).collect();
        // sort_by is stable, so InputOrder needs no secondary key
        order.sort_by(|&a, &b| {
            let by_chips = entrants[b].final_chips.cmp(&entrants[a].final_chips);
            match self.tie_break {
                TieBreak::InputOrder => by_chips,
                TieBreak::EntrantId => by_chips.then_with(|| entrants[a].id.cmp(&entrants[b].id)),
            }
        });
        order
    }

    /// Allocate `remaining_pool` by chip share.
    ///
    /// With zero total chips every share is zero and the whole pool lands on
    /// the first ranked entrant as shortfall.
    pub fn allocate(&self, remaining_pool: Amount, entrants: &[Entrant]) -> ChipAllocation {
        let total_chips = total_chips(entrants);
        if entrants.is_empty() {
            return ChipAllocation {
                shares: Vec::new(),
                total_chips,
                shortfall: 0,
            };
        }

        let pool = Decimal::from(remaining_pool);
        // u64 counts fit a decimal's 96-bit mantissa until the field has billions of entrants
        let total = Decimal::from_u128(total_chips).unwrap_or(Decimal::MAX);

        let mut shares: Vec<ChipShare> = self
            .rank_order(entrants)
            .into_iter()
            .enumerate()
            .map(|(position, index)| {
                let entrant = &entrants[index];
                let chips = Decimal::from(entrant.final_chips);
                let (chip_share_percent, chip_based_amount) = if total_chips == 0 {
                    (Decimal::ZERO, 0)
                } else {
                    let raw = proportion(pool, chips, total);
                    let percent = proportion(Decimal::ONE_HUNDRED, chips, total).round_dp(4);
                    (percent, self.rounder.round(raw))
                };
                ChipShare {
                    entrant_id: entrant.id.clone(),
                    rank: position + 1,
                    chips: entrant.final_chips,
                    chip_share_percent,
                    chip_based_amount,
                }
            })
            .collect();

        let allocated = shares
            .iter()
            .map(|s| s.chip_based_amount)
            .fold(0, Amount::saturating_add);
        let shortfall = remaining_pool.saturating_sub(allocated);
        shares[0].chip_based_amount = shares[0].chip_based_amount.saturating_add(shortfall);

        debug!(
            remaining_pool,
            shortfall,
            entrants = shares.len(),
            "Allocated chip pool"
        );

        ChipAllocation {
            shares,
            total_chips,
            shortfall,
        }
    }
}
