//! Gross and net prize pool

use tracing::debug;

use crate::types::{Amount, Entrant, PoolTotals};

/// Pool calculator
pub struct PoolCalculator;

impl PoolCalculator {
    /// Total groups bought across the field
    pub fn total_groups(entrants: &[Entrant]) -> u64 {
        entrants.iter().map(|e| u64::from(e.buy_in_count)).sum()
    }

    /// gross = (entry fee - administrative fee) * groups; net = gross - activity bonus.
    ///
    /// Negative results are returned as-is and every step saturates at the
    /// amount range. Zero groups still withholds the activity bonus from the
    /// net pool.
    pub fn compute(
        entry_fee: Amount,
        administrative_fee: Amount,
        total_groups: u64,
        activity_bonus: Option<Amount>,
    ) -> PoolTotals {
        let groups = Amount::try_from(total_groups).unwrap_or(Amount::MAX);
        let gross_pool = entry_fee
            .saturating_sub(administrative_fee)
            .saturating_mul(groups);
        let net_pool = gross_pool.saturating_sub(activity_bonus.unwrap_or(0));

        debug!(total_groups, gross_pool, net_pool, "Computed pool");

        PoolTotals {
            total_groups,
            gross_pool,
            net_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_and_net_pool() {
        let totals = PoolCalculator::compute(600, 100, 3, None);
        assert_eq!(totals.gross_pool, 1500);
        assert_eq!(totals.net_pool, 1500);

        let totals = PoolCalculator::compute(600, 100, 3, Some(200));
        assert_eq!(totals.gross_pool, 1500);
        assert_eq!(totals.net_pool, 1300);
    }

    #[test]
    fn test_zero_groups() {
        let totals = PoolCalculator::compute(600, 100, 0, None);
        assert_eq!(totals.gross_pool, 0);
        assert_eq!(totals.net_pool, 0);
    }

    #[test]
    fn test_negative_pool_passes_through() {
        let totals = PoolCalculator::compute(500, 700, 2, None);
        assert_eq!(totals.gross_pool, -400);
        assert_eq!(totals.net_pool, -400);
    }

    #[test]
    fn test_extreme_fees_saturate() {
        let totals = PoolCalculator::compute(Amount::MIN, 1, 1, None);
        assert_eq!(totals.gross_pool, Amount::MIN);

        let totals = PoolCalculator::compute(Amount::MAX, -1, 2, Some(-1));
        assert_eq!(totals.gross_pool, Amount::MAX);
        assert_eq!(totals.net_pool, Amount::MAX);

        let totals = PoolCalculator::compute(Amount::MIN, 0, 1, Some(1));
        assert_eq!(totals.net_pool, Amount::MIN);
    }

    #[test]
    fn test_total_groups_sums_buy_ins() {
        let entrants = vec![
            Entrant::new("a", 2, 100),
            Entrant::new("b", 0, 0),
            Entrant::new("c", 3, 50),
        ];
        assert_eq!(PoolCalculator::total_groups(&entrants), 5);
        assert_eq!(PoolCalculator::total_groups(&[]), 0);
    }
}
