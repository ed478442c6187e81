//! Terminal rendering of a settlement

use colored::*;
use prize_settlement::{SettlementResult, SettlementWarning};

/// Render the settlement as a plain-text table
pub fn render_table(result: &SettlementResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Entry fee {}  admin fee {}  groups {}\n",
        result.schedule.entry_fee, result.schedule.administrative_fee, result.total_groups
    ));
    out.push_str(&format!(
        "Gross pool {}  net pool {}  stake pool {}  remaining {}\n",
        result.gross_pool, result.net_pool, result.schedule.total_stake_pool, result.remaining_pool
    ));
    if let Some(bonus) = result.schedule.activity_bonus {
        out.push_str(&format!("Activity bonus withheld {}\n", bonus));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:>4}  {:<16} {:>10} {:>9} {:>10} {:>8} {:>10}\n",
        "Rank", "Entrant", "Chips", "Share %", "Chip amt", "Stake", "Total"
    ));
    for prize in &result.entrant_prizes {
        out.push_str(&format!(
            "{:>4}  {:<16} {:>10} {:>9} {:>10} {:>8} {:>10}\n",
            prize.rank,
            prize.entrant_id,
            prize.chips,
            prize.chip_share_percent.round_dp(2),
            prize.chip_based_amount,
            prize.stake_bonus,
            prize.total_amount
        ));
    }
    out.push_str(&format!("\nDistributed {}", result.total_distributed()));
    if result.unused_stake_pool != 0 {
        out.push_str(&format!("  unused stake {}", result.unused_stake_pool));
    }
    out.push('\n');

    out
}

/// One line per warning, highlighted for the terminal
pub fn render_warnings(warnings: &[SettlementWarning]) -> Vec<String> {
    warnings
        .iter()
        .map(|w| format!("{} {}", "warning:".yellow().bold(), describe(w)))
        .collect()
}

fn describe(warning: &SettlementWarning) -> String {
    match warning {
        SettlementWarning::RankSplitMismatch { total } => {
            format!("rank split adds up to {}%, not 100%", total)
        }
        SettlementWarning::NegativePool { gross_pool } => {
            format!(
                "gross pool is negative ({}); administrative fee exceeds entry fee",
                gross_pool
            )
        }
        SettlementWarning::StakePoolExceedsNetPool { net_pool, total_stake_pool } => {
            format!("stake pool {} exceeds net pool {}", total_stake_pool, net_pool)
        }
        SettlementWarning::UnusedStakePool { ranked_entrants, amount } => {
            format!(
                "only {} ranked entrant(s); {} of the stake pool is not distributed",
                ranked_entrants, amount
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prize_settlement::{settle, Entrant, FeeSchedule, RankSplit};

    #[test]
    fn test_table_lists_every_entrant() {
        let schedule = FeeSchedule::new(600, 100).with_stake_pool(100, RankSplit::default());
        let entrants = vec![
            Entrant::new("P1", 1, 500),
            Entrant::new("P2", 1, 300),
            Entrant::new("P3", 1, 200),
        ];
        let table = render_table(&settle(&schedule, &entrants));

        assert!(table.contains("Gross pool 1500"));
        for id in ["P1", "P2", "P3"] {
            assert!(table.contains(id));
        }
        assert!(table.contains("Distributed 1500"));
        assert!(!table.contains("unused stake"));
    }

    #[test]
    fn test_warning_descriptions() {
        colored::control::set_override(false);
        let lines = render_warnings(&[SettlementWarning::UnusedStakePool {
            ranked_entrants: 2,
            amount: 200,
        }]);
        assert_eq!(
            lines,
            vec!["warning: only 2 ranked entrant(s); 200 of the stake pool is not distributed"]
        );
    }
}
