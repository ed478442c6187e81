//! Worked settlement scenarios

use prize_settlement::{
    config::RoundingConfig, settle, Amount, Entrant, FeeSchedule, RankSplit, Rounder,
    RoundingPolicy, SettlementConfig, SettlementEngine, SettlementResult, SettlementWarning,
    TieBreak,
};

fn totals(result: &SettlementResult) -> Vec<(&str, Amount)> {
    result
        .entrant_prizes
        .iter()
        .map(|p| (p.entrant_id.as_str(), p.total_amount))
        .collect()
}

fn three_entrants() -> Vec<Entrant> {
    vec![
        Entrant::new("P1", 1, 500),
        Entrant::new("P2", 1, 300),
        Entrant::new("P3", 1, 200),
    ]
}

#[test]
fn test_no_stake_pool_splits_by_chips() {
    let schedule = FeeSchedule::new(600, 100);
    let entrants = vec![Entrant::new("P1", 1, 700), Entrant::new("P2", 1, 300)];

    let result = settle(&schedule, &entrants);

    assert_eq!(result.total_groups, 2);
    assert_eq!(result.gross_pool, 1000);
    assert_eq!(result.remaining_pool, 1000);
    assert_eq!(totals(&result), vec![("P1", 700), ("P2", 300)]);
    assert!(result.is_balanced());
}

#[test]
fn test_stake_pool_with_three_ranked_entrants() {
    let schedule = FeeSchedule::new(600, 100).with_stake_pool(100, RankSplit::default());

    let result = settle(&schedule, &three_entrants());

    assert_eq!(result.gross_pool, 1500);
    assert_eq!(result.remaining_pool, 1400);

    let chip_based: Vec<Amount> = result
        .entrant_prizes
        .iter()
        .map(|p| p.chip_based_amount)
        .collect();
    assert_eq!(chip_based, vec![800, 400, 200]);

    let stakes: Vec<Amount> = result.rank_stakes.iter().map(|s| s.amount).collect();
    assert_eq!(stakes, vec![100, 0, 0]);

    assert_eq!(
        totals(&result),
        vec![("P1", 900), ("P2", 400), ("P3", 200)]
    );
    assert_eq!(result.total_distributed(), 1500);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_two_entrants_with_three_rank_split() {
    let schedule = FeeSchedule::new(5000, 1000).with_stake_pool(1000, RankSplit::default());
    let entrants = vec![Entrant::new("A", 1, 6000), Entrant::new("B", 1, 4000)];

    let result = settle(&schedule, &entrants);

    assert_eq!(result.rank_stakes.len(), 2);
    assert_eq!(result.rank_stakes[0].amount, 500);
    assert_eq!(result.rank_stakes[1].amount, 300);
    assert_eq!(result.unused_stake_pool, 200);
    let unused = SettlementWarning::UnusedStakePool {
        ranked_entrants: 2,
        amount: 200,
    };
    assert!(result.warnings.contains(&unused));

    // 8000 gross, 7000 remaining -> 4200 / 2800 by chips
    assert_eq!(totals(&result), vec![("A", 4700), ("B", 3100)]);
    assert_eq!(
        result.total_distributed() + result.unused_stake_pool,
        result.net_pool
    );
    assert!(result.is_balanced());
}

#[test]
fn test_two_entrants_with_uneven_stake_pool() {
    let schedule = FeeSchedule::new(5000, 1000).with_stake_pool(1050, RankSplit::default());
    let entrants = vec![Entrant::new("A", 1, 6000), Entrant::new("B", 1, 4000)];

    let result = settle(&schedule, &entrants);

    // 525 / 315 / 210: rank 3 keeps its 210 out, rank 1 takes only the 40 residue
    let stakes: Vec<Amount> = result.rank_stakes.iter().map(|s| s.amount).collect();
    assert_eq!(stakes, vec![540, 300]);
    assert_eq!(result.unused_stake_pool, 210);
    let unused = SettlementWarning::UnusedStakePool {
        ranked_entrants: 2,
        amount: 210,
    };
    assert!(result.warnings.contains(&unused));

    // 6950 remaining -> 4170 / 2780 floor to 4100 / 2700, residue 150 to A
    assert_eq!(totals(&result), vec![("A", 4790), ("B", 3000)]);
    assert!(result.is_balanced());
}

#[test]
fn test_single_entrant_with_small_stake_pool() {
    let schedule = FeeSchedule::new(600, 100).with_stake_pool(100, RankSplit::default());
    let entrants = vec![Entrant::new("solo", 2, 10)];

    let result = settle(&schedule, &entrants);

    // Ranks 2 and 3 hold 30 + 20 back; the 50 for rank 1 is paid out
    assert_eq!(result.unused_stake_pool, 50);
    assert_eq!(result.rank_stakes[0].amount, 50);
    assert_eq!(totals(&result), vec![("solo", 900 + 50)]);
    assert!(result.is_balanced());
}

#[test]
fn test_everyone_busted_pays_first_entrant() {
    let schedule = FeeSchedule::new(600, 100);
    let entrants = vec![Entrant::new("first", 1, 0), Entrant::new("second", 1, 0)];

    let result = settle(&schedule, &entrants);

    assert_eq!(result.total_chips, 0);
    assert_eq!(totals(&result), vec![("first", 1000), ("second", 0)]);
}

#[test]
fn test_huge_chip_counts_settle() {
    let schedule = FeeSchedule::new(600, 100);
    let half = u64::MAX / 2 + 1;
    let entrants = vec![Entrant::new("a", 1, half), Entrant::new("b", 1, half)];

    let result = settle(&schedule, &entrants);

    assert_eq!(result.total_chips, u128::from(u64::MAX) + 1);
    assert_eq!(totals(&result), vec![("a", 500), ("b", 500)]);
}

#[test]
fn test_output_sorted_by_chips_descending() {
    let schedule = FeeSchedule::new(1000, 0);
    let entrants = vec![
        Entrant::new("low", 1, 100),
        Entrant::new("high", 1, 900),
        Entrant::new("mid", 1, 500),
        Entrant::new("mid-tie", 1, 500),
    ];

    let result = settle(&schedule, &entrants);
    let order: Vec<&str> = result
        .entrant_prizes
        .iter()
        .map(|p| p.entrant_id.as_str())
        .collect();
    assert_eq!(order, vec!["high", "mid", "mid-tie", "low"]);
    let ranks: Vec<usize> = result.entrant_prizes.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn test_entrant_id_tie_break() {
    let config = SettlementConfig {
        tie_break: TieBreak::EntrantId,
        ..SettlementConfig::default()
    };
    let engine = SettlementEngine::new(config);
    let schedule = FeeSchedule::new(1000, 0).with_stake_pool(1000, RankSplit::default());
    let entrants = vec![
        Entrant::new("b", 1, 500),
        Entrant::new("a", 1, 500),
        Entrant::new("c", 1, 100),
    ];

    let result = engine.settle(&schedule, &entrants);
    assert_eq!(result.entrant_prizes[0].entrant_id, "a");
    assert_eq!(result.entrant_prizes[0].stake_bonus, 500);
    assert_eq!(result.entrant_prizes[1].entrant_id, "b");
    assert_eq!(result.entrant_prizes[1].stake_bonus, 300);
}

#[test]
fn test_nearest_rounding_still_balances() {
    let config = SettlementConfig {
        rounding: RoundingConfig {
            policy: RoundingPolicy::Nearest,
            unit: 100,
        },
        ..SettlementConfig::default()
    };
    assert_eq!(config.rounder(), Rounder::new(RoundingPolicy::Nearest, 100));

    let engine = SettlementEngine::new(config);
    let schedule = FeeSchedule::new(600, 100).with_stake_pool(100, RankSplit::default());

    let result = engine.settle(&schedule, &three_entrants());
    // 700 / 420 / 280 round to 700 / 400 / 300, residue 0
    let chip_based: Vec<Amount> = result
        .entrant_prizes
        .iter()
        .map(|p| p.chip_based_amount)
        .collect();
    assert_eq!(chip_based, vec![700, 400, 300]);
    assert_eq!(result.total_distributed(), 1500);
}

#[test]
fn test_result_serializes_for_collaborators() {
    let schedule = FeeSchedule::new(600, 100);
    let entrants = vec![Entrant::new("P1", 1, 700), Entrant::new("P2", 1, 300)];
    let result = settle(&schedule, &entrants);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["gross_pool"], 1000);
    assert_eq!(json["entrant_prizes"][0]["entrant_id"], "P1");

    let back: SettlementResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_demo_configuration_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/settlement.toml");
    let config = SettlementConfig::from_file(&path).unwrap();
    let table = config.fee_table().unwrap();

    let entry_fees: Vec<Amount> = table.entry_fees().collect();
    assert_eq!(entry_fees, vec![3000, 5000, 10000]);
    assert_eq!(table.get(10000).unwrap().activity_bonus, Some(500));
}
