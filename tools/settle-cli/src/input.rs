//! Tournament input file

use std::path::Path;

use anyhow::{Context, Result};
use prize_settlement::{Entrant, FeeOverrides, FeeScheduleSource};
use serde::{Deserialize, Serialize};

/// One tournament as handed over by the record-keeping side
///
/// ```json
/// {
///   "schedule": { "tiered": 5000 },
///   "overrides": [[5000, 800]],
///   "entrants": [{ "id": "P1", "buy_in_count": 1, "final_chips": 500 }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentInput {
    pub schedule: FeeScheduleSource,

    /// Administrative-fee overrides as `[entry_fee, administrative_fee]` pairs
    #[serde(default)]
    pub overrides: Vec<(i64, i64)>,

    pub entrants: Vec<Entrant>,
}

impl TournamentInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tournament file: {:?}", path))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse tournament file: {:?}", path))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn fee_overrides(&self) -> FeeOverrides {
        let mut overrides = FeeOverrides::new();
        for &(entry_fee, administrative_fee) in &self.overrides {
            overrides.set(entry_fee, administrative_fee);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiered_input() {
        let input = TournamentInput::from_json(
            r#"{
                "schedule": {"tiered": 5000},
                "overrides": [[5000, 800]],
                "entrants": [
                    {"id": "P1", "buy_in_count": 2, "final_chips": 500},
                    {"id": "P2", "buy_in_count": 1, "final_chips": 0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(input.schedule, FeeScheduleSource::Tiered(5000));
        assert_eq!(input.entrants.len(), 2);
        assert_eq!(input.fee_overrides().get(5000), Some(800));
    }

    #[test]
    fn test_parse_custom_input_without_overrides() {
        let input = TournamentInput::from_json(
            r#"{
                "schedule": {"custom": {
                    "entry_fee": 600,
                    "administrative_fee": 100,
                    "total_stake_pool": 100,
                    "rank_split": [50, 30, 20],
                    "activity_bonus": 200
                }},
                "entrants": []
            }"#,
        )
        .unwrap();

        match &input.schedule {
            FeeScheduleSource::Custom(schedule) => {
                assert_eq!(schedule.activity_bonus, Some(200));
                assert_eq!(schedule.total_stake_pool, 100);
            }
            other => panic!("expected custom schedule, got {:?}", other),
        }
        assert!(input.fee_overrides().is_empty());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("/nonexistent/tournament.json");
        let err = TournamentInput::from_file(path).unwrap_err();
        assert!(err.to_string().contains("tournament.json"));
    }
}
