use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::difficulty::ALL_DIFFICULTIES;

const SCHEMA_VERSION: u32 = 1;
pub const MAX_NAME_LEN: usize = 20;
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Best score for one mode (or overall). `timestamp` serializes as ISO-8601.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: u64,
    pub mode: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl HighScoreRecord {
    pub fn empty(mode: &str) -> Self {
        Self {
            mode: mode.to_string(),
            ..Self::default()
        }
    }

    pub fn is_set(&self) -> bool {
        self.score > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub mode_high: bool,
    pub global_high: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HighScoresData {
    pub schema_version: u32,
    #[serde(default)]
    pub modes: BTreeMap<String, HighScoreRecord>,
    #[serde(default)]
    pub global: HighScoreRecord,
}

impl Default for HighScoresData {
    fn default() -> Self {
        let modes = ALL_DIFFICULTIES
            .iter()
            .map(|d| (d.as_str().to_string(), HighScoreRecord::empty(d.as_str())))
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            modes,
            global: HighScoreRecord::default(),
        }
    }
}

/// Trims, substitutes the default for blank names, and caps the length.
pub fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

impl HighScoresData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Adds an empty record for any mode missing from a loaded file.
    pub fn fill_missing_modes(&mut self) {
        for d in ALL_DIFFICULTIES {
            self.modes
                .entry(d.as_str().to_string())
                .or_insert_with(|| HighScoreRecord::empty(d.as_str()));
        }
    }

    pub fn get(&self, mode: &str) -> Option<&HighScoreRecord> {
        self.modes.get(mode)
    }

    /// Records `score` if it strictly beats the mode best and/or the overall
    /// best. Unknown modes are ignored.
    pub fn submit(
        &mut self,
        mode: &str,
        name: &str,
        score: u64,
        now: DateTime<Utc>,
    ) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::default();
        let Some(current) = self.modes.get_mut(mode) else {
            return outcome;
        };

        let record = HighScoreRecord {
            name: sanitize_name(name),
            score,
            mode: mode.to_string(),
            timestamp: Some(now),
        };

        if score > current.score {
            *current = record.clone();
            outcome.mode_high = true;
        }
        if score > self.global.score {
            self.global = record;
            outcome.global_high = true;
        }
        outcome
    }

    /// Per-mode bests, highest score first.
    pub fn leaderboard(&self) -> Vec<&HighScoreRecord> {
        let mut rows: Vec<&HighScoreRecord> = self.modes.values().collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_mode() {
        let data = HighScoresData::default();
        assert_eq!(data.modes.len(), 3);
        assert_eq!(data.get("insane").unwrap().mode, "insane");
        assert!(!data.global.is_set());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("   "), "Anonymous");
        assert_eq!(sanitize_name("  ada "), "ada");
        assert_eq!(sanitize_name(&"x".repeat(30)).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_submit_requires_strictly_higher_score() {
        let mut data = HighScoresData::default();
        let now = Utc::now();
        let first = data.submit("classic", "ada", 100, now);
        assert!(first.mode_high && first.global_high);

        let tie = data.submit("classic", "bob", 100, now);
        assert_eq!(tie, SubmitOutcome::default());
        assert_eq!(data.get("classic").unwrap().name, "ada");
    }

    #[test]
    fn test_submit_mode_high_without_global_high() {
        let mut data = HighScoresData::default();
        let now = Utc::now();
        data.submit("insane", "ada", 500, now);
        let out = data.submit("hard", "bob", 200, now);
        assert!(out.mode_high);
        assert!(!out.global_high);
        assert_eq!(data.global.mode, "insane");
    }

    #[test]
    fn test_submit_unknown_mode_is_ignored() {
        let mut data = HighScoresData::default();
        let out = data.submit("nightmare", "ada", 999, Utc::now());
        assert_eq!(out, SubmitOutcome::default());
        assert!(!data.global.is_set());
    }

    #[test]
    fn test_leaderboard_sorted_desc() {
        let mut data = HighScoresData::default();
        let now = Utc::now();
        data.submit("classic", "a", 10, now);
        data.submit("insane", "b", 30, now);
        data.submit("hard", "c", 20, now);
        let scores: Vec<u64> = data.leaderboard().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
    }

    #[test]
    fn test_record_wire_shape() {
        let record = HighScoreRecord::empty("hard");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "");
        assert_eq!(json["score"], 0);
        assert_eq!(json["mode"], "hard");
        assert!(json["timestamp"].is_null());
    }

    #[test]
    fn test_fill_missing_modes() {
        let mut data: HighScoresData =
            serde_json::from_str(r#"{"schema_version": 1, "modes": {}}"#).unwrap();
        data.fill_missing_modes();
        assert_eq!(data.modes.len(), 3);
    }
}
