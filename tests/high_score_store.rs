use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use wordfall::store::json_store::JsonStore;
use wordfall::store::schema::{HighScoresData, MAX_NAME_LEN};

fn store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[test]
fn best_scores_survive_a_restart() {
    let (dir, first) = store();
    let when = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

    let mut data = first.load_high_scores();
    data.submit("classic", "ada", 120, when);
    data.submit("hard", "grace", 340, when);
    first.save_high_scores(&data).unwrap();

    let second = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let loaded = second.load_high_scores();
    assert_eq!(loaded.get("classic").unwrap().score, 120);
    assert_eq!(loaded.global.name, "grace");
    assert_eq!(loaded.global.mode, "hard");
    assert_eq!(loaded.global.timestamp, Some(when));
}

#[test]
fn persisted_payload_uses_iso_timestamps() {
    let (dir, store) = store();
    let when = Utc.with_ymd_and_hms(2026, 5, 6, 7, 8, 9).unwrap();
    let mut data = HighScoresData::default();
    data.submit("insane", "  someone-with-a-very-long-name  ", 900, when);
    store.save_high_scores(&data).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("high_scores.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let global = &json["global"];
    assert_eq!(global["score"], 900);
    assert_eq!(global["mode"], "insane");
    assert!(global["timestamp"].as_str().unwrap().starts_with("2026-05-06T07:08:09"));
    assert_eq!(global["name"].as_str().unwrap().chars().count(), MAX_NAME_LEN);
    assert!(json["modes"]["classic"]["timestamp"].is_null());
}

#[test]
fn reset_all_clears_saved_scores() {
    let (_dir, store) = store();
    let mut data = HighScoresData::default();
    data.submit("hard", "", 10, Utc::now());
    assert_eq!(data.global.name, "Anonymous");
    data.reset_all();
    store.save_high_scores(&data).unwrap();

    let loaded = store.load_high_scores();
    assert!(loaded.leaderboard().iter().all(|r| r.score == 0));
    assert!(!loaded.global.is_set());
}
