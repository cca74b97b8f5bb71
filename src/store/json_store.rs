use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::HighScoresData;

const HIGH_SCORES_FILE: &str = "high_scores.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordfall")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Reads and parses `name`. `Ok(None)` when the file does not exist.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Loads the high-score table. Missing, unreadable, corrupt or
    /// outdated files all yield a fresh table.
    pub fn load_high_scores(&self) -> HighScoresData {
        match self.load::<HighScoresData>(HIGH_SCORES_FILE) {
            Ok(Some(mut data)) if !data.needs_reset() => {
                data.fill_missing_modes();
                data
            }
            Ok(Some(data)) => {
                warn!(
                    "high score schema {} is outdated, starting fresh",
                    data.schema_version
                );
                HighScoresData::default()
            }
            Ok(None) => HighScoresData::default(),
            Err(e) => {
                warn!("failed to load high scores: {e}");
                HighScoresData::default()
            }
        }
    }

    pub fn save_high_scores(&self, data: &HighScoresData) -> Result<()> {
        self.save(HIGH_SCORES_FILE, data)
    }
}
