use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::difficulty::Difficulty;
use crate::store::schema::sanitize_name;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_starting_lives")]
    pub starting_lives: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub word_list_path: Option<String>,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_difficulty() -> String {
    "classic".to_string()
}
fn default_player_name() -> String {
    "Anonymous".to_string()
}
fn default_starting_lives() -> u32 {
    3
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_tick_ms() -> u64 {
    33
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            player_name: default_player_name(),
            starting_lives: default_starting_lives(),
            theme: default_theme(),
            word_list_path: None,
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordfall")
            .join("config.toml")
    }

    /// Clamp numeric fields and normalise names after loading or CLI overrides.
    pub fn validate(&mut self) {
        self.difficulty = Difficulty::parse_or_default(&self.difficulty)
            .as_str()
            .to_string();
        self.player_name = sanitize_name(&self.player_name);
        self.starting_lives = self.starting_lives.clamp(1, 9);
        self.tick_ms = self.tick_ms.clamp(10, 200);
        if self
            .word_list_path
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            self.word_list_path = None;
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse_or_default(&self.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.as_str().to_string();
    }
}
