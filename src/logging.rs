use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Result;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Default log file, next to the persisted high scores.
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordfall")
        .join("wordfall.log")
}

/// Initializes the global logger.
///
/// The terminal is owned by the game while it runs, so records go to a file.
/// With `enabled == false` and no `RUST_LOG`, logging stays off.
pub fn init(enabled: bool, path: &Path) -> Result<()> {
    let env_set = std::env::var_os("RUST_LOG").is_some();
    if !enabled && !env_set {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env = Env::default().default_filter_or(LevelFilter::Debug.to_string());
    let mut builder = Builder::from_env(env);
    builder.target(Target::Pipe(Box::new(file)));

    // `try_init` only fails if a logger was already set.
    let _ = builder.try_init();
    Ok(())
}
