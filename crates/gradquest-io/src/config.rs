//! Game configuration.
//!
//! Everything here has a default, so the game runs with no config file at
//! all; a `gradquest.toml` only needs the fields it wants to override.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level gradquest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Directory holding the question files.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: PathBuf,
    /// Question file names, one per archetype slot.
    #[serde(default = "default_question_files")]
    pub question_files: [String; 4],
    /// Directory game reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_questions_dir() -> PathBuf {
    PathBuf::from("./questions")
}

fn default_question_files() -> [String; 4] {
    [
        "software_engineering.csv".to_string(),
        "calculus.csv".to_string(),
        "world_history.csv".to_string(),
        "organic_chemistry.csv".to_string(),
    ]
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./gradquest-reports")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions_dir: default_questions_dir(),
            question_files: default_question_files(),
            report_dir: default_report_dir(),
        }
    }
}

impl GameConfig {
    /// Full path of the question file for each archetype slot.
    pub fn archetype_paths(&self) -> [PathBuf; 4] {
        let path = |name: &str| self.questions_dir.join(name);
        [
            path(&self.question_files[0]),
            path(&self.question_files[1]),
            path(&self.question_files[2]),
            path(&self.question_files[3]),
        ]
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradquest.toml` in the current directory
/// 2. `~/.config/gradquest/config.toml`
///
/// Falls back to defaults when neither exists.
pub fn load_config() -> Result<GameConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GameConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradquest.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = global_config_path() {
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(config = %path.display(), "loaded config file");
            toml::from_str::<GameConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradquest").join("config.toml"))
}
