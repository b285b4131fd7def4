//! Application configuration.
//!
//! Values are read from `config.toml` first, then from the environment
//! (a `.env` file is honoured), and fall back to built-in defaults.

use crate::error::Result;
use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_PATH_ENV: &str = "FLASHCARDS_DB_PATH";
pub const DEFAULT_DATABASE_PATH: &str = "db.sqlite3";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    study: Option<StudySection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StudySection {
    seed_sample_deck: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    /// Insert the built-in sample deck when the store is empty
    pub seed_sample_deck: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            seed_sample_deck: true,
        }
    }
}

impl Config {
    /// Parses a TOML document. Keys it leaves out keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(file);
        Ok(config)
    }

    fn apply(&mut self, file: FileConfig) {
        if let Some(path) = file.database.and_then(|d| d.path) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(seed) = file.study.and_then(|s| s.seed_sample_deck) {
            self.seed_sample_deck = seed;
        }
    }

    /// Load configuration with priority: config.toml > environment > default
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Config::default();
        let mut path_from_file = false;

        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
                Ok(file) => {
                    path_from_file = file.database.as_ref().is_some_and(|d| d.path.is_some());
                    config.apply(file);
                }
                Err(e) => tracing::warn!("Ignoring malformed {}: {}", CONFIG_FILE, e),
            },
            Err(_) => tracing::debug!("No {} found", CONFIG_FILE),
        }

        if path_from_file {
            tracing::info!("Using database from {}: {}", CONFIG_FILE, config.database_path.display());
        } else if let Ok(path) = std::env::var(DATABASE_PATH_ENV) {
            tracing::info!("Using database from {} env: {}", DATABASE_PATH_ENV, path);
            config.database_path = PathBuf::from(path);
        } else {
            tracing::info!("Using default database path: {}", config.database_path.display());
        }

        config
    }
}
