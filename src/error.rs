//! Error type shared by the store, the JSON importer and configuration loading.

/// Errors surfaced by the flashcards library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    /// Deck or card id with no matching row
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
    #[error("Invalid learning status: {0}")]
    InvalidStatus(String),
    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),
    /// Rating string outside Again/Good/Easy
    #[error("Invalid rating: {0}")]
    InvalidRating(String),
}

pub type Result<T> = std::result::Result<T, Error>;
