pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{Error, Result};
pub use models::sm2::{format_interval, review_next};
pub use models::{Card, Deck, DeckSet, LearningState, LearningStatus, Rating, StudySession, Timestamp};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
