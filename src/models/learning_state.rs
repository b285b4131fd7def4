//! Per-card memory state tracked by the scheduler.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Ease factor given to a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lifecycle tag of a card. Only the scheduler moves a card between these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningStatus {
    New,
    Learning,
    Review,
    Relearning,
}

impl LearningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Learning => "Learning",
            Self::Review => "Review",
            Self::Relearning => "Relearning",
        }
    }
}

impl FromStr for LearningStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Learning" => Ok(Self::Learning),
            "Review" => Ok(Self::Review),
            "Relearning" => Ok(Self::Relearning),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningState {
    pub status: LearningStatus,
    pub next_review_date: Timestamp,
    /// Days until the next review
    pub interval: f64,
    pub ease_factor: f64,
    /// Consecutive successful ratings since the last "Again"
    pub repetitions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<Timestamp>,
}

impl LearningState {
    /// Seed state for a card that has never been rated. It is due immediately.
    pub fn new(now: Timestamp) -> Self {
        Self {
            status: LearningStatus::New,
            next_review_date: now,
            interval: 0.0,
            ease_factor: INITIAL_EASE_FACTOR,
            repetitions: 0,
            last_review_date: None,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_date <= now
    }
}
