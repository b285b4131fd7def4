//! Card is a multiple-choice question with exactly one correct option and its own learning state
use super::{LearningState, Rating, Timestamp, sm2};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            "Expert" => Ok(Self::Expert),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    /// The question text
    pub stem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Difficulty>,
    pub options: Vec<AnswerOption>,
    #[serde(alias = "correctAnswerId")]
    pub correct_option_id: String,
    pub learning_state: LearningState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Card {
    /// Builds a fresh card whose option ids are `<id>_<index>`.
    pub fn new(id: &str, stem: &str, options: &[&str], correct_index: usize, now: Timestamp) -> Self {
        Self {
            id: id.to_string(),
            stem: stem.to_string(),
            image_url: None,
            level: None,
            options: options
                .iter()
                .enumerate()
                .map(|(i, text)| AnswerOption {
                    id: format!("{}_{}", id, i),
                    text: text.to_string(),
                })
                .collect(),
            correct_option_id: format!("{}_{}", id, correct_index),
            learning_state: LearningState::new(now),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == self.correct_option_id)
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.learning_state.is_due(now)
    }

    /// Schedules the card after a rating and keeps the result.
    pub fn apply_rating(&mut self, rating: Rating, now: Timestamp) -> LearningState {
        self.learning_state = sm2::review_next(&self.learning_state, rating, now);
        self.learning_state
    }

    /// Letter shown in front of an option: A, B, C, ...
    pub fn option_label(index: usize) -> String {
        let mut label = String::new();
        let mut n = index;
        loop {
            label.insert(0, (b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        label
    }
}
