//! Deck is a titled set of multiple-choice cards
use super::{Card, LearningState, Timestamp};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub cards: Vec<Card>,
    /// Read-only decks can be studied but not edited
    #[serde(default)]
    pub is_read_only: bool,
    pub year: i32,
}

impl Deck {
    pub fn new(id: &str, title: &str, subject: &str, year: i32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            subject: subject.to_string(),
            description: None,
            time_limit: None,
            cards: Vec::new(),
            is_read_only: false,
            year,
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    /// Cards whose review date has passed, most overdue first.
    pub fn due_cards(&self, now: Timestamp) -> Vec<&Card> {
        let mut due: Vec<&Card> = self.cards.iter().filter(|c| c.is_due(now)).collect();
        due.sort_by_key(|c| c.learning_state.next_review_date);
        due
    }

    /// Puts every card back to the never-reviewed state.
    pub fn reset(&mut self, now: Timestamp) {
        for card in &mut self.cards {
            card.learning_state = LearningState::new(now);
        }
    }

    /// Checks that the deck can be studied: a title, unique card ids,
    /// and a correct option that exists on every card.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidDeck("deck title is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for card in &self.cards {
            if !seen.insert(card.id.as_str()) {
                return Err(Error::InvalidDeck(format!("duplicate card id '{}'", card.id)));
            }
            if card.options.is_empty() {
                return Err(Error::InvalidDeck(format!("card '{}' has no options", card.id)));
            }
            if card.correct_option().is_none() {
                return Err(Error::InvalidDeck(format!(
                    "card '{}' answer '{}' is not one of its options",
                    card.id, card.correct_option_id
                )));
            }
        }
        Ok(())
    }
}
