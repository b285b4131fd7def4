//! Container for all available decks
use super::{Deck, LearningState};

#[derive(Clone, Debug, Default)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}

impl DeckSet {
    pub fn get(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    pub fn get_mut(&mut self, deck_id: &str) -> Option<&mut Deck> {
        self.decks.iter_mut().find(|d| d.id == deck_id)
    }

    pub fn add(&mut self, deck: Deck) {
        self.decks.push(deck);
    }

    pub fn remove(&mut self, deck_id: &str) -> Option<Deck> {
        let index = self.decks.iter().position(|d| d.id == deck_id)?;
        Some(self.decks.remove(index))
    }

    /// Stores a freshly scheduled state on a card. Returns false if the card is unknown.
    pub fn update_card_state(&mut self, deck_id: &str, card_id: &str, state: LearningState) -> bool {
        match self.get_mut(deck_id).and_then(|d| d.card_mut(card_id)) {
            Some(card) => {
                card.learning_state = state;
                true
            }
            None => false,
        }
    }
}
