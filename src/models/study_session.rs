//! Round-based study of a deck.
//! Every card in a round gets a rating; the next round replays all of them,
//! failed cards first, then "Good", then "Easy".

use super::{Card, Deck, LearningState, Rating, Timestamp, sm2};

/// A card graded in the current round, carrying its updated learning state.
#[derive(Clone, Debug)]
pub struct RatedCard {
    pub card: Card,
    pub rating: Rating,
}

/// What the caller needs to persist after a rating.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewOutcome {
    pub card_id: String,
    pub rating: Rating,
    pub state: LearningState,
    /// True when this rating closed the round and the queue was rebuilt
    pub round_finished: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub again: usize,
    pub good: usize,
    pub easy: usize,
}

pub struct StudySession {
    pub deck_id: String,
    pub deck_title: String,
    queue: Vec<Card>,
    rated: Vec<RatedCard>,
    current_index: usize,
    round_number: usize,
    selected_option: Option<String>,
    revealed: bool,
}

impl StudySession {
    /// Studies every card of the deck in deck order.
    pub fn new(deck: &Deck) -> Self {
        Self::with_cards(deck, deck.cards.clone())
    }

    /// Studies only the cards that are due at `now`, most overdue first.
    pub fn new_from_due_cards(deck: &Deck, now: Timestamp) -> Self {
        let cards = deck.due_cards(now).into_iter().cloned().collect();
        Self::with_cards(deck, cards)
    }

    fn with_cards(deck: &Deck, cards: Vec<Card>) -> Self {
        Self {
            deck_id: deck.id.clone(),
            deck_title: deck.title.clone(),
            queue: cards,
            rated: Vec::new(),
            current_index: 0,
            round_number: 1,
            selected_option: None,
            revealed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.queue.get(self.current_index)
    }

    pub fn round(&self) -> usize {
        self.round_number
    }

    /// 1-based position of the current card within the round.
    pub fn position(&self) -> usize {
        self.current_index + 1
    }

    pub fn round_len(&self) -> usize {
        self.queue.len()
    }

    /// Picks an answer. Ignored once the answer has been revealed.
    pub fn select_option(&mut self, option_id: &str) {
        if !self.revealed {
            self.selected_option = Some(option_id.to_string());
        }
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Whether the selected option is the right one. `None` if nothing was selected.
    pub fn answered_correctly(&self) -> Option<bool> {
        let card = self.current_card()?;
        self.selected_option.as_deref().map(|id| card.is_correct(id))
    }

    /// State the current card would get for `rating`, without recording anything.
    pub fn preview(&self, rating: Rating, now: Timestamp) -> Option<LearningState> {
        self.current_card()
            .map(|card| sm2::review_next(&card.learning_state, rating, now))
    }

    /// Grades the current card, queues it for the next round and moves on.
    pub fn rate_current(&mut self, rating: Rating, now: Timestamp) -> Option<ReviewOutcome> {
        let mut card = self.current_card()?.clone();
        let state = card.apply_rating(rating, now);
        let card_id = card.id.clone();

        self.rated.push(RatedCard { card, rating });
        self.selected_option = None;
        self.revealed = false;

        let round_finished = self.current_index + 1 >= self.queue.len();
        if round_finished {
            self.start_next_round();
        } else {
            self.current_index += 1;
        }

        Some(ReviewOutcome {
            card_id,
            rating,
            state,
            round_finished,
        })
    }

    /// Rebuilds the queue from this round's ratings. The sort is stable, so
    /// cards with the same rating keep the order they were reviewed in.
    fn start_next_round(&mut self) {
        let summary = self.round_summary();
        let mut rated = std::mem::take(&mut self.rated);
        rated.sort_by_key(|r| r.rating.priority());

        self.queue = rated.into_iter().map(|r| r.card).collect();
        self.current_index = 0;
        self.round_number += 1;

        tracing::debug!(
            deck = %self.deck_id,
            round = self.round_number,
            again = summary.again,
            good = summary.good,
            easy = summary.easy,
            "starting next study round"
        );
    }

    /// Ratings given so far in the current round.
    pub fn round_summary(&self) -> RoundSummary {
        let mut summary = RoundSummary::default();
        for rated in &self.rated {
            match rated.rating {
                Rating::Again => summary.again += 1,
                Rating::Good => summary.good += 1,
                Rating::Easy => summary.easy += 1,
            }
        }
        summary
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.round_len())
        } else {
            format!(
                "Round {} (Review): {} cards",
                self.round_number,
                self.round_len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LearningStatus;

    fn test_deck() -> Deck {
        let mut deck = Deck::new("d1", "Test Deck", "Test", 2024);
        for id in ["a", "b", "c", "d"] {
            deck.cards.push(Card::new(id, id, &["yes", "no"], 0, 0));
        }
        deck
    }

    fn queue_ids(session: &StudySession) -> Vec<&str> {
        session.queue.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_session() {
        let deck = Deck::new("d0", "Empty", "Test", 2024);
        let mut session = StudySession::new(&deck);

        assert!(session.is_empty());
        assert!(session.current_card().is_none());
        assert!(session.rate_current(Rating::Good, 0).is_none());
    }

    #[test]
    fn test_rate_advances_and_returns_state() {
        let mut session = StudySession::new(&test_deck());

        let outcome = session.rate_current(Rating::Good, 1000).unwrap();
        assert_eq!(outcome.card_id, "a");
        assert_eq!(outcome.state.status, LearningStatus::Review);
        assert_eq!(outcome.state.next_review_date, 1000 + 86_400_000);
        assert!(!outcome.round_finished);
        assert_eq!(session.current_card().unwrap().id, "b");
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn test_next_round_orders_by_rating_priority() {
        let mut session = StudySession::new(&test_deck());

        session.rate_current(Rating::Easy, 0);
        session.rate_current(Rating::Again, 0);
        session.rate_current(Rating::Good, 0);
        let last = session.rate_current(Rating::Again, 0).unwrap();

        assert!(last.round_finished);
        assert_eq!(session.round(), 2);
        assert_eq!(queue_ids(&session), vec!["b", "d", "c", "a"]);
        assert_eq!(session.round_summary(), RoundSummary::default());
    }

    #[test]
    fn test_next_round_carries_updated_state() {
        let mut session = StudySession::new(&test_deck());
        for _ in 0..4 {
            session.rate_current(Rating::Good, 0);
        }

        let card = session.current_card().unwrap();
        assert_eq!(card.learning_state.repetitions, 1);
        assert_eq!(card.learning_state.interval, 1.0);

        let outcome = session.rate_current(Rating::Good, 0).unwrap();
        assert_eq!(outcome.state.repetitions, 2);
        assert_eq!(outcome.state.interval, 2.5);
    }

    #[test]
    fn test_round_summary_counts() {
        let mut session = StudySession::new(&test_deck());
        session.rate_current(Rating::Again, 0);
        session.rate_current(Rating::Easy, 0);
        session.rate_current(Rating::Again, 0);

        assert_eq!(
            session.round_summary(),
            RoundSummary {
                again: 2,
                good: 0,
                easy: 1
            }
        );
    }

    #[test]
    fn test_due_cards_only() {
        let mut deck = test_deck();
        deck.card_mut("b").unwrap().apply_rating(Rating::Easy, 0);
        deck.card_mut("c").unwrap().apply_rating(Rating::Good, 0);

        let session = StudySession::new_from_due_cards(&deck, 1000);
        assert_eq!(session.round_len(), 2);
        assert_eq!(queue_ids(&session), vec!["a", "d"]);
    }

    #[test]
    fn test_select_and_reveal() {
        let mut session = StudySession::new(&test_deck());
        assert!(session.answered_correctly().is_none());

        session.select_option("a_1");
        assert_eq!(session.answered_correctly(), Some(false));

        session.reveal();
        session.select_option("a_0");
        assert_eq!(session.selected_option(), Some("a_1"));

        session.rate_current(Rating::Again, 0);
        assert!(!session.is_revealed());
        assert!(session.selected_option().is_none());
    }

    #[test]
    fn test_preview_does_not_record() {
        let session = StudySession::new(&test_deck());

        let easy = session.preview(Rating::Easy, 0).unwrap();
        assert_eq!(easy.interval, 4.0);
        assert_eq!(session.current_card().unwrap().learning_state.status, LearningStatus::New);
        assert_eq!(session.round_summary(), RoundSummary::default());
    }

    #[test]
    fn test_phase_message() {
        let mut session = StudySession::new(&test_deck());
        assert_eq!(session.phase_message(), "Round 1: 4 cards");

        for _ in 0..4 {
            session.rate_current(Rating::Good, 0);
        }
        assert_eq!(session.phase_message(), "Round 2 (Review): 4 cards");
    }
}
