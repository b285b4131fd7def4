pub mod card;
pub mod deck;
pub mod deck_set;
pub mod learning_state;
pub mod rating;
pub mod sample;
pub mod sm2;
pub mod study_session;

pub use card::{AnswerOption, Card, Difficulty};
pub use deck::Deck;
pub use deck_set::DeckSet;
pub use learning_state::{LearningState, LearningStatus, Timestamp};
pub use rating::Rating;
pub use sample::sample_deck;
pub use study_session::{ReviewOutcome, RoundSummary, StudySession};
