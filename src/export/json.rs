//! JSON import/export module for flashcard decks.
//! Exported files carry the full learning state of every card; imported files
//! only need a title and a list of questions.

use crate::error::Result;
use crate::models::{AnswerOption, Card, Deck, Difficulty, LearningState, Timestamp};
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SUBJECT: &str = "General";

/// Card shape accepted on import. Any learning state in the file is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedCard {
    id: String,
    stem: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    level: Option<Difficulty>,
    options: Vec<AnswerOption>,
    #[serde(alias = "correctAnswerId")]
    correct_option_id: String,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedDeck {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    time_limit: Option<u32>,
    #[serde(default)]
    year: Option<i32>,
    cards: Vec<ImportedCard>,
}

/// Exports a deck to a JSON file at the specified path.
pub fn export_json_to_path(deck: &Deck, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(deck)?;
    fs::write(path, json_string)?;
    tracing::info!("Deck '{}' exported to '{}'", deck.title, path.display());
    Ok(())
}

/// Parses an imported deck. Missing id, subject and year are filled in from
/// `now`, the deck becomes editable, and every card starts fresh.
pub fn parse_deck_json(contents: &str, now: Timestamp) -> Result<Deck> {
    let imported: ImportedDeck = serde_json::from_str(contents)?;
    let current_year = DateTime::<Utc>::from_timestamp_millis(now)
        .map(|d| d.year())
        .unwrap_or(1970);

    let deck = Deck {
        id: imported.id.unwrap_or_else(|| format!("deck_{}", now)),
        title: imported.title,
        subject: imported
            .subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        description: imported.description,
        time_limit: imported.time_limit,
        cards: imported
            .cards
            .into_iter()
            .map(|c| Card {
                id: c.id,
                stem: c.stem,
                image_url: c.image_url,
                level: c.level,
                options: c.options,
                correct_option_id: c.correct_option_id,
                learning_state: LearningState::new(now),
                explanation: c.explanation,
            })
            .collect(),
        is_read_only: false,
        year: imported.year.unwrap_or(current_year),
    };

    deck.validate()?;
    Ok(deck)
}

/// Imports a deck from a JSON file.
/// Returns an error if the file doesn't exist, contains invalid JSON, or
/// describes a deck that cannot be studied.
pub fn import_json(path: &Path, now: Timestamp) -> Result<Deck> {
    let contents = fs::read_to_string(path)?;
    let deck = parse_deck_json(&contents, now).map_err(|e| {
        tracing::warn!("Import of '{}' failed: {}", path.display(), e);
        e
    })?;

    tracing::info!(
        "Deck '{}' ({} cards) imported from '{}'",
        deck.title,
        deck.cards.len(),
        path.display()
    );
    Ok(deck)
}

/// Reads a file written by [`export_json_to_path`], keeping learning states.
pub fn load_exported_json(path: &Path) -> Result<Deck> {
    let contents = fs::read_to_string(path)?;
    let deck: Deck = serde_json::from_str(&contents)?;
    deck.validate()?;
    if deck.cards.is_empty() {
        tracing::warn!("Deck '{}' in '{}' has no cards", deck.title, path.display());
    }
    Ok(deck)
}
