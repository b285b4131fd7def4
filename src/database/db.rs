//! Database operations for flashcard application
//!
//! Handles SQLite database initialization, CRUD operations for decks and cards,
//! and persistence of each card's learning state.

use crate::error::{Error, Result};
use crate::models::{AnswerOption, Card, Deck, Difficulty, LearningState, LearningStatus, Timestamp};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

impl ToSql for LearningStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LearningStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// Opens (or creates) the SQLite database at `path` with all tables in place.
pub fn init_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    tracing::info!("Opened database at {}", path.display());
    Ok(conn)
}

/// In-memory database, used by tests and throwaway sessions.
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS decks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            description TEXT,
            time_limit INTEGER,
            is_read_only INTEGER NOT NULL DEFAULT 0,
            year INTEGER NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            deck_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            stem TEXT NOT NULL,
            image_url TEXT,
            level TEXT,
            explanation TEXT,
            options TEXT NOT NULL,
            correct_option_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'New',
            next_review_date INTEGER NOT NULL,
            interval_days REAL NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            repetitions INTEGER NOT NULL DEFAULT 0,
            last_review_date INTEGER,
            FOREIGN KEY (deck_id) REFERENCES decks(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_cards_due ON cards (deck_id, next_review_date);",
    )?;
    Ok(())
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creates an empty, editable deck and returns its id.
pub fn create_deck(title: &str, subject: &str, year: i32, conn: &Connection) -> Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO decks (id, title, subject, year, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, title, subject, year, crate::now_millis()],
    )?;
    tracing::info!("Deck '{}' created with id {}", title, id);
    Ok(id)
}

fn insert_deck_row(id: &str, deck: &Deck, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO decks (id, title, subject, description, time_limit, is_read_only, year, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            deck.title,
            deck.subject,
            deck.description,
            deck.time_limit,
            deck.is_read_only,
            deck.year,
            crate::now_millis()
        ],
    )?;
    Ok(())
}

fn insert_card_row(id: &str, deck_id: &str, position: i64, card: &Card, conn: &Connection) -> Result<()> {
    let options = serde_json::to_string(&card.options)?;
    let state = &card.learning_state;
    conn.execute(
        "INSERT INTO cards (id, deck_id, position, stem, image_url, level, explanation, options,
                            correct_option_id, status, next_review_date, interval_days, ease_factor,
                            repetitions, last_review_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            id,
            deck_id,
            position,
            card.stem,
            card.image_url,
            card.level,
            card.explanation,
            options,
            card.correct_option_id,
            state.status,
            state.next_review_date,
            state.interval,
            state.ease_factor,
            state.repetitions,
            state.last_review_date
        ],
    )?;
    Ok(())
}

/// Stores a whole deck under a new id. Cards get new ids too; their
/// learning states are written as given.
pub fn import_deck(deck: &Deck, conn: &Connection) -> Result<String> {
    let deck_id = new_id();
    let tx = conn.unchecked_transaction()?;

    insert_deck_row(&deck_id, deck, &tx)?;
    for (position, card) in deck.cards.iter().enumerate() {
        insert_card_row(&new_id(), &deck_id, position as i64, card, &tx)?;
    }

    tx.commit()?;
    tracing::info!(
        "Imported deck '{}' ({} cards) as {}",
        deck.title,
        deck.cards.len(),
        deck_id
    );
    Ok(deck_id)
}

/// Appends a card to a deck, keeping the card's id.
pub fn add_card(deck_id: &str, card: &Card, conn: &Connection) -> Result<()> {
    let position: Option<i64> = conn
        .query_row(
            "SELECT (SELECT MAX(position) FROM cards WHERE deck_id = ?1) FROM decks WHERE id = ?1",
            params![deck_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("deck {}", deck_id)))?;

    let next_position = position.map_or(0, |p| p + 1);
    insert_card_row(&card.id, deck_id, next_position, card, conn)
}

pub fn delete_card(card_id: &str, conn: &Connection) -> Result<()> {
    let deleted = conn.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
    if deleted == 0 {
        return Err(Error::NotFound(format!("card {}", card_id)));
    }
    Ok(())
}

/// Removes a deck and, through the foreign key, all of its cards.
pub fn delete_deck(deck_id: &str, conn: &Connection) -> Result<()> {
    let deleted = conn.execute("DELETE FROM decks WHERE id = ?1", params![deck_id])?;
    if deleted == 0 {
        return Err(Error::NotFound(format!("deck {}", deck_id)));
    }
    tracing::info!("Deleted deck {}", deck_id);
    Ok(())
}

/// Writes a card's new learning state after a review
pub fn update_card_state(card_id: &str, state: &LearningState, conn: &Connection) -> Result<()> {
    let updated = conn.execute(
        "UPDATE cards
         SET status = ?1, next_review_date = ?2, interval_days = ?3, ease_factor = ?4,
             repetitions = ?5, last_review_date = ?6
         WHERE id = ?7",
        params![
            state.status,
            state.next_review_date,
            state.interval,
            state.ease_factor,
            state.repetitions,
            state.last_review_date,
            card_id
        ],
    )?;
    if updated == 0 {
        return Err(Error::NotFound(format!("card {}", card_id)));
    }
    tracing::debug!(card = card_id, status = state.status.as_str(), "Updated learning state");
    Ok(())
}

/// Puts every card of a deck back to the never-reviewed state.
/// Returns the number of cards reset.
pub fn reset_deck(deck_id: &str, now: Timestamp, conn: &Connection) -> Result<usize> {
    let initial = LearningState::new(now);
    let reset = conn.execute(
        "UPDATE cards
         SET status = ?1, next_review_date = ?2, interval_days = ?3, ease_factor = ?4,
             repetitions = ?5, last_review_date = NULL
         WHERE deck_id = ?6",
        params![
            initial.status,
            initial.next_review_date,
            initial.interval,
            initial.ease_factor,
            initial.repetitions,
            deck_id
        ],
    )?;
    tracing::info!("Reset {} cards in deck {}", reset, deck_id);
    Ok(reset)
}

const CARD_COLUMNS: &str = "id, stem, image_url, level, explanation, options, correct_option_id,
     status, next_review_date, interval_days, ease_factor, repetitions, last_review_date";

fn card_from_row(row: &Row) -> rusqlite::Result<Card> {
    let options_json: String = row.get(5)?;
    let options: Vec<AnswerOption> = serde_json::from_str(&options_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Card {
        id: row.get(0)?,
        stem: row.get(1)?,
        image_url: row.get(2)?,
        level: row.get(3)?,
        explanation: row.get(4)?,
        options,
        correct_option_id: row.get(6)?,
        learning_state: LearningState {
            status: row.get(7)?,
            next_review_date: row.get(8)?,
            interval: row.get(9)?,
            ease_factor: row.get(10)?,
            repetitions: row.get(11)?,
            last_review_date: row.get(12)?,
        },
    })
}

/// Retrieves all cards of a deck in the order they were added
pub fn get_cards_for_deck(deck_id: &str, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM cards WHERE deck_id = ?1 ORDER BY position ASC",
        CARD_COLUMNS
    ))?;
    let cards = stmt
        .query_map(params![deck_id], card_from_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;
    Ok(cards)
}

/// Retrieves cards due for review in a deck
///
/// Returns cards where next_review_date <= now,
/// ordered by next_review_date (oldest first).
pub fn get_due_cards(deck_id: &str, now: Timestamp, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM cards
         WHERE deck_id = ?1 AND next_review_date <= ?2
         ORDER BY next_review_date ASC, position ASC",
        CARD_COLUMNS
    ))?;
    let cards = stmt
        .query_map(params![deck_id, now], card_from_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;
    Ok(cards)
}

fn deck_from_row(row: &Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        title: row.get(1)?,
        subject: row.get(2)?,
        description: row.get(3)?,
        time_limit: row.get(4)?,
        cards: Vec::new(),
        is_read_only: row.get(5)?,
        year: row.get(6)?,
    })
}

const DECK_COLUMNS: &str = "id, title, subject, description, time_limit, is_read_only, year";

/// Loads a deck with all of its cards
pub fn get_deck(deck_id: &str, conn: &Connection) -> Result<Option<Deck>> {
    let deck = conn
        .query_row(
            &format!("SELECT {} FROM decks WHERE id = ?1", DECK_COLUMNS),
            params![deck_id],
            deck_from_row,
        )
        .optional()?;

    match deck {
        Some(mut deck) => {
            deck.cards = get_cards_for_deck(&deck.id, conn)?;
            Ok(Some(deck))
        }
        None => Ok(None),
    }
}

/// Loads all decks with their cards, newest first
pub fn get_decks(conn: &Connection) -> Result<Vec<Deck>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM decks ORDER BY created_at DESC, rowid DESC",
        DECK_COLUMNS
    ))?;
    let mut decks = stmt
        .query_map([], deck_from_row)?
        .collect::<rusqlite::Result<Vec<Deck>>>()?;

    for deck in &mut decks {
        deck.cards = get_cards_for_deck(&deck.id, conn)?;
    }
    Ok(decks)
}

pub fn deck_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Imports `deck` only when the store holds no decks. Returns the new deck id,
/// or `None` when decks already exist. A failed count is returned as an error
/// and nothing is written.
pub fn seed_if_empty(deck: &Deck, conn: &Connection) -> Result<Option<String>> {
    if deck_count(conn)? > 0 {
        return Ok(None);
    }
    import_deck(deck, conn).map(Some)
}
