//! Terminal front-end: deck management commands and the interactive study loop.

use mcq_flashcards::database::db;
use mcq_flashcards::export::json::{export_json_to_path, import_json};
use mcq_flashcards::models::{AnswerOption, Card, Rating, StudySession};
use mcq_flashcards::{Error, Result, format_interval, now_millis};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const USAGE: &str = "Usage:
  flashcards [list]                 list decks and how many cards are due
  flashcards study <deck-id>        study the due cards of a deck
  flashcards import <file.json>     import a deck from JSON
  flashcards export <deck-id> <file.json>
  flashcards reset <deck-id>        forget all progress in a deck";

#[derive(Debug, PartialEq)]
pub enum Command {
    List,
    Study(String),
    Import(PathBuf),
    Export(String, PathBuf),
    Reset(String),
}

impl Command {
    pub fn parse(args: &[String]) -> std::result::Result<Self, String> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            [] | ["list"] => Ok(Command::List),
            ["study", deck_id] => Ok(Command::Study(deck_id.to_string())),
            ["import", path] => Ok(Command::Import(PathBuf::from(path))),
            ["export", deck_id, path] => Ok(Command::Export(deck_id.to_string(), PathBuf::from(path))),
            ["reset", deck_id] => Ok(Command::Reset(deck_id.to_string())),
            _ => Err(USAGE.to_string()),
        }
    }
}

pub struct App {
    conn: Connection,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn run(&self, command: Command) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        match command {
            Command::List => self.list_decks(&mut stdout),
            Command::Study(deck_id) => self.study(&deck_id, stdin.lock(), &mut stdout),
            Command::Import(path) => {
                let deck = import_json(&path, now_millis())?;
                let id = db::import_deck(&deck, &self.conn)?;
                writeln!(stdout, "Imported '{}' ({} cards) as {}", deck.title, deck.cards.len(), id)?;
                Ok(())
            }
            Command::Export(deck_id, path) => {
                let deck = db::get_deck(&deck_id, &self.conn)?
                    .ok_or_else(|| Error::NotFound(format!("deck {}", deck_id)))?;
                export_json_to_path(&deck, &path)?;
                writeln!(stdout, "Exported '{}' to {}", deck.title, path.display())?;
                Ok(())
            }
            Command::Reset(deck_id) => {
                let count = db::reset_deck(&deck_id, now_millis(), &self.conn)?;
                writeln!(stdout, "Reset {} cards", count)?;
                Ok(())
            }
        }
    }

    fn list_decks<W: Write>(&self, out: &mut W) -> Result<()> {
        let now = now_millis();
        let decks = db::get_decks(&self.conn)?;
        writeln!(out, "Decks ({})", decks.len())?;
        for deck in &decks {
            writeln!(
                out,
                "  {}  {} [{}, {}] - {} cards, {} due{}",
                deck.id,
                deck.title,
                deck.subject,
                deck.year,
                deck.cards.len(),
                deck.due_cards(now).len(),
                if deck.is_read_only { " (read-only)" } else { "" }
            )?;
        }
        Ok(())
    }

    /// Runs rounds over the deck's due cards until the input ends or the user quits.
    /// Every rating is written to the database straight away.
    pub fn study<R: BufRead, W: Write>(&self, deck_id: &str, mut input: R, out: &mut W) -> Result<()> {
        let deck = db::get_deck(deck_id, &self.conn)?
            .ok_or_else(|| Error::NotFound(format!("deck {}", deck_id)))?;

        let mut session = StudySession::new_from_due_cards(&deck, now_millis());
        if session.is_empty() {
            writeln!(out, "Nothing due in '{}'", deck.title)?;
            return Ok(());
        }

        writeln!(out, "{}", session.deck_title)?;
        writeln!(out, "{}", session.phase_message())?;

        while let Some(card) = session.current_card().cloned() {
            writeln!(out)?;
            writeln!(out, "[{}/{}] {}", session.position(), session.round_len(), card.stem)?;
            for (i, option) in card.options.iter().enumerate() {
                writeln!(out, "  {}. {}", Card::option_label(i), option.text)?;
            }

            let Some(answer) = prompt(&mut input, out, "Answer (letter, Enter to reveal, q to quit): ")? else {
                break;
            };
            if answer.eq_ignore_ascii_case("q") {
                break;
            }
            if let Some(option) = option_by_label(&card, &answer) {
                session.select_option(&option.id);
            }
            session.reveal();

            match session.answered_correctly() {
                Some(true) => writeln!(out, "Correct!")?,
                Some(false) => writeln!(out, "Wrong.")?,
                None => {}
            }
            if let Some(correct) = card.correct_option() {
                writeln!(out, "Answer: {}", correct.text)?;
            }
            if let Some(explanation) = &card.explanation {
                writeln!(out, "{}", explanation)?;
            }

            let now = now_millis();
            let choices: Vec<String> = Rating::ALL
                .iter()
                .enumerate()
                .filter_map(|(i, rating)| {
                    session
                        .preview(*rating, now)
                        .map(|s| format!("{}) {} ({})", i + 1, rating, format_interval(s.interval)))
                })
                .collect();

            let rating = loop {
                let Some(line) = prompt(&mut input, out, &format!("{}: ", choices.join("  ")))? else {
                    return Ok(());
                };
                match parse_rating(&line) {
                    Some(rating) => break rating,
                    None => writeln!(out, "Pick 1, 2 or 3")?,
                }
            };

            if let Some(outcome) = session.rate_current(rating, now) {
                db::update_card_state(&outcome.card_id, &outcome.state, &self.conn)?;
                if outcome.round_finished {
                    writeln!(out)?;
                    writeln!(out, "{}", session.phase_message())?;
                }
            }
        }

        Ok(())
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn option_by_label<'a>(card: &'a Card, label: &str) -> Option<&'a AnswerOption> {
    card.options
        .iter()
        .enumerate()
        .find(|(i, _)| Card::option_label(*i).eq_ignore_ascii_case(label))
        .map(|(_, option)| option)
}

fn parse_rating(input: &str) -> Option<Rating> {
    match input {
        "1" => Some(Rating::Again),
        "2" => Some(Rating::Good),
        "3" => Some(Rating::Easy),
        other => other.parse().ok(),
    }
}
