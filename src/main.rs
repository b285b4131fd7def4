mod app;

use app::{App, Command};
use mcq_flashcards::config::Config;
use mcq_flashcards::database::db;
use mcq_flashcards::models::sample_deck;
use mcq_flashcards::now_millis;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcq_flashcards=info,flashcards=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(2);
        }
    };

    let config = Config::load();
    let conn = match db::init_database(&config.database_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if config.seed_sample_deck {
        seed_if_empty(&conn);
    }

    if let Err(e) = App::new(conn).run(command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn seed_if_empty(conn: &rusqlite::Connection) {
    match db::seed_if_empty(&sample_deck(now_millis()), conn) {
        Ok(Some(id)) => tracing::info!("Sample deck created as {}", id),
        Ok(None) => {}
        Err(e) => tracing::warn!("Skipping sample deck: {}", e),
    }
}
