//! Built-in deck used to seed an empty store.
use super::{Card, Deck, Timestamp};

pub const SAMPLE_DECK_ID: &str = "deck_101";

pub fn sample_deck(now: Timestamp) -> Deck {
    let mut deck = Deck::new(SAMPLE_DECK_ID, "Physics Final Exam 2024 - Paper 101", "Physics", 2024);
    deck.time_limit = Some(50);
    deck.is_read_only = true;
    deck.cards = vec![
        Card::new(
            "q1",
            "An object oscillates harmonically with angular frequency ω. Which formula gives its period?",
            &["T = 2πω", "T = ω/2π", "T = 2π/ω", "T = πω"],
            2,
            now,
        )
        .with_explanation("The period of harmonic oscillation is T = 2π/ω."),
        Card::new(
            "q2",
            "An AC voltage u = U₀cos(ωt) is applied across a circuit containing only a capacitor. Compared with the current, the voltage",
            &["lags by π/2", "leads by π/2", "is in phase", "is in antiphase"],
            0,
            now,
        )
        .with_explanation("In a purely capacitive circuit the voltage lags the current by π/2."),
        Card::new(
            "q3",
            "Which of these nuclei can undergo fission?",
            &["Helium (He)", "Carbon (C)", "Uranium (U)", "Nitrogen (N)"],
            2,
            now,
        )
        .with_explanation("Uranium-235 is a heavy nucleus and can undergo fission."),
        Card::new(
            "q4",
            "In vacuum, which of these wavelengths belongs to a radio wave?",
            &["60 m", "0.6 µm", "6 nm", "6 pm"],
            0,
            now,
        )
        .with_explanation("Radio waves range from metres to kilometres; 60 m is shortwave."),
        Card::new(
            "q5",
            "The SI unit of magnetic flux is the",
            &["tesla", "weber", "henry", "farad"],
            1,
            now,
        ),
    ];
    deck
}
