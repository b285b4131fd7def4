//! Simplified SM-2 spaced repetition scheduling.
//!
//! Every review produces a fresh [`LearningState`] from the previous one:
//! - "Again" sends the card back to relearning: interval and repetitions reset,
//!   the ease factor drops by 0.2 and the card is due again one minute later
//! - "Good" starts the card at 1 day, then multiplies the interval by the ease factor
//! - "Easy" starts the card at 4 days, then multiplies by the ease factor and a 1.3 bonus
//! - Successful reviews leave the ease factor unchanged
//! - The ease factor never drops below 1.3
//!
//! The current time is passed in, so scheduling is a pure function of its inputs.

use super::{LearningState, LearningStatus, Rating, Timestamp};

pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Ease factor penalty applied on "Again"
pub const EASE_PENALTY: f64 = 0.2;
/// Extra growth multiplier for "Easy"
pub const EASY_BONUS: f64 = 1.3;
/// First interval in days after "Good" on a fresh or relearning card
pub const GOOD_FIRST_INTERVAL: f64 = 1.0;
/// First interval in days after "Easy" on a fresh or relearning card
pub const EASY_FIRST_INTERVAL: f64 = 4.0;
/// Delay before a failed card is shown again
pub const RELEARN_DELAY_MS: i64 = 60 * 1000;
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Calculates the learning state that follows `rating` given at `now`.
pub fn review_next(current: &LearningState, rating: Rating, now: Timestamp) -> LearningState {
    let LearningState {
        interval,
        ease_factor,
        repetitions,
        ..
    } = *current;

    let new_interval = match rating {
        Rating::Again => {
            return LearningState {
                status: LearningStatus::Relearning,
                next_review_date: now.saturating_add(RELEARN_DELAY_MS),
                interval: 0.0,
                ease_factor: (ease_factor - EASE_PENALTY).max(MIN_EASE_FACTOR),
                repetitions: 0,
                last_review_date: Some(now),
            };
        }
        Rating::Easy if interval == 0.0 => EASY_FIRST_INTERVAL,
        Rating::Easy => interval * ease_factor * EASY_BONUS,
        Rating::Good if interval == 0.0 => GOOD_FIRST_INTERVAL,
        Rating::Good => interval * ease_factor,
    };

    LearningState {
        status: LearningStatus::Review,
        next_review_date: now.saturating_add(days_to_millis(new_interval)),
        interval: new_interval,
        ease_factor: ease_factor.max(MIN_EASE_FACTOR),
        repetitions: repetitions.saturating_add(1),
        last_review_date: Some(now),
    }
}

/// Whole milliseconds in `days`. Saturates at `i64::MAX`; a positive
/// interval is never shorter than 1 ms, so the card stays due after `now`.
fn days_to_millis(days: f64) -> i64 {
    let millis = (days * MS_PER_DAY as f64).round() as i64;
    if days > 0.0 { millis.max(1) } else { millis }
}

/// One decimal place with ties rounded up: 1.25 -> "1.3".
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Short human-readable form of an interval in days, e.g. "12h", "3d", "1.5mo".
pub fn format_interval(interval_days: f64) -> String {
    if interval_days == 0.0 {
        return "< 10m".to_string();
    }
    if interval_days < 1.0 {
        return format!("{}h", (interval_days * 24.0).round());
    }
    // Years before months: 365 days must not render as "12.2mo"
    if interval_days >= 365.0 {
        return format!("{}y", one_decimal(interval_days / 365.0));
    }
    if interval_days >= 30.0 {
        return format!("{}mo", one_decimal(interval_days / 30.0));
    }
    format!("{}d", interval_days.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn state(interval: f64, ease_factor: f64, repetitions: u32) -> LearningState {
        LearningState {
            status: LearningStatus::Review,
            next_review_date: 0,
            interval,
            ease_factor,
            repetitions,
            last_review_date: Some(0),
        }
    }

    #[test]
    fn test_new_card_good() {
        let next = review_next(&LearningState::new(0), Rating::Good, 1000);

        assert_eq!(next.status, LearningStatus::Review);
        assert_eq!(next.interval, 1.0);
        assert_eq!(next.ease_factor, 2.5);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.next_review_date, 1000 + 86_400_000);
        assert_eq!(next.last_review_date, Some(1000));
    }

    #[test]
    fn test_new_card_easy() {
        let next = review_next(&LearningState::new(0), Rating::Easy, 1000);

        assert_eq!(next.status, LearningStatus::Review);
        assert_eq!(next.interval, 4.0);
        assert_eq!(next.ease_factor, 2.5);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.next_review_date, 1000 + 4 * 86_400_000);
        assert_eq!(next.last_review_date, Some(1000));
    }

    #[test]
    fn test_again_resets_progress() {
        let next = review_next(&state(10.0, 2.0, 3), Rating::Again, 5000);

        assert_eq!(next.status, LearningStatus::Relearning);
        assert_eq!(next.interval, 0.0);
        assert!((next.ease_factor - 1.8).abs() < EPSILON);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.next_review_date, 65_000);
        assert_eq!(next.last_review_date, Some(5000));
    }

    #[test]
    fn test_again_ease_factor_floor() {
        let mut current = state(1.0, 1.3, 1);

        for _ in 0..5 {
            current = review_next(&current, Rating::Again, 10_000);
            assert_eq!(current.ease_factor, MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_again_ease_never_increases() {
        let mut current = state(20.0, 2.5, 6);
        let mut previous_ef = current.ease_factor;

        for _ in 0..10 {
            current = review_next(&current, Rating::Again, 0);
            assert!(current.ease_factor <= previous_ef);
            assert!(current.ease_factor >= MIN_EASE_FACTOR);
            previous_ef = current.ease_factor;
        }

        assert_eq!(current.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_again_from_every_status() {
        for status in [
            LearningStatus::New,
            LearningStatus::Learning,
            LearningStatus::Review,
            LearningStatus::Relearning,
        ] {
            let current = LearningState {
                status,
                ..state(3.0, 2.5, 2)
            };
            let next = review_next(&current, Rating::Again, 7);
            assert_eq!(next.status, LearningStatus::Relearning);
            assert_eq!(next.next_review_date, 7 + 60_000);
        }
    }

    #[test]
    fn test_good_multiplies_by_ease_factor() {
        let next = review_next(&state(6.0, 2.5, 2), Rating::Good, 0);

        assert!((next.interval - 15.0).abs() < EPSILON);
        assert_eq!(next.repetitions, 3);
        assert_eq!(next.next_review_date, 15 * MS_PER_DAY);
    }

    #[test]
    fn test_easy_adds_bonus() {
        let next = review_next(&state(6.0, 2.5, 2), Rating::Easy, 0);

        assert!((next.interval - 6.0 * 2.5 * 1.3).abs() < EPSILON);
        assert_eq!(next.repetitions, 3);
        assert_eq!(next.status, LearningStatus::Review);
    }

    #[test]
    fn test_success_leaves_ease_factor_unchanged() {
        let good = review_next(&state(3.0, 2.1, 1), Rating::Good, 0);
        let easy = review_next(&state(3.0, 2.1, 1), Rating::Easy, 0);

        assert_eq!(good.ease_factor, 2.1);
        assert_eq!(easy.ease_factor, 2.1);
    }

    #[test]
    fn test_success_clamps_low_ease_factor() {
        let next = review_next(&state(2.0, 1.1, 1), Rating::Good, 0);

        assert_eq!(next.ease_factor, MIN_EASE_FACTOR);
        // Interval growth uses the factor as it was before clamping
        assert!((next.interval - 2.2).abs() < EPSILON);
    }

    #[test]
    fn test_relearning_card_restarts_at_first_interval() {
        let failed = review_next(&state(30.0, 2.5, 4), Rating::Again, 0);
        let good = review_next(&failed, Rating::Good, 60_000);
        let easy = review_next(&failed, Rating::Easy, 60_000);

        assert_eq!(good.interval, 1.0);
        assert_eq!(good.repetitions, 1);
        assert_eq!(easy.interval, 4.0);
        assert!((good.ease_factor - 2.3).abs() < EPSILON);
    }

    #[test]
    fn test_repeated_good_diverges() {
        let first = review_next(&LearningState::new(0), Rating::Good, 0);
        let second = review_next(&first, Rating::Good, first.next_review_date);
        let third = review_next(&second, Rating::Good, second.next_review_date);

        assert!(second.interval > first.interval);
        assert!(third.interval > second.interval);
        assert_eq!(third.repetitions, 3);
    }

    #[test]
    fn test_due_date_after_review() {
        for interval in [0.5, 1e-6, 1e-10, 1e-300] {
            let start = state(interval, 1.3, 0);
            for rating in Rating::ALL {
                let next = review_next(&start, rating, 123_456);
                assert!(next.next_review_date > next.last_review_date.unwrap());
                assert!(next.interval >= 0.0);
                assert!(next.ease_factor >= MIN_EASE_FACTOR);
                assert_ne!(next.status, LearningStatus::New);
            }
        }
    }

    #[test]
    fn test_tiny_interval_due_one_millisecond_later() {
        let next = review_next(&state(1e-10, 2.5, 1), Rating::Good, 1000);

        assert_eq!(next.next_review_date, 1001);
        assert_eq!(next.last_review_date, Some(1000));
    }

    #[test]
    fn test_huge_interval_saturates_due_date() {
        let now = 1_700_000_000_000;
        let next = review_next(&state(1e15, 2.5, 3), Rating::Good, now);

        assert_eq!(next.next_review_date, i64::MAX);
        assert!(next.next_review_date > now);
        assert_eq!(next.status, LearningStatus::Review);
    }

    #[test]
    fn test_long_easy_streak_does_not_overflow() {
        let now = 1_700_000_000_000;
        let mut current = LearningState::new(0);

        for _ in 0..40 {
            current = review_next(&current, Rating::Easy, now);
            assert!(current.next_review_date > now);
        }

        assert_eq!(current.repetitions, 40);
        assert_eq!(current.next_review_date, i64::MAX);

        let failed = review_next(&current, Rating::Again, i64::MAX - 1);
        assert_eq!(failed.next_review_date, i64::MAX);
    }

    #[test]
    fn test_transition_rules_hold_across_states() {
        let intervals = [0.0, 0.25, 1.0, 3.7, 42.0, 400.0];
        let ease_factors = [1.3, 1.45, 2.0, 2.5, 3.1];

        for &interval in &intervals {
            for &ease_factor in &ease_factors {
                for repetitions in [0, 1, 7] {
                    let current = state(interval, ease_factor, repetitions);
                    let now = 1_000_000;

                    let again = review_next(&current, Rating::Again, now);
                    assert_eq!(again.ease_factor, (ease_factor - 0.2).max(1.3));
                    assert_eq!(again.interval, 0.0);
                    assert_eq!(again.repetitions, 0);
                    assert_eq!(again.next_review_date, now + 60_000);

                    let good = review_next(&current, Rating::Good, now);
                    let easy = review_next(&current, Rating::Easy, now);
                    assert_eq!(good.repetitions, repetitions + 1);
                    assert_eq!(easy.repetitions, repetitions + 1);

                    if interval == 0.0 {
                        assert_eq!(good.interval, 1.0);
                        assert_eq!(easy.interval, 4.0);
                    } else {
                        assert!((good.interval - interval * ease_factor).abs() < EPSILON);
                        assert!((easy.interval - interval * ease_factor * 1.3).abs() < EPSILON);
                    }
                    assert!(easy.interval > good.interval);
                }
            }
        }
    }

    #[test]
    fn test_input_not_modified() {
        let current = state(5.0, 2.5, 2);
        let copy = current;
        let _ = review_next(&current, Rating::Easy, 99);

        assert_eq!(current, copy);
    }

    #[test]
    fn test_format_interval_boundaries() {
        assert_eq!(format_interval(0.0), "< 10m");
        assert_eq!(format_interval(0.5), "12h");
        assert_eq!(format_interval(1.0), "1d");
        assert_eq!(format_interval(29.4), "29d");
        assert_eq!(format_interval(30.0), "1.0mo");
        assert_eq!(format_interval(45.0), "1.5mo");
        assert_eq!(format_interval(364.0), "12.1mo");
        assert_eq!(format_interval(365.0), "1.0y");
        assert_eq!(format_interval(730.0), "2.0y");
    }

    #[test]
    fn test_format_interval_rounds_ties_up() {
        assert_eq!(format_interval(37.5), "1.3mo");
        assert_eq!(format_interval(456.25), "1.3y");
        assert_eq!(format_interval(31.5), "1.1mo");
    }

    #[test]
    fn test_format_interval_small_fractions() {
        assert_eq!(format_interval(1.0 / 24.0), "1h");
        assert_eq!(format_interval(0.01), "0h");
    }
}
