//! Self-reported recall outcome for a single review.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Again,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Again, Rating::Good, Rating::Easy];

    /// Replay order between study rounds: failed cards come back first.
    pub fn priority(&self) -> u8 {
        match self {
            Rating::Again => 0,
            Rating::Good => 1,
            Rating::Easy => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" => Ok(Rating::Again),
            "good" => Ok(Rating::Good),
            "easy" => Ok(Rating::Easy),
            _ => Err(Error::InvalidRating(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ratings() {
        assert_eq!("Again".parse::<Rating>().unwrap(), Rating::Again);
        assert_eq!("good".parse::<Rating>().unwrap(), Rating::Good);
        assert_eq!(" EASY ".parse::<Rating>().unwrap(), Rating::Easy);
    }

    #[test]
    fn test_parse_unknown_rating_fails() {
        let result = "Hard".parse::<Rating>();
        assert!(matches!(result, Err(Error::InvalidRating(s)) if s == "Hard"));
    }

    #[test]
    fn test_priority_order() {
        assert!(Rating::Again.priority() < Rating::Good.priority());
        assert!(Rating::Good.priority() < Rating::Easy.priority());
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Rating::Good).unwrap(), "\"Good\"");
        assert!(serde_json::from_str::<Rating>("\"Medium\"").is_err());
    }
}
