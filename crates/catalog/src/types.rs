//! Core domain types for the mood catalog.
//!
//! This module defines the two enumerations the whole pipeline keys on:
//! - `Mood`: what the user tells us they feel
//! - `Genre`: the intermediate key between a mood and concrete titles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-reported emotional state.
///
/// Mood parsing is case-insensitive and trims surrounding whitespace, so
/// `"Happy"`, `" HAPPY "` and `"happy"` all resolve to `Mood::Happy`.
/// An unrecognized label is a normal outcome (the caller prompts again),
/// which is why `FromStr` carries the rejected label in its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Romantic,
    Bored,
    Curious,
    Scared,
    Inspired,
}

impl Mood {
    /// All supported moods, in the order they are presented to the user.
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Romantic,
        Mood::Bored,
        Mood::Curious,
        Mood::Scared,
        Mood::Inspired,
    ];

    /// Lower-case label, matching what the voice path hears.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Romantic => "romantic",
            Mood::Bored => "bored",
            Mood::Curious => "curious",
            Mood::Scared => "scared",
            Mood::Inspired => "inspired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error carrying the label that failed to parse as a mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a supported mood", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            "romantic" => Ok(Mood::Romantic),
            "bored" => Ok(Mood::Bored),
            "curious" => Ok(Mood::Curious),
            "scared" => Ok(Mood::Scared),
            "inspired" => Ok(Mood::Inspired),
            _ => Err(UnknownMood(normalized)),
        }
    }
}

/// A movie category used as an intermediate key between mood and titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Comedy,
    Musical,
    Drama,
    Biography,
    Action,
    Thriller,
    Romance,
    Adventure,
    SciFi,
    Mystery,
    Horror,
    Documentary,
}

impl Genre {
    /// All genres referenced by the mood table.
    pub const ALL: [Genre; 12] = [
        Genre::Comedy,
        Genre::Musical,
        Genre::Drama,
        Genre::Biography,
        Genre::Action,
        Genre::Thriller,
        Genre::Romance,
        Genre::Adventure,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Horror,
        Genre::Documentary,
    ];
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Genre::Comedy => "Comedy",
            Genre::Musical => "Musical",
            Genre::Drama => "Drama",
            Genre::Biography => "Biography",
            Genre::Action => "Action",
            Genre::Thriller => "Thriller",
            Genre::Romance => "Romance",
            Genre::Adventure => "Adventure",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Horror => "Horror",
            Genre::Documentary => "Documentary",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_parse_case_insensitive() {
        assert_eq!("happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!("HAPPY".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!("  Romantic  ".parse::<Mood>().unwrap(), Mood::Romantic);
    }

    #[test]
    fn test_mood_parse_unknown() {
        let err = "ecstatic".parse::<Mood>().unwrap_err();
        assert_eq!(err.0, "ecstatic");
    }

    #[test]
    fn test_mood_roundtrip_through_label() {
        for mood in Mood::ALL {
            assert_eq!(mood.label().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn test_genre_display_scifi() {
        assert_eq!(Genre::SciFi.to_string(), "Sci-Fi");
    }
}
