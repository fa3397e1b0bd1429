//! Static mood-to-genre and genre-to-title lookup tables.
//!
//! These are process-wide read-only constants. There is no mutation API:
//! the tables are `'static` slices baked into the binary, and every lookup
//! returns a borrowed slice in declared order. Order matters downstream,
//! because the resolver attributes a shared title to the first genre that
//! lists it.

use crate::types::{Genre, Mood};

/// Genres associated with a mood, in presentation order.
pub fn genres_for_mood(mood: Mood) -> &'static [Genre] {
    match mood {
        Mood::Happy => &[Genre::Comedy, Genre::Musical],
        Mood::Sad => &[Genre::Drama, Genre::Biography],
        Mood::Angry => &[Genre::Action, Genre::Thriller],
        Mood::Romantic => &[Genre::Romance, Genre::Drama],
        Mood::Bored => &[Genre::Adventure, Genre::SciFi],
        Mood::Curious => &[Genre::Mystery, Genre::SciFi],
        Mood::Scared => &[Genre::Horror, Genre::Thriller],
        Mood::Inspired => &[Genre::Biography, Genre::Documentary],
    }
}

/// Candidate titles for a genre, in presentation order.
pub fn titles_for_genre(genre: Genre) -> &'static [&'static str] {
    match genre {
        Genre::Comedy => &["The Hangover", "Superbad"],
        Genre::Musical => &["La La Land", "The Greatest Showman"],
        Genre::Drama => &["The Pursuit of Happyness", "Forrest Gump"],
        Genre::Biography => &["Bohemian Rhapsody", "The Social Network"],
        Genre::Action => &["John Wick", "Mad Max: Fury Road"],
        Genre::Thriller => &["Inception", "Gone Girl"],
        Genre::Romance => &["The Notebook", "P.S. I Love You"],
        Genre::Adventure => &["Interstellar", "Life of Pi"],
        Genre::SciFi => &["Arrival", "Blade Runner 2049"],
        Genre::Mystery => &["Shutter Island", "The Prestige"],
        Genre::Horror => &["The Conjuring", "Get Out"],
        Genre::Documentary => &["The Last Dance", "Free Solo"],
    }
}

/// Case-insensitive string-keyed lookup.
///
/// An unknown label yields an empty slice. That is a normal, non-error
/// outcome: the caller is expected to prompt the user again rather than fail.
pub fn genres_for_label(label: &str) -> &'static [Genre] {
    label
        .parse::<Mood>()
        .map(genres_for_mood)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_genres() {
        for mood in Mood::ALL {
            assert!(
                !genres_for_mood(mood).is_empty(),
                "mood {mood} has no genres"
            );
        }
    }

    #[test]
    fn test_every_mood_genre_has_titles() {
        for mood in Mood::ALL {
            for &genre in genres_for_mood(mood) {
                assert!(
                    !titles_for_genre(genre).is_empty(),
                    "genre {genre} has no titles"
                );
            }
        }
    }

    #[test]
    fn test_every_genre_has_titles() {
        for genre in Genre::ALL {
            assert!(!titles_for_genre(genre).is_empty());
        }
    }

    #[test]
    fn test_happy_genre_order() {
        assert_eq!(
            genres_for_mood(Mood::Happy),
            &[Genre::Comedy, Genre::Musical]
        );
    }

    #[test]
    fn test_label_lookup_case_insensitive() {
        assert_eq!(genres_for_label("Happy"), genres_for_mood(Mood::Happy));
        assert_eq!(genres_for_label("  SCARED "), genres_for_mood(Mood::Scared));
    }

    #[test]
    fn test_unknown_label_is_empty_not_error() {
        assert!(genres_for_label("unknown-mood-xyz").is_empty());
        assert!(genres_for_label("").is_empty());
    }
}
