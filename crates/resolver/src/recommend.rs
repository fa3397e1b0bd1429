//! The mood-to-recommendation resolution pipeline.
//!
//! This module coordinates the core flow:
//! 1. Normalize the mood label and expand it to genres
//! 2. Expand genres to a deduplicated, order-preserving title list
//! 3. Enrich each title via the metadata client, sequentially
//! 4. Return the presentation-ready result set
//!
//! Fetches are sequential in catalog order; there is no fan-out. A title
//! the service can't match is omitted (and logged), a title the service
//! can't be reached for is recorded so the caller can warn the user, and
//! neither stops the pipeline.

use catalog::{genres_for_mood, titles_for_genre, Mood};
use omdb_client::{MetadataClient, MetadataError, MovieRecord};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Final, ordered set of enriched recommendations for one mood resolution.
///
/// Invariant: no two records share a source title. Order follows the
/// catalog's declared genre and title order, first-genre-wins.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSet {
    /// The resolved mood; `None` when the input label was not a known mood.
    pub mood: Option<Mood>,
    /// Enriched records, in catalog order.
    pub records: Vec<MovieRecord>,
    /// Titles skipped because the metadata service was unreachable.
    /// Surfaced to the user as warnings; the rest of the set is still valid.
    pub unavailable: Vec<String>,
}

impl RecommendationSet {
    /// An empty set, returned for unknown moods.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is nothing to show (caller prompts for a valid mood).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.unavailable.is_empty()
    }
}

/// Resolves a mood into an enriched recommendation set.
pub struct RecommendationResolver<C: MetadataClient> {
    client: C,
}

impl<C: MetadataClient> RecommendationResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Resolve a mood label into recommendations.
    ///
    /// An unknown mood yields an empty set, never an error: the caller
    /// treats it as "please pick a valid mood". Per-title failures degrade
    /// the set instead of failing it.
    pub async fn resolve(&self, mood: &str) -> RecommendationSet {
        let Ok(mood) = mood.parse::<Mood>() else {
            debug!(label = %mood, "Unknown mood label, returning empty set");
            return RecommendationSet::empty();
        };

        let genres = genres_for_mood(mood);
        let titles = unique_titles(genres.iter().map(|&g| titles_for_genre(g)));
        info!(
            %mood,
            genres = genres.len(),
            candidates = titles.len(),
            "Resolving mood to candidate titles"
        );

        let mut set = RecommendationSet {
            mood: Some(mood),
            ..RecommendationSet::default()
        };

        // Sequential, one fetch per candidate, in catalog order.
        for title in titles {
            match self.client.fetch(title).await {
                Ok(record) if record.found => set.records.push(record),
                Ok(_) => {
                    // A static-catalog title the service can't match should
                    // not break the page, but it is a signal worth logging.
                    warn!(title, "Catalog title not found by metadata service, omitting");
                }
                Err(e) => {
                    warn!(title, error = %e, "Metadata fetch failed, continuing");
                    set.unavailable.push(title.to_string());
                }
            }
        }

        info!(
            %mood,
            records = set.records.len(),
            unavailable = set.unavailable.len(),
            "Mood resolution complete"
        );
        set
    }

    /// Direct title search, independent of the mood pipeline.
    ///
    /// A thin pass-through to the metadata client: "not found" comes back
    /// as a record with `found = false`, not as an error.
    pub async fn search_title(&self, query: &str) -> Result<MovieRecord, MetadataError> {
        self.client.fetch(query).await
    }
}

/// Flatten title lists into one deduplicated sequence, preserving order.
///
/// A title shared between lists is attributed to the first list that
/// carries it (first-genre-wins).
fn unique_titles<'a, I>(title_lists: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a [&'a str]>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for list in title_lists {
        for &title in list {
            if seen.insert(title) {
                out.push(title);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_titles_preserves_order() {
        let lists: [&[&str]; 2] = [&["A", "B"], &["C", "D"]];
        assert_eq!(unique_titles(lists), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_unique_titles_first_list_wins() {
        let lists: [&[&str]; 3] = [&["A", "B"], &["B", "C"], &["A", "D"]];
        assert_eq!(unique_titles(lists), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_unique_titles_empty_lists() {
        let lists: [&[&str]; 2] = [&[], &[]];
        assert!(unique_titles(lists).is_empty());
    }
}
