//! Integration tests for the mood resolution pipeline.
//!
//! These run the resolver against a scripted metadata client, so the
//! catalog expansion, deduplication, ordering and degradation behavior are
//! all exercised without touching the network.

use async_trait::async_trait;
use catalog::Mood;
use omdb_client::{MetadataClient, MetadataError, MovieRecord};
use resolver::RecommendationResolver;
use std::collections::HashSet;

/// Metadata client double with per-title scripted behavior.
///
/// Titles default to "found"; specific titles can be scripted as not found
/// or as unreachable.
#[derive(Default)]
struct ScriptedClient {
    not_found: HashSet<&'static str>,
    unavailable: HashSet<&'static str>,
}

impl ScriptedClient {
    fn with_not_found(mut self, title: &'static str) -> Self {
        self.not_found.insert(title);
        self
    }

    fn with_unavailable(mut self, title: &'static str) -> Self {
        self.unavailable.insert(title);
        self
    }

    fn found_record(title: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: "2010".to_string(),
            poster: format!("https://posters.example/{title}.jpg"),
            rating: Some(7.5),
            genre: "Drama".to_string(),
            plot: format!("The plot of {title}."),
            imdb_id: "tt0000001".to_string(),
            found: true,
        }
    }
}

#[async_trait]
impl MetadataClient for ScriptedClient {
    async fn fetch(&self, title: &str) -> Result<MovieRecord, MetadataError> {
        if self.unavailable.contains(title) {
            return Err(MetadataError::ServiceUnavailable(
                "connection refused".to_string(),
            ));
        }
        if self.not_found.contains(title) {
            return Ok(MovieRecord::not_found());
        }
        Ok(Self::found_record(title))
    }
}

fn titles(set: &resolver::RecommendationSet) -> Vec<&str> {
    set.records.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn happy_mood_preserves_catalog_order() {
    let resolver = RecommendationResolver::new(ScriptedClient::default());
    let set = resolver.resolve("happy").await;

    assert_eq!(set.mood, Some(Mood::Happy));
    assert_eq!(
        titles(&set),
        vec![
            "The Hangover",
            "Superbad",
            "La La Land",
            "The Greatest Showman"
        ]
    );
    assert!(set.unavailable.is_empty());
}

#[tokio::test]
async fn mood_label_is_normalized_before_lookup() {
    let resolver = RecommendationResolver::new(ScriptedClient::default());
    let set = resolver.resolve("  HaPPy  ").await;
    assert_eq!(set.mood, Some(Mood::Happy));
    assert_eq!(set.records.len(), 4);
}

#[tokio::test]
async fn unknown_mood_yields_empty_set() {
    let resolver = RecommendationResolver::new(ScriptedClient::default());
    let set = resolver.resolve("unknown-mood-xyz").await;

    assert!(set.mood.is_none());
    assert!(set.is_empty());
}

#[tokio::test]
async fn no_title_appears_twice_for_any_mood() {
    let resolver = RecommendationResolver::new(ScriptedClient::default());
    for mood in Mood::ALL {
        let set = resolver.resolve(mood.label()).await;
        let mut seen = HashSet::new();
        for record in &set.records {
            assert!(
                seen.insert(record.title.clone()),
                "duplicate title {} for mood {mood}",
                record.title
            );
        }
        assert!(!set.records.is_empty(), "mood {mood} produced nothing");
    }
}

#[tokio::test]
async fn unavailable_title_degrades_but_keeps_the_rest_in_order() {
    let client = ScriptedClient::default().with_unavailable("Superbad");
    let resolver = RecommendationResolver::new(client);
    let set = resolver.resolve("happy").await;

    assert_eq!(
        titles(&set),
        vec!["The Hangover", "La La Land", "The Greatest Showman"]
    );
    assert_eq!(set.unavailable, vec!["Superbad".to_string()]);
}

#[tokio::test]
async fn not_found_title_is_silently_omitted() {
    let client = ScriptedClient::default().with_not_found("La La Land");
    let resolver = RecommendationResolver::new(client);
    let set = resolver.resolve("happy").await;

    assert_eq!(
        titles(&set),
        vec!["The Hangover", "Superbad", "The Greatest Showman"]
    );
    // Not-found is not a service failure, nothing to warn about.
    assert!(set.unavailable.is_empty());
}

#[tokio::test]
async fn search_title_miss_is_a_record_not_an_error() {
    let client = ScriptedClient::default().with_not_found("Nonexistent Film Title 12345");
    let resolver = RecommendationResolver::new(client);

    let record = resolver
        .search_title("Nonexistent Film Title 12345")
        .await
        .unwrap();
    assert!(!record.found);
}

#[tokio::test]
async fn search_title_passes_through_hits() {
    let resolver = RecommendationResolver::new(ScriptedClient::default());
    let record = resolver.search_title("Inception").await.unwrap();
    assert!(record.found);
    assert_eq!(record.title, "Inception");
}
