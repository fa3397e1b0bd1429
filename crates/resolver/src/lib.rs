//! Recommendation resolver for the mood-based movie recommender.
//!
//! Expands a mood into genres, genres into a deduplicated title list, and
//! enriches each title with metadata. Also exposes the direct title search
//! as a separate operation, so a user can look up an arbitrary movie
//! regardless of mood.

pub mod recommend;

pub use recommend::{RecommendationResolver, RecommendationSet};
