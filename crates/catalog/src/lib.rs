//! # Catalog Crate
//!
//! Static mood and genre tables for the mood-based recommender.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Mood, Genre)
//! - **tables**: The mood→genre and genre→title lookup tables
//!
//! ## Example Usage
//!
//! ```
//! use catalog::{genres_for_label, titles_for_genre};
//!
//! let genres = genres_for_label("Happy");
//! assert!(!genres.is_empty());
//!
//! for &genre in genres {
//!     for title in titles_for_genre(genre) {
//!         println!("{genre}: {title}");
//!     }
//! }
//! ```

// Public modules
pub mod tables;
pub mod types;

// Re-export commonly used items for convenience
pub use tables::{genres_for_label, genres_for_mood, titles_for_genre};
pub use types::{Genre, Mood, UnknownMood};
