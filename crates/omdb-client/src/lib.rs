//! Metadata client for the OMDb title-search API.
//!
//! This crate provides a client for enriching movie titles with metadata
//! from the external OMDb service. It handles:
//! - One HTTP GET per title against the title-search endpoint
//! - Parsing the JSON response into a `MovieRecord`
//! - Distinguishing "no match" (a normal outcome) from service failure
//!
//! OMDb reports "no match" in-band via `"Response": "False"`, so a miss is
//! returned as an `Ok` record with `found = false`, never as an error.
//! Network failures and unparseable bodies are real errors the caller
//! surfaces to the user as warnings.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default OMDb endpoint. The `t` query parameter carries the title.
pub const DEFAULT_API_URL: &str = "http://www.omdbapi.com/";

/// Per-request timeout. Fetches block the interaction, so this is the only
/// safeguard against a hung service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the metadata service.
///
/// Note that "title not found" is deliberately absent: the service reports
/// it as a successful response, and we model it as `MovieRecord::found`.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("malformed response from metadata service: {0}")]
    MalformedResponse(String),
}

/// Enriched metadata for one title, as returned by the lookup service.
///
/// Created per lookup call and discarded after rendering; nothing here is
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    /// Raw year string; OMDb returns ranges like "2010–2012" for series.
    pub year: String,
    /// Poster image URL, empty when the service has none.
    pub poster: String,
    /// IMDb rating; `None` when the service reports "N/A".
    pub rating: Option<f32>,
    pub genre: String,
    pub plot: String,
    pub imdb_id: String,
    /// False when the service found no match for the queried title.
    pub found: bool,
}

impl MovieRecord {
    /// A placeholder record for a title the service could not match.
    pub fn not_found() -> Self {
        Self {
            title: String::new(),
            year: String::new(),
            poster: String::new(),
            rating: None,
            genre: String::new(),
            plot: String::new(),
            imdb_id: String::new(),
            found: false,
        }
    }

    /// Link to the IMDb page, when the record carries an IMDb ID.
    pub fn imdb_url(&self) -> Option<String> {
        if self.imdb_id.is_empty() {
            None
        } else {
            Some(format!("https://www.imdb.com/title/{}/", self.imdb_id))
        }
    }
}

/// Seam for metadata lookups.
///
/// The resolver is generic over this trait so tests can substitute a
/// scripted client instead of hitting the network.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Look up one title. A miss is `Ok` with `found = false`.
    async fn fetch(&self, title: &str) -> Result<MovieRecord, MetadataError>;
}

/// Wire format of an OMDb title response.
///
/// Every field except `Response` is optional because the not-found payload
/// carries only `Response` and `Error`.
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
}

impl OmdbResponse {
    fn into_record(self) -> MovieRecord {
        if self.response != "True" {
            return MovieRecord::not_found();
        }
        MovieRecord {
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            poster: none_if_na(self.poster),
            rating: self.imdb_rating.as_deref().and_then(parse_rating),
            genre: none_if_na(self.genre),
            plot: none_if_na(self.plot),
            imdb_id: self.imdb_id.unwrap_or_default(),
            found: true,
        }
    }
}

/// OMDb uses the literal string "N/A" for absent fields.
fn none_if_na(value: Option<String>) -> String {
    match value {
        Some(v) if v != "N/A" => v,
        _ => String::new(),
    }
}

fn parse_rating(raw: &str) -> Option<f32> {
    if raw == "N/A" {
        return None;
    }
    raw.parse::<f32>().ok()
}

/// HTTP client for the OMDb title-search endpoint.
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl OmdbClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Arguments
    /// * `api_key` - OMDb API key, sent as the `apikey` query parameter
    /// * `api_url` - Endpoint base URL (see [`DEFAULT_API_URL`])
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, MetadataError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetadataError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl MetadataClient for OmdbClient {
    async fn fetch(&self, title: &str) -> Result<MovieRecord, MetadataError> {
        debug!(title = %title, "Fetching metadata");

        let response = self
            .http
            .get(&self.api_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MetadataError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(title = %title, status = %status, "Metadata service returned error status");
            return Err(MetadataError::ServiceUnavailable(format!(
                "OMDb returned status {status}"
            )));
        }

        let raw: OmdbResponse = response
            .json()
            .await
            .map_err(|e| MetadataError::MalformedResponse(e.to_string()))?;

        let record = raw.into_record();
        if !record.found {
            debug!(title = %title, "Metadata service found no match");
        }
        Ok(record)
    }
}
