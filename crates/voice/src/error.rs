//! Error types for the voice capture path.

use thiserror::Error;

/// Everything that can go wrong between "user speaks" and "we have text".
///
/// One tagged enum rather than separate exception-like types keeps the
/// caller's control flow explicit: each variant maps to a distinct
/// user-visible message, and none of them terminates the interaction.
#[derive(Error, Debug)]
pub enum VoiceError {
    /// Transcription succeeded technically but produced no confident result.
    /// The user may retry or fall back to picking a mood manually.
    #[error("could not understand the utterance")]
    Unintelligible,

    /// The speech-to-text service could not be reached.
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The audio input device failed or is missing.
    #[error("audio input device unavailable: {0}")]
    Device(String),
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, VoiceError>;
