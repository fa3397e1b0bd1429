//! Speech-to-text over HTTP.
//!
//! The transcriber posts raw 16-bit PCM to an external speech-to-text
//! endpoint and expects a small JSON body back. The seam is a trait so the
//! resolver can be tested with scripted transcripts instead of a live
//! service.

use crate::error::{Result, VoiceError};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Transcription requests block the capture flow; bound them.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transcripts below this confidence are treated as not understood.
const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Seam for turning recorded audio into text.
pub trait Transcriber {
    /// Transcribe one utterance of mono f32 samples.
    ///
    /// # Returns
    /// * `Ok(text)` - best-effort transcript, non-empty
    /// * `Err(Unintelligible)` - the service produced no confident result
    /// * `Err(ServiceUnavailable)` - the service could not be reached
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String>;
}

/// Wire format of the speech-to-text response.
#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptResponse {
    #[serde(default)]
    pub transcript: String,
    /// Recognizer confidence in [0, 1]; absent means "trust the transcript".
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// HTTP-backed transcriber.
///
/// Uses a blocking client deliberately: capture, transcription and mood
/// matching form one synchronous sequence, executed off the async runtime.
pub struct HttpTranscriber {
    http: reqwest::blocking::Client,
    endpoint: String,
    min_confidence: f32,
}

impl HttpTranscriber {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VoiceError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        })
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String> {
        debug!(
            samples = samples.len(),
            sample_rate, "Sending utterance for transcription"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("rate", sample_rate.to_string())])
            .header(reqwest::header::CONTENT_TYPE, "audio/l16")
            .body(encode_pcm16(samples))
            .send()
            .map_err(|e| VoiceError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Speech-to-text service returned error status");
            return Err(VoiceError::ServiceUnavailable(format!(
                "speech service returned status {status}"
            )));
        }

        let parsed: TranscriptResponse = response
            .json()
            .map_err(|e| VoiceError::ServiceUnavailable(e.to_string()))?;

        interpret(parsed, self.min_confidence)
    }
}

/// Map a service response to a transcript or `Unintelligible`.
pub(crate) fn interpret(response: TranscriptResponse, min_confidence: f32) -> Result<String> {
    let text = response.transcript.trim().to_string();
    if text.is_empty() {
        return Err(VoiceError::Unintelligible);
    }
    if let Some(confidence) = response.confidence {
        if confidence < min_confidence {
            debug!(confidence, transcript = %text, "Transcript below confidence threshold");
            return Err(VoiceError::Unintelligible);
        }
    }
    Ok(text)
}

/// Convert f32 samples in [-1, 1] to little-endian 16-bit PCM.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let value = (clamped * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
