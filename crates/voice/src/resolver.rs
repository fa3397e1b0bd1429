//! Voice mood resolution: record, transcribe, match against the catalog.

use crate::error::Result;
use crate::listen::{Listener, SampleSource};
use crate::transcribe::Transcriber;
use catalog::Mood;
use tracing::info;

/// Outcome of checking a transcript against the mood catalog.
///
/// A transcript that parsed fine but names no supported mood is reported
/// distinctly from transcription failure: the user heard us correctly, we
/// just can't serve that mood, and they may still pick one manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodMatch {
    Recognized(Mood),
    /// Carries what was heard, for the "heard X, but X is not a supported
    /// mood" message.
    Unsupported(String),
}

/// Check a transcript against the catalog's known mood keys.
pub fn match_mood(transcript: &str) -> MoodMatch {
    match transcript.parse::<Mood>() {
        Ok(mood) => MoodMatch::Recognized(mood),
        Err(unknown) => MoodMatch::Unsupported(unknown.0),
    }
}

/// Captures one spoken utterance and turns it into normalized text.
///
/// The whole sequence is blocking: open device, calibrate, record until the
/// silence cutoff, transcribe, normalize. Run it off the async runtime.
pub struct VoiceMoodResolver<T: Transcriber> {
    listener: Listener,
    transcriber: T,
}

impl<T: Transcriber> VoiceMoodResolver<T> {
    pub fn new(listener: Listener, transcriber: T) -> Self {
        Self {
            listener,
            transcriber,
        }
    }

    /// Record one utterance and return its lower-cased, trimmed transcript.
    ///
    /// The transcript is not yet checked against the catalog; callers follow
    /// up with [`match_mood`] so an unsupported mood can be reported
    /// separately from a failed transcription.
    pub fn capture_mood<S: SampleSource>(&self, source: &mut S) -> Result<String> {
        let sample_rate = source.sample_rate();
        let samples = self.listener.record_utterance(source)?;
        let transcript = self.transcriber.transcribe(&samples, sample_rate)?;
        let normalized = transcript.trim().to_lowercase();
        info!(transcript = %normalized, "Transcribed spoken mood");
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoiceError;
    use crate::listen::ListenConfig;

    struct FixedTranscriber(&'static str);

    impl Transcriber for FixedTranscriber {
        fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranscriber;

    impl Transcriber for FailingTranscriber {
        fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<String> {
            Err(VoiceError::ServiceUnavailable("connection refused".into()))
        }
    }

    /// Quiet lead-in (so calibration sees real ambience) followed by an
    /// endless loud signal; the utterance cap ends the recording.
    struct SpeechSource {
        pos: usize,
    }

    impl SpeechSource {
        fn new() -> Self {
            Self { pos: 0 }
        }
    }

    impl SampleSource for SpeechSource {
        fn sample_rate(&self) -> u32 {
            16_000
        }

        fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize> {
            let quiet_until = (self.sample_rate() as usize * 6) / 10; // 600ms
            for slot in buf.iter_mut() {
                *slot = if self.pos < quiet_until {
                    0.0
                } else if self.pos % 2 == 0 {
                    0.5
                } else {
                    -0.5
                };
                self.pos += 1;
            }
            Ok(buf.len())
        }
    }

    #[test]
    fn test_match_mood_recognized() {
        assert_eq!(match_mood("happy"), MoodMatch::Recognized(Mood::Happy));
        assert_eq!(match_mood(" SCARED "), MoodMatch::Recognized(Mood::Scared));
    }

    #[test]
    fn test_misheard_mood_is_unsupported() {
        // "happpy" transcribed fine but is not a catalog key.
        assert_eq!(
            match_mood("happpy"),
            MoodMatch::Unsupported("happpy".to_string())
        );
    }

    #[test]
    fn test_capture_mood_normalizes_transcript() {
        let resolver = VoiceMoodResolver::new(
            Listener::new(ListenConfig::default()),
            FixedTranscriber("  Happy "),
        );
        let transcript = resolver.capture_mood(&mut SpeechSource::new()).unwrap();
        assert_eq!(transcript, "happy");
    }

    #[test]
    fn test_capture_mood_propagates_service_failure() {
        let resolver = VoiceMoodResolver::new(
            Listener::new(ListenConfig::default()),
            FailingTranscriber,
        );
        match resolver.capture_mood(&mut SpeechSource::new()) {
            Err(VoiceError::ServiceUnavailable(_)) => {}
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }
}
