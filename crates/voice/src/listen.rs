//! Utterance recording with ambient-noise calibration and silence cutoff.
//!
//! The listener reads mono f32 samples from a [`SampleSource`], measures the
//! ambient noise floor for a short calibration window, then records one
//! utterance: it waits (bounded) for the signal to rise above the noise
//! floor and keeps recording until enough consecutive quiet frames arrive.
//! Every wait here is bounded, so a dead microphone cannot hang the
//! interaction forever.

use crate::error::{Result, VoiceError};
use tracing::{debug, trace};

/// Source of mono f32 audio samples.
///
/// `read_chunk` blocks until samples are available and returns the number of
/// samples written into `buf`; returning 0 signals end of stream. The
/// microphone implements this over cpal; tests use vector-backed sources.
pub trait SampleSource {
    /// Samples per second of the delivered audio.
    fn sample_rate(&self) -> u32;

    /// Fill `buf` with up to `buf.len()` samples. 0 means end of stream.
    fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize>;
}

/// Tuning for calibration and the voice-activity cutoff.
#[derive(Debug, Clone)]
pub struct ListenConfig {
    /// How long to sample ambient noise before listening for speech.
    pub calibration_ms: u32,
    /// Analysis frame length.
    pub frame_ms: u32,
    /// Consecutive quiet frames that end the utterance.
    pub silence_frames: u32,
    /// How long to wait for speech to start before giving up.
    pub max_lead_ms: u32,
    /// Hard cap on utterance length.
    pub max_utterance_ms: u32,
    /// Speech threshold = ambient RMS * margin + floor.
    pub energy_margin: f32,
    /// Absolute minimum threshold, so a silent room still needs real signal.
    pub energy_floor: f32,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            calibration_ms: 500,
            frame_ms: 30,
            silence_frames: 25, // ~750ms of quiet ends the utterance
            max_lead_ms: 5_000,
            max_utterance_ms: 8_000,
            energy_margin: 2.0,
            energy_floor: 0.005,
        }
    }
}

/// Records a single utterance from a sample source.
pub struct Listener {
    config: ListenConfig,
}

impl Listener {
    pub fn new(config: ListenConfig) -> Self {
        Self { config }
    }

    /// Record one utterance.
    ///
    /// ## Algorithm
    /// 1. Average frame RMS over the calibration window to get the ambient
    ///    noise floor, and derive the speech threshold from it.
    /// 2. Read frames until one crosses the threshold (speech onset). Give
    ///    up with `Unintelligible` if the lead window elapses or the stream
    ///    ends first.
    /// 3. Accumulate frames until `silence_frames` consecutive frames fall
    ///    below the threshold, the stream ends, or the utterance cap hits.
    ///
    /// # Returns
    /// The recorded mono samples, including the trailing quiet tail.
    pub fn record_utterance<S: SampleSource>(&self, source: &mut S) -> Result<Vec<f32>> {
        let frame_len = self.samples_per_frame(source.sample_rate());
        let mut frame = vec![0.0f32; frame_len];

        let threshold = self.calibrate(source, &mut frame)?;
        debug!(threshold, "Calibrated ambient noise, listening for speech");

        // Wait for speech onset, bounded by max_lead_ms.
        let max_lead_frames = self.config.max_lead_ms / self.config.frame_ms;
        let mut onset = None;
        for _ in 0..max_lead_frames {
            let n = fill_frame(source, &mut frame)?;
            if n == 0 {
                return Err(VoiceError::Unintelligible);
            }
            let energy = rms(&frame[..n]);
            trace!(energy, "lead frame");
            if energy >= threshold {
                onset = Some(frame[..n].to_vec());
                break;
            }
        }
        let Some(first) = onset else {
            debug!("No speech detected within lead window");
            return Err(VoiceError::Unintelligible);
        };

        // Record until the silence cutoff fires.
        let max_frames = self.config.max_utterance_ms / self.config.frame_ms;
        let mut samples = first;
        let mut quiet_run = 0u32;
        for _ in 1..max_frames {
            let n = fill_frame(source, &mut frame)?;
            if n == 0 {
                break;
            }
            if rms(&frame[..n]) < threshold {
                quiet_run += 1;
            } else {
                quiet_run = 0;
            }
            samples.extend_from_slice(&frame[..n]);
            if quiet_run >= self.config.silence_frames {
                break;
            }
        }

        debug!(
            samples = samples.len(),
            seconds = samples.len() as f32 / source.sample_rate() as f32,
            "Recorded utterance"
        );
        Ok(samples)
    }

    fn samples_per_frame(&self, sample_rate: u32) -> usize {
        ((sample_rate * self.config.frame_ms) / 1000).max(1) as usize
    }

    /// Measure ambient RMS over the calibration window.
    fn calibrate<S: SampleSource>(&self, source: &mut S, frame: &mut [f32]) -> Result<f32> {
        let frames = (self.config.calibration_ms / self.config.frame_ms).max(1);
        let mut total = 0.0f32;
        let mut measured = 0u32;
        for _ in 0..frames {
            let n = fill_frame(source, frame)?;
            if n == 0 {
                break;
            }
            total += rms(&frame[..n]);
            measured += 1;
        }
        if measured == 0 {
            // Stream ended before we heard anything at all.
            return Err(VoiceError::Unintelligible);
        }
        let ambient = total / measured as f32;
        Ok((ambient * self.config.energy_margin).max(self.config.energy_floor))
    }
}

/// Read from the source until `frame` is full or the stream ends.
fn fill_frame<S: SampleSource>(source: &mut S, frame: &mut [f32]) -> Result<usize> {
    let mut filled = 0;
    while filled < frame.len() {
        let n = source.read_chunk(&mut frame[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Root-mean-square energy of a sample window.
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}
