//! cpal-backed microphone input.
//!
//! Wraps the default input device as a [`SampleSource`]. The cpal callback
//! downmixes to mono and forwards chunks over a channel; `read_chunk` drains
//! that channel with a bounded wait, so a stalled device surfaces as a
//! `Device` error instead of hanging the interaction.

use crate::error::{Result, VoiceError};
use crate::listen::SampleSource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{info, warn};

/// How long a single read may wait for the device to deliver samples.
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// The default input device, streaming mono f32 samples.
///
/// Note: cpal streams are not `Send`, so open and drain the microphone on
/// one thread (the CLI does the whole capture under `spawn_blocking`).
pub struct Microphone {
    // Held to keep the capture stream alive; dropped when the mic is.
    _stream: cpal::Stream,
    rx: Receiver<Vec<f32>>,
    pending: VecDeque<f32>,
    sample_rate: u32,
}

impl Microphone {
    /// Open the default input device and start capturing.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| VoiceError::Device("no default input device".to_string()))?;

        let supported = device
            .default_input_config()
            .map_err(|e| VoiceError::Device(e.to_string()))?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        info!(
            device = device.name().unwrap_or_else(|_| "<unknown>".to_string()),
            sample_rate,
            channels,
            ?sample_format,
            "Opening audio input device"
        );

        let (tx, rx) = mpsc::channel::<Vec<f32>>();

        let stream = match sample_format {
            cpal::SampleFormat::F32 => device
                .build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let _ = tx.send(downmix(data, channels));
                    },
                    |e| warn!(error = %e, "audio input stream error"),
                    None,
                )
                .map_err(|e| VoiceError::Device(e.to_string()))?,
            cpal::SampleFormat::I16 => device
                .build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let as_f32: Vec<f32> =
                            data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                        let _ = tx.send(downmix(&as_f32, channels));
                    },
                    |e| warn!(error = %e, "audio input stream error"),
                    None,
                )
                .map_err(|e| VoiceError::Device(e.to_string()))?,
            other => {
                return Err(VoiceError::Device(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| VoiceError::Device(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            rx,
            pending: VecDeque::new(),
            sample_rate,
        })
    }
}

impl SampleSource for Microphone {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize> {
        if self.pending.is_empty() {
            match self.rx.recv_timeout(READ_TIMEOUT) {
                Ok(chunk) => self.pending.extend(chunk),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(VoiceError::Device(
                        "audio input timed out delivering samples".to_string(),
                    ))
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(0),
            }
        }

        let mut n = 0;
        while n < buf.len() {
            match self.pending.pop_front() {
                Some(sample) => {
                    buf[n] = sample;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

/// Average interleaved channels down to mono.
fn downmix(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_passthrough() {
        let data = [0.1, 0.2, 0.3];
        assert_eq!(downmix(&data, 1), data.to_vec());
    }

    #[test]
    fn test_downmix_stereo_averages() {
        let data = [0.2, 0.4, -1.0, 1.0];
        let mono = downmix(&data, 2);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!(mono[1].abs() < 1e-6);
    }
}
