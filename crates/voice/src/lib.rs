//! # Voice Crate
//!
//! Voice input for mood selection: capture one spoken utterance, transcribe
//! it via an external speech-to-text service, and match the transcript
//! against the mood catalog.
//!
//! ## Components
//!
//! - **listen**: ambient-noise calibration and utterance recording with a
//!   silence-detection cutoff, over a `SampleSource` trait
//! - **mic**: cpal-backed `SampleSource` for the default input device
//! - **transcribe**: `Transcriber` trait and HTTP implementation
//! - **resolver**: `VoiceMoodResolver` tying the steps together, plus
//!   `match_mood` for catalog lookup
//! - **error**: the `VoiceError` taxonomy
//!
//! ## Example Usage
//!
//! ```ignore
//! use voice::{HttpTranscriber, Listener, ListenConfig, Microphone, VoiceMoodResolver};
//!
//! let resolver = VoiceMoodResolver::new(
//!     Listener::new(ListenConfig::default()),
//!     HttpTranscriber::new("http://localhost:8085/transcribe")?,
//! );
//! let mut mic = Microphone::open()?;
//! let transcript = resolver.capture_mood(&mut mic)?;
//! match voice::match_mood(&transcript) {
//!     voice::MoodMatch::Recognized(mood) => println!("feeling {mood}"),
//!     voice::MoodMatch::Unsupported(heard) => println!("'{heard}' is not a mood we know"),
//! }
//! ```
//!
//! The full capture path is a single synchronous blocking sequence; callers
//! on an async runtime should wrap it in `spawn_blocking`.

// Public modules
pub mod error;
pub mod listen;
pub mod mic;
pub mod resolver;
pub mod transcribe;

// Re-export commonly used types
pub use error::VoiceError;
pub use listen::{ListenConfig, Listener, SampleSource};
pub use mic::Microphone;
pub use resolver::{match_mood, MoodMatch, VoiceMoodResolver};
pub use transcribe::{HttpTranscriber, Transcriber};
