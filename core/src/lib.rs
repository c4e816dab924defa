//! Morse code audio codec
//!
//! Encodes text into tone bursts at a carrier frequency and decodes recorded
//! tone bursts back into text. One slot is the atomic time unit: a dit is one
//! keyed slot, a dah three, followed by one silent slot each.

pub mod error;
pub mod symbols;
pub mod grammar;
pub mod waveform;
pub mod config;
pub mod audio;
pub mod encoder;
pub mod decoder;

pub use audio::{AudioSink, AudioSource, MemoryAudio, SampleBuffer};
pub use config::{AnalyzerThresholds, DecodeParameters, EncodeParameters};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{CricomError, Result};
pub use grammar::{parse, serialize, BitSequence};
pub use symbols::{Mark, SymbolTable};
pub use waveform::{WaveformAnalyzer, WaveformRenderer};

// Transmission defaults
pub const DEFAULT_MESSAGE: &str = "sos";
pub const DEFAULT_CARRIER_HZ: u32 = 600;
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 7119;
pub const DEFAULT_SLOT_MS: u32 = 100;

// Analyzer thresholds (empirical, applied to the peak-normalized signal)
pub const EDGE_THRESHOLD: f32 = 0.48;
pub const CORRELATION_THRESHOLD: f32 = 0.6;
pub const MIN_SLOT_SAMPLES: usize = 20;

/// Number of samples covered by one slot: `floor(sample_rate * slot_ms / 1000)`
pub fn slot_samples(sample_rate_hz: u32, slot_ms: u32) -> usize {
    (u64::from(sample_rate_hz) * u64::from(slot_ms) / 1000) as usize
}
