//! Audio collaborator seam.
//!
//! The codec never touches files: encoders hand a finished buffer to an
//! [`AudioSink`] and decoders pull one from an [`AudioSource`].

use crate::error::{CricomError, Result};

/// Mono unit-scale samples paired with their sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl SampleBuffer {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Persists a finished buffer
pub trait AudioSink {
    fn write(&mut self, buffer: &SampleBuffer) -> Result<()>;
}

/// Loads a buffer at its native sample rate
pub trait AudioSource {
    fn read(&mut self) -> Result<SampleBuffer>;
}

/// In-memory sink and source
#[derive(Debug, Clone, Default)]
pub struct MemoryAudio {
    buffer: Option<SampleBuffer>,
}

impl MemoryAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_buffer(buffer: SampleBuffer) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    pub fn buffer(&self) -> Option<&SampleBuffer> {
        self.buffer.as_ref()
    }

    pub fn into_buffer(self) -> Option<SampleBuffer> {
        self.buffer
    }
}

impl AudioSink for MemoryAudio {
    fn write(&mut self, buffer: &SampleBuffer) -> Result<()> {
        self.buffer = Some(buffer.clone());
        Ok(())
    }
}

impl AudioSource for MemoryAudio {
    fn read(&mut self) -> Result<SampleBuffer> {
        self.buffer
            .clone()
            .ok_or_else(|| CricomError::AudioIo("no audio has been written".to_string()))
    }
}
