use crate::error::{CricomError, Result};
use crate::{
    CORRELATION_THRESHOLD, DEFAULT_CARRIER_HZ, DEFAULT_MESSAGE, DEFAULT_SAMPLE_RATE_HZ,
    DEFAULT_SLOT_MS, EDGE_THRESHOLD, MIN_SLOT_SAMPLES,
};

/// Parameters of one encode operation
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParameters {
    pub carrier_hz: u32,
    pub sample_rate_hz: u32,
    pub slot_ms: u32,
    /// Lowercase message text
    pub message: String,
}

impl EncodeParameters {
    /// Build validated parameters. The message is lowercased.
    pub fn new(message: &str, carrier_hz: u32, sample_rate_hz: u32, slot_ms: u32) -> Result<Self> {
        ensure_positive("carrier frequency", carrier_hz)?;
        ensure_positive("sample rate", sample_rate_hz)?;
        ensure_positive("slot length", slot_ms)?;

        Ok(Self {
            carrier_hz,
            sample_rate_hz,
            slot_ms,
            message: message.to_lowercase(),
        })
    }

    /// Slot length in samples
    pub fn slot_samples(&self) -> usize {
        crate::slot_samples(self.sample_rate_hz, self.slot_ms)
    }
}

impl Default for EncodeParameters {
    fn default() -> Self {
        Self {
            carrier_hz: DEFAULT_CARRIER_HZ,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            slot_ms: DEFAULT_SLOT_MS,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Parameters of one decode operation; the sample rate comes from the audio
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeParameters {
    pub carrier_hz: u32,
    pub slot_ms: u32,
    pub thresholds: AnalyzerThresholds,
}

impl DecodeParameters {
    pub fn new(carrier_hz: u32, slot_ms: u32) -> Result<Self> {
        ensure_positive("carrier frequency", carrier_hz)?;
        ensure_positive("slot length", slot_ms)?;

        Ok(Self {
            carrier_hz,
            slot_ms,
            thresholds: AnalyzerThresholds::default(),
        })
    }

    pub fn with_thresholds(mut self, thresholds: AnalyzerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Default for DecodeParameters {
    fn default() -> Self {
        Self {
            carrier_hz: DEFAULT_CARRIER_HZ,
            slot_ms: DEFAULT_SLOT_MS,
            thresholds: AnalyzerThresholds::default(),
        }
    }
}

/// Decision thresholds of the waveform analyzer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerThresholds {
    /// Normalized amplitude a rising edge must exceed
    pub edge: f32,
    /// Mean absolute difference to the reference below which a slot is keyed
    pub correlation: f32,
    /// Shortest slot, in samples, the analyzer accepts
    pub min_slot_samples: usize,
}

impl Default for AnalyzerThresholds {
    fn default() -> Self {
        Self {
            edge: EDGE_THRESHOLD,
            correlation: CORRELATION_THRESHOLD,
            min_slot_samples: MIN_SLOT_SAMPLES,
        }
    }
}

fn ensure_positive(name: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(CricomError::InvalidConfig(format!("{} must be positive", name)));
    }
    Ok(())
}
