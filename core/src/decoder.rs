use crate::audio::{AudioSource, SampleBuffer};
use crate::config::DecodeParameters;
use crate::error::{CricomError, Result};
use crate::grammar::{format_bits, parse};
use crate::waveform::WaveformAnalyzer;
use log::{debug, info};

/// Keyed-carrier to text decoder
pub struct Decoder {
    params: DecodeParameters,
    analyzer: WaveformAnalyzer,
    message: Option<String>,
}

impl Decoder {
    pub fn new(params: DecodeParameters) -> Self {
        let analyzer = WaveformAnalyzer::from_params(&params);
        Self {
            params,
            analyzer,
            message: None,
        }
    }

    pub fn params(&self) -> &DecodeParameters {
        &self.params
    }

    /// Read audio from `source` and decode it
    pub fn decode<S: AudioSource>(&mut self, source: &mut S) -> Result<&str> {
        self.message = None;
        let buffer = source.read()?;
        self.decode_buffer(&buffer)
    }

    /// Decode samples already in memory.
    ///
    /// The silence closing a transmission reads as a word gap, so trailing
    /// spaces are dropped. An empty result is an error.
    pub fn decode_buffer(&mut self, buffer: &SampleBuffer) -> Result<&str> {
        self.message = None;
        info!(
            "Decoding {} samples at {} Hz ({:.2} s)",
            buffer.len(),
            buffer.sample_rate,
            buffer.duration_secs()
        );

        let bits = self.analyzer.analyze(buffer)?;
        debug!("Slot sequence: {}", format_bits(&bits));

        let text = parse(&bits)?;
        let text = text.trim_end_matches(' ');
        if text.is_empty() {
            return Err(CricomError::EmptyResult);
        }

        let message = self.message.insert(text.to_string());
        Ok(message.as_str())
    }

    /// Message of the last successful decode
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecodeParameters::default())
    }
}
