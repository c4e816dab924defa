use crate::audio::{AudioSink, SampleBuffer};
use crate::config::EncodeParameters;
use crate::error::Result;
use crate::grammar::{format_bits, serialize};
use crate::waveform::WaveformRenderer;
use log::{debug, info};

/// Text to keyed-carrier encoder
pub struct Encoder {
    params: EncodeParameters,
    renderer: WaveformRenderer,
}

impl Encoder {
    pub fn new(params: EncodeParameters) -> Result<Self> {
        let renderer = WaveformRenderer::from_params(&params)?;
        Ok(Self { params, renderer })
    }

    pub fn params(&self) -> &EncodeParameters {
        &self.params
    }

    /// Serialize the message and render it into audio samples
    pub fn render(&self) -> Result<SampleBuffer> {
        let bits = serialize(&self.params.message)?;
        debug!("Slot sequence: {}", format_bits(&bits));

        let buffer = self.renderer.render(&bits);
        info!(
            "Message '{}' spans {} slots, {:.2} s of audio",
            self.params.message,
            bits.len(),
            buffer.duration_secs()
        );

        Ok(buffer)
    }

    /// Encode the message and hand the samples to `sink`.
    /// Nothing reaches the sink when encoding fails.
    pub fn encode<S: AudioSink>(&self, sink: &mut S) -> Result<()> {
        let buffer = self.render()?;
        sink.write(&buffer)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncodeParameters::default()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MemoryAudio;
    use crate::error::CricomError;
    use crate::grammar::serialize;

    #[test]
    fn test_encoder_basic() {
        let encoder = Encoder::default();
        let buffer = encoder.render().unwrap();

        let slots = serialize("sos").unwrap().len();
        assert_eq!(buffer.sample_rate, 7119);
        assert_eq!(buffer.len(), slots * 711);
    }

    #[test]
    fn test_encoder_writes_to_sink() {
        let params = EncodeParameters::new("Hi", 800, 8000, 50).unwrap();
        let encoder = Encoder::new(params).unwrap();

        let mut sink = MemoryAudio::new();
        encoder.encode(&mut sink).unwrap();

        let buffer = sink.buffer().unwrap();
        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.len(), serialize("hi").unwrap().len() * 400);
    }

    #[test]
    fn test_encoder_unknown_symbol_writes_nothing() {
        let params = EncodeParameters::new("sos #", 600, 7119, 100).unwrap();
        let encoder = Encoder::new(params).unwrap();

        let mut sink = MemoryAudio::new();
        let result = encoder.encode(&mut sink);
        assert!(matches!(result, Err(CricomError::UnknownSymbol(_))));
        assert!(sink.buffer().is_none());
    }

    #[test]
    fn test_encoder_empty_message() {
        let params = EncodeParameters::new("", 600, 7119, 100).unwrap();
        let buffer = Encoder::new(params).unwrap().render().unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_encoder_zero_sample_slot() {
        let params = EncodeParameters::new("sos", 600, 9, 100).unwrap();
        assert!(matches!(Encoder::new(params), Err(CricomError::InvalidConfig(_))));
    }
}
