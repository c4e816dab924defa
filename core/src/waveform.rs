//! On/off keyed carrier
//!
//! Every slot spans the same number of samples. A keyed slot carries a unit
//! amplitude sine whose phase restarts at zero, so slots are not phase
//! continuous. The analyzer relies on that restart to align each slot
//! against a single reference beep.

use crate::audio::SampleBuffer;
use crate::config::{AnalyzerThresholds, DecodeParameters, EncodeParameters};
use crate::error::{CricomError, Result};
use crate::grammar::BitSequence;
use crate::slot_samples;
use log::{debug, trace};
use std::f32::consts::PI;

/// Carrier tone for one keyed slot, phase starting at zero
pub fn slot_tone(carrier_hz: u32, sample_rate: u32, len: usize) -> Vec<f32> {
    let freq = carrier_hz as f32;
    let sample_rate = sample_rate as f32;
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

/// First index whose sample exceeds `threshold` and is followed by a larger one
pub fn find_rising_edge(samples: &[f32], threshold: f32) -> Option<usize> {
    samples
        .windows(2)
        .position(|pair| pair[0] > threshold && pair[1] > pair[0])
}

/// Waveform renderer - turns slots into tone bursts
pub struct WaveformRenderer {
    carrier_hz: u32,
    sample_rate: u32,
    slot_samples: usize,
}

impl WaveformRenderer {
    pub fn new(carrier_hz: u32, sample_rate: u32, slot_ms: u32) -> Result<Self> {
        let slot_samples = slot_samples(sample_rate, slot_ms);
        if slot_samples == 0 {
            return Err(CricomError::InvalidConfig(format!(
                "a {} ms slot at {} Hz holds no samples",
                slot_ms, sample_rate
            )));
        }

        Ok(Self {
            carrier_hz,
            sample_rate,
            slot_samples,
        })
    }

    pub fn from_params(params: &EncodeParameters) -> Result<Self> {
        Self::new(params.carrier_hz, params.sample_rate_hz, params.slot_ms)
    }

    pub fn slot_samples(&self) -> usize {
        self.slot_samples
    }

    /// Render one slot per bit: carrier when keyed, silence otherwise
    pub fn render(&self, bits: &[bool]) -> SampleBuffer {
        let tone = slot_tone(self.carrier_hz, self.sample_rate, self.slot_samples);
        let silence = vec![0.0f32; self.slot_samples];

        let mut samples = Vec::with_capacity(bits.len() * self.slot_samples);
        for &bit in bits {
            samples.extend_from_slice(if bit { &tone } else { &silence });
        }

        debug!(
            "Rendered {} slots into {} samples ({} per slot)",
            bits.len(),
            samples.len(),
            self.slot_samples
        );

        SampleBuffer::new(self.sample_rate, samples)
    }
}

/// Waveform analyzer - recovers slots from a recorded signal
///
/// The slot grid is anchored on the first beep of the recording. Each slot
/// is then aligned on its own rising edge and compared against the reference
/// beep by mean absolute difference.
pub struct WaveformAnalyzer {
    carrier_hz: u32,
    slot_ms: u32,
    thresholds: AnalyzerThresholds,
}

impl WaveformAnalyzer {
    pub fn new(carrier_hz: u32, slot_ms: u32) -> Self {
        Self {
            carrier_hz,
            slot_ms,
            thresholds: AnalyzerThresholds::default(),
        }
    }

    pub fn from_params(params: &DecodeParameters) -> Self {
        Self {
            carrier_hz: params.carrier_hz,
            slot_ms: params.slot_ms,
            thresholds: params.thresholds,
        }
    }

    pub fn with_thresholds(mut self, thresholds: AnalyzerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> AnalyzerThresholds {
        self.thresholds
    }

    /// Recover one bit per slot, starting at the first beep
    pub fn analyze(&self, buffer: &SampleBuffer) -> Result<BitSequence> {
        let slot_len = slot_samples(buffer.sample_rate, self.slot_ms);
        let min_slot = self.thresholds.min_slot_samples.max(1);
        if slot_len < min_slot {
            return Err(CricomError::SlotTooShort {
                samples: slot_len,
                min: min_slot,
            });
        }

        let normalized = normalize(&buffer.samples)?;

        let beep = find_rising_edge(&normalized, self.thresholds.edge)
            .ok_or(CricomError::NoSignalFound)?;
        debug!(
            "First beep at sample {} ({:.3} s), {} samples per slot",
            beep,
            beep as f32 / buffer.sample_rate as f32,
            slot_len
        );

        let reference = self.reference_slot(buffer.sample_rate, slot_len)?;

        let mut bits = Vec::with_capacity((normalized.len() - beep) / slot_len + 1);
        let mut pos = beep;

        while pos < normalized.len() {
            let remaining = normalized.len() - pos;
            let keyed = if remaining >= slot_len {
                self.classify_slot(&normalized[pos..pos + slot_len], &reference)
            } else if remaining > slot_len / 2 {
                // Grid is anchored a few samples into the first slot, so the
                // last rendered slot ends up truncated.
                let mut window = normalized[pos..].to_vec();
                window.resize(slot_len, 0.0);
                self.classify_slot(&window, &reference)
            } else {
                break;
            };

            bits.push(keyed);
            pos += slot_len;
        }

        debug!("Recovered {} slots", bits.len());
        Ok(bits)
    }

    /// Keyed-slot tone rolled left so that its rising edge sits at index 0
    fn reference_slot(&self, sample_rate: u32, slot_len: usize) -> Result<Vec<f32>> {
        let mut reference = slot_tone(self.carrier_hz, sample_rate, slot_len);
        let phase = find_rising_edge(&reference, self.thresholds.edge).ok_or_else(|| {
            CricomError::InvalidConfig(format!(
                "a {} Hz carrier never rises above {} within one slot",
                self.carrier_hz, self.thresholds.edge
            ))
        })?;
        reference.rotate_left(phase);
        Ok(reference)
    }

    fn classify_slot(&self, window: &[f32], reference: &[f32]) -> bool {
        let slot_len = window.len();

        let beep_phase = match find_rising_edge(window, self.thresholds.edge) {
            Some(phase) if phase <= slot_len / 2 => phase,
            _ => return false,
        };

        let mean_diff = window
            .iter()
            .cycle()
            .skip(beep_phase)
            .zip(reference)
            .map(|(sample, expected)| (sample - expected).abs())
            .sum::<f32>()
            / slot_len as f32;

        trace!("Slot beep phase {}, mean difference {:.3}", beep_phase, mean_diff);
        mean_diff < self.thresholds.correlation
    }
}

/// Scale samples so the peak absolute amplitude is 1
fn normalize(samples: &[f32]) -> Result<Vec<f32>> {
    let peak = samples.iter().fold(0.0f32, |peak, &s| peak.max(s.abs()));
    if peak == 0.0 {
        return Err(CricomError::SilentInput);
    }
    Ok(samples.iter().map(|&s| s / peak).collect())
}
