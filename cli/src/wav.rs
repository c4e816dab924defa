use cricom_core::{AudioSink, AudioSource, CricomError, Result, SampleBuffer};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::path::{Path, PathBuf};

/// Mono WAV file on disk
pub struct WavFile {
    path: PathBuf,
}

impl WavFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn wav_error(err: hound::Error) -> CricomError {
    CricomError::AudioIo(err.to_string())
}

impl AudioSink for WavFile {
    /// Write 16-bit PCM, full scale at unit amplitude
    fn write(&mut self, buffer: &SampleBuffer) -> Result<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(&self.path, spec).map_err(wav_error)?;

        // Clamp to [-1.0, 1.0] range to avoid overflow, then scale to i16
        for &sample in &buffer.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer
                .write_sample((clamped * i16::MAX as f32) as i16)
                .map_err(wav_error)?;
        }
        writer.finalize().map_err(wav_error)?;

        debug!(
            "Wrote {} samples at {} Hz to {}",
            buffer.len(),
            buffer.sample_rate,
            self.path.display()
        );
        Ok(())
    }
}

impl AudioSource for WavFile {
    fn read(&mut self) -> Result<SampleBuffer> {
        let mut reader = WavReader::open(&self.path).map_err(wav_error)?;
        let spec = reader.spec();
        debug!(
            "Read WAV: {} Hz, {} channels, {} bits",
            spec.sample_rate, spec.channels, spec.bits_per_sample
        );

        if spec.channels != 1 {
            return Err(CricomError::AudioIo(format!(
                "expected mono audio, found {} channels",
                spec.channels
            )));
        }

        let samples = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, bits @ 8..=32) => {
                let scale = (1i64 << (bits - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(wav_error)?
            }
            (SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(wav_error)?,
            (format, bits) => {
                return Err(CricomError::AudioIo(format!(
                    "unsupported sample format: {:?} with {} bits",
                    format, bits
                )));
            }
        };

        Ok(SampleBuffer::new(spec.sample_rate, samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cricom_wav_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_read_round_trip() {
        let path = temp_path("round_trip.wav");
        let buffer = SampleBuffer::new(7119, vec![0.0, 0.5, -0.5, 1.0, -1.0, 2.0]);

        let mut wav = WavFile::new(&path);
        wav.write(&buffer).unwrap();
        let read = wav.read().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(read.sample_rate, 7119);
        assert_eq!(read.len(), buffer.len());
        for (got, expected) in read.samples.iter().zip([0.0, 0.5, -0.5, 1.0, -1.0, 1.0]) {
            assert!((got - expected).abs() < 1e-3, "got {}, expected {}", got, expected);
        }
    }

    #[test]
    fn test_read_float_wav() {
        let path = temp_path("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for sample in [0.25f32, -0.75] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let read = WavFile::new(&path).read().unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(read, SampleBuffer::new(8000, vec![0.25, -0.75]));
    }

    #[test]
    fn test_read_rejects_stereo() {
        let path = temp_path("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let result = WavFile::new(&path).read();
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(CricomError::AudioIo(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let result = WavFile::new(temp_path("missing.wav")).read();
        assert!(matches!(result, Err(CricomError::AudioIo(_))));
    }
}
