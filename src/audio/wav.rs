//! WAV segment concatenation.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while combining WAV segments.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Invalid WAV data: {0}")]
    InvalidWav(#[from] hound::Error),

    #[error("Segment format mismatch: expected {expected_channels}ch @ {expected_rate}Hz, got {got_channels}ch @ {got_rate}Hz")]
    FormatMismatch {
        expected_channels: u16,
        expected_rate: u32,
        got_channels: u16,
        got_rate: u32,
    },

    #[error("Unsupported sample format: {0} bits")]
    UnsupportedFormat(u16),

    #[error("No segments to write")]
    Empty,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read the spec of an in-memory WAV without decoding samples.
pub fn read_spec(bytes: &[u8]) -> Result<hound::WavSpec, AudioError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    Ok(reader.spec())
}

/// Accumulates WAV segments and writes one combined 16-bit PCM file.
///
/// All segments must share the channel count and sample rate of the first
/// one; a mismatch aborts rather than producing a pitch-shifted result.
pub struct WavAppender {
    spec: Option<hound::WavSpec>,
    samples: Vec<i16>,
}

impl WavAppender {
    pub fn new() -> Self {
        Self {
            spec: None,
            samples: Vec::new(),
        }
    }

    /// Decode an in-memory WAV segment and append its samples.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), AudioError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        if let Some(expected) = self.spec {
            if expected.channels != spec.channels || expected.sample_rate != spec.sample_rate {
                return Err(AudioError::FormatMismatch {
                    expected_channels: expected.channels,
                    expected_rate: expected.sample_rate,
                    got_channels: spec.channels,
                    got_rate: spec.sample_rate,
                });
            }
        } else {
            self.spec = Some(spec);
        }

        match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => {
                for sample in reader.samples::<i16>() {
                    self.samples.push(sample?);
                }
            }
            (hound::SampleFormat::Float, 32) => {
                for sample in reader.samples::<f32>() {
                    let scaled = (sample? * 32767.0).clamp(-32768.0, 32767.0) as i16;
                    self.samples.push(scaled);
                }
            }
            (_, bits) => return Err(AudioError::UnsupportedFormat(bits)),
        }

        Ok(())
    }

    /// Number of samples accumulated so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write the combined audio as a 16-bit PCM WAV file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioError> {
        let spec = self.spec.ok_or(AudioError::Empty)?;

        let out_spec = hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path.as_ref(), out_spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        Ok(())
    }
}

impl Default for WavAppender {
    fn default() -> Self {
        Self::new()
    }
}
