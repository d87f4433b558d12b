use anyhow::{Context, Result};
use bytes::Bytes;
use hound::{WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use super::backend::AudioFrame;

/// WAV-encoded audio with its playing time
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    pub data: Bytes,
    pub duration_ms: u64,
    pub sample_count: usize,
}

fn spec(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode captured frames as an in-memory 16-bit PCM WAV file.
///
/// An empty frame list still yields a valid (silent, zero-length) WAV.
pub fn encode_frames(frames: &[AudioFrame], sample_rate: u32, channels: u16) -> Result<EncodedAudio> {
    let mut buffer = Cursor::new(Vec::new());
    let mut sample_count = 0;

    {
        let mut writer = WavWriter::new(&mut buffer, spec(sample_rate, channels))
            .context("Failed to create WAV writer")?;

        for frame in frames {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
            }
            sample_count += frame.samples.len();
        }

        writer.finalize().context("Failed to finalize WAV data")?;
    }

    let duration_ms = if sample_rate == 0 || channels == 0 {
        0
    } else {
        (sample_count as u64 * 1000) / (sample_rate as u64 * channels as u64)
    };

    Ok(EncodedAudio {
        data: Bytes::from(buffer.into_inner()),
        duration_ms,
        sample_count,
    })
}

/// A WAV file loaded fully into memory
pub struct AudioFile {
    pub path: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening audio file: {}", path.display());

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")?;

        info!(
            "Audio file loaded: {}Hz, {} channels, {} samples",
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        Ok(Self {
            path: path.display().to_string(),
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        })
    }
}
