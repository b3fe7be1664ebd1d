use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("wav error at {}: {source}", .path.display())]
    Wav {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("unsupported wav format at {} ({bits}-bit {format})", .path.display())]
    UnsupportedFormat {
        path: PathBuf,
        bits: u16,
        format: &'static str,
    },
}

/// Decoded PCM audio, interleaved 16-bit samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioClip {
    /// A clip of zeroed samples with the requested duration
    pub fn silence(duration: Duration, sample_rate: u32, channels: u16) -> Self {
        let frames = (duration.as_secs_f64() * sample_rate as f64).round() as usize;
        Self {
            sample_rate,
            channels,
            samples: vec![0; frames * channels.max(1) as usize],
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Drop `amount` of audio from the end, frame aligned. Trimming more
    /// than the clip holds leaves it empty.
    pub fn trim_tail(&mut self, amount: Duration) {
        let drop_frames = (amount.as_secs_f64() * self.sample_rate as f64).round() as usize;
        let keep = self.frames().saturating_sub(drop_frames);
        self.samples.truncate(keep * self.channels.max(1) as usize);
    }

    /// Append another clip's samples. The caller guarantees the specs match.
    pub fn append(&mut self, other: &AudioClip) {
        self.samples.extend_from_slice(&other.samples);
    }

    /// Human-readable format label for diagnostics
    pub fn spec_label(&self) -> String {
        format!("{} Hz, {} ch", self.sample_rate, self.channels)
    }
}

/// Decode a WAV file into an AudioClip.
///
/// 16-bit integer samples are read as-is; 32-bit float samples are scaled
/// to 16-bit. Anything else is rejected.
pub fn read_wav(path: &Path) -> Result<AudioClip, AudioError> {
    let wrap = |source: hound::Error| AudioError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(wrap)?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(wrap)?,
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f32_to_i16))
            .collect::<Result<Vec<_>, _>>()
            .map_err(wrap)?,
        (format, bits) => {
            return Err(AudioError::UnsupportedFormat {
                path: path.to_path_buf(),
                bits,
                format: match format {
                    hound::SampleFormat::Int => "int",
                    hound::SampleFormat::Float => "float",
                },
            })
        }
    };

    Ok(AudioClip {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

/// Encode an AudioClip as a 16-bit PCM WAV file
pub fn write_wav(path: &Path, clip: &AudioClip) -> Result<(), AudioError> {
    let wrap = |source: hound::Error| AudioError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: clip.channels,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wrap)?;
    for &sample in &clip.samples {
        writer.write_sample(sample).map_err(wrap)?;
    }
    writer.finalize().map_err(wrap)?;
    Ok(())
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
