use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::error::AssemblyError;
use super::progress::{ProgressEvent, ProgressReporter};
use super::scheduler::FragmentResult;
use super::service::RunContext;
use crate::infrastructure::audio::{self, AudioClip};

/// How the assembler treats a fragment whose clip never materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingClipPolicy {
    /// Stop with a diagnostic naming the fragment; produce no output file
    #[default]
    Fail,
    /// Insert silence of the mean successful-clip duration and keep going
    SubstituteSilence,
}

impl FromStr for MissingClipPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "fail" => Ok(MissingClipPolicy::Fail),
            "silence" | "substitute_silence" => Ok(MissingClipPolicy::SubstituteSilence),
            other => Err(format!(
                "unknown missing-clip policy '{other}', expected 'fail' or 'silence'"
            )),
        }
    }
}

/// Outcome of a completed join
#[derive(Debug, Clone)]
pub struct AssemblyStats {
    pub clips_joined: usize,
    /// 0-based indices that were replaced by silence
    pub substituted: Vec<usize>,
    pub output_duration: Duration,
}

/// Joins the run's clips, in fragment order, into one output file.
///
/// The first clip seeds the combined buffer whole; every later clip loses
/// the seam artifact at its tail before being appended, so N clips come out
/// `(N - 1) * seam_trim` shorter than their sum.
pub struct Assembler {
    reporter: Arc<dyn ProgressReporter>,
    seam_trim: Duration,
    missing_policy: MissingClipPolicy,
}

impl Assembler {
    pub fn new(
        reporter: Arc<dyn ProgressReporter>,
        seam_trim: Duration,
        missing_policy: MissingClipPolicy,
    ) -> Self {
        Self {
            reporter,
            seam_trim,
            missing_policy,
        }
    }

    pub fn assemble(
        &self,
        ctx: &RunContext,
        results: &[Option<FragmentResult>],
    ) -> Result<AssemblyStats, AssemblyError> {
        let total = results.len();
        self.reporter.report(ProgressEvent::joining(total, 0));

        // 1. Load everything synthesis produced, in index order.
        let mut clips: Vec<Option<AudioClip>> = Vec::with_capacity(total);
        for (index, result) in results.iter().enumerate() {
            let clip = match result {
                Some(result) => Some(audio::read_wav(&result.clip_path).map_err(|source| {
                    AssemblyError::Clip {
                        fragment: index + 1,
                        source,
                    }
                })?),
                None => match self.missing_policy {
                    MissingClipPolicy::Fail => {
                        return Err(AssemblyError::MissingClip {
                            fragment: index + 1,
                            total,
                            path: ctx.clip_path(index),
                        })
                    }
                    MissingClipPolicy::SubstituteSilence => None,
                },
            };
            clips.push(clip);
        }

        // 2. The first surviving clip fixes the run's format; substituted
        //    silence takes the mean duration of what survived.
        let reference = clips.iter().flatten().next().ok_or(AssemblyError::NoClips)?;
        let sample_rate = reference.sample_rate;
        let channels = reference.channels;
        let mean_duration = {
            let survivors = clips.iter().flatten().count() as u32;
            let summed: Duration = clips.iter().flatten().map(|c| c.duration()).sum();
            summed / survivors
        };

        // 3. Join in fragment order.
        let mut substituted = Vec::new();
        let mut combined: Option<AudioClip> = None;
        let mut joined = 0usize;

        for (index, clip) in clips.into_iter().enumerate() {
            let mut clip = match clip {
                Some(clip) => clip,
                None => {
                    substituted.push(index);
                    tracing::warn!(
                        fragment = index + 1,
                        silence_ms = mean_duration.as_millis(),
                        "Substituting silence for a missing clip"
                    );
                    AudioClip::silence(mean_duration, sample_rate, channels)
                }
            };

            if clip.sample_rate != sample_rate || clip.channels != channels {
                return Err(AssemblyError::SpecMismatch {
                    fragment: index + 1,
                    expected: format!("{} Hz, {} ch", sample_rate, channels),
                    found: clip.spec_label(),
                });
            }

            match combined.as_mut() {
                None => combined = Some(clip),
                Some(combined) => {
                    clip.trim_tail(self.seam_trim);
                    combined.append(&clip);
                }
            }

            joined += 1;
            // The full (total, total) event is the coordinator's to send,
            // once the output file is actually on disk.
            if joined < total {
                self.reporter.report(ProgressEvent::joining(total, joined));
            }
        }

        let combined = combined.ok_or(AssemblyError::NoClips)?;

        // 4. Export.
        audio::write_wav(&ctx.output_path, &combined).map_err(AssemblyError::Export)?;

        let stats = AssemblyStats {
            clips_joined: joined,
            substituted,
            output_duration: combined.duration(),
        };

        tracing::info!(
            output = %ctx.output_path.display(),
            clips = stats.clips_joined,
            substituted = stats.substituted.len(),
            duration_secs = stats.output_duration.as_secs_f64(),
            "Narration assembled"
        );

        Ok(stats)
    }
}
