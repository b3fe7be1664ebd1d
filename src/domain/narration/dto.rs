use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::language::LanguageCode;

/// Input for one narration run
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationRequest {
    pub text: String,
    /// Reference recordings of the voice to clone
    pub voice_samples: Vec<PathBuf>,
    /// Engine language; detected from the text when absent
    pub language: Option<LanguageCode>,
    pub output_path: PathBuf,
}

/// The resolved voice-cloning inputs handed to every synthesis call
#[derive(Debug, Clone)]
pub struct VoiceProfile {
    pub sample_paths: Vec<PathBuf>,
    pub language: LanguageCode,
}

/// Metadata describing a finished narration run
#[derive(Debug, Clone, Serialize)]
pub struct NarrationReport {
    pub output_path: PathBuf,
    pub language: LanguageCode,
    /// Characters narrated, counted after normalization
    pub char_count: usize,
    pub fragments_total: usize,
    /// 0-based indices of fragments that failed synthesis
    pub failed_fragments: Vec<usize>,
    /// Length of the produced audio in seconds
    pub duration_seconds: f64,
    /// Wall-clock time of the whole run in seconds
    pub elapsed_seconds: f64,
}
