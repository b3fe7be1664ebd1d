use std::path::PathBuf;

use crate::error::AppError;
use crate::infrastructure::audio::AudioError;
use crate::infrastructure::engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("nothing to narrate: {0}")]
    EmptyText(String),
    #[error("at least one voice sample is required")]
    NoVoiceSamples,
    #[error("voice sample not found: {}", .0.display())]
    VoiceSampleNotFound(PathBuf),
    #[error("a narration run is already in progress")]
    RunInProgress,
    #[error("synthesis engine unavailable: {0}")]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Terminal failure while joining clips into the output file.
///
/// Fragment numbers in messages are 1-based, matching the clip filenames.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("clip for fragment {fragment} of {total} is missing at {}", .path.display())]
    MissingClip {
        fragment: usize,
        total: usize,
        path: PathBuf,
    },
    #[error("no clips were produced, nothing to join")]
    NoClips,
    #[error("clip for fragment {fragment} is {found}, the run produces {expected}")]
    SpecMismatch {
        fragment: usize,
        expected: String,
        found: String,
    },
    #[error("failed to read clip for fragment {fragment}: {source}")]
    Clip {
        fragment: usize,
        source: AudioError,
    },
    #[error("failed to export the combined audio: {0}")]
    Export(#[source] AudioError),
}

impl From<NarrationError> for AppError {
    fn from(err: NarrationError) -> Self {
        match err {
            NarrationError::EmptyText(msg) => AppError::BadRequest(msg),
            NarrationError::NoVoiceSamples => {
                AppError::BadRequest("at least one voice sample is required".to_string())
            }
            NarrationError::VoiceSampleNotFound(path) => {
                AppError::BadRequest(format!("voice sample not found: {}", path.display()))
            }
            NarrationError::RunInProgress => AppError::Busy,
            NarrationError::Engine(e) => AppError::Engine(e),
            NarrationError::Assembly(e) => AppError::Assembly(e.to_string()),
            NarrationError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
