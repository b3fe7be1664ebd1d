mod xtts;

pub use xtts::XttsServerEngine;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::narration::VoiceProfile;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Request(String),
    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to store clip at {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("engine unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Boundary to the voice-cloning synthesis engine.
///
/// One call turns one fragment of text into one WAV file at `output`. The
/// engine is opaque to the pipeline: any failure is reported, never retried
/// here.
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Synthesize `text` in the voice described by `voice`, writing the
    /// resulting WAV to `output`.
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        output: &Path,
    ) -> Result<(), EngineError>;

    /// Engine label for logs
    fn name(&self) -> &str;

    /// Probe the engine once per run so an unreachable engine fails the run
    /// up front instead of failing every fragment.
    async fn ready(&self) -> Result<(), EngineError> {
        Ok(())
    }
}
