use crate::infrastructure::audio::AudioError;
use crate::infrastructure::engine::EngineError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("A narration run is already in progress")]
    Busy,

    #[error("Synthesis engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("Assembly failed: {0}")]
    Assembly(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) => 2,
            Self::Busy => 3,
            Self::Engine(_) | Self::Audio(_) | Self::Assembly(_) | Self::Internal(_) => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
