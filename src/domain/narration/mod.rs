pub mod assembler;
pub mod dto;
pub mod error;
pub mod eta;
pub mod fragmenter;
pub mod language;
pub mod progress;
pub mod scheduler;
pub mod service;

pub use assembler::{Assembler, AssemblyStats, MissingClipPolicy};
pub use dto::{NarrationReport, NarrationRequest, VoiceProfile};
pub use error::{AssemblyError, NarrationError};
pub use eta::EtaTracker;
pub use fragmenter::{fragmentize, Fragment};
pub use language::{LanguageCode, UnsupportedLanguage, SUPPORTED_CODES};
pub use progress::{LogReporter, NullReporter, Phase, ProgressEvent, ProgressReporter};
pub use scheduler::{FragmentResult, Scheduler};
pub use service::{NarrationService, NarrationServiceApi, PipelineOptions, RunContext};
