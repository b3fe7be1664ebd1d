pub mod progress;

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use crate::domain::narration::{LanguageCode, MissingClipPolicy, NarrationRequest};
use crate::error::{AppError, AppResult};

/// Narrate a text file with a cloned voice through an XTTS server
#[derive(Debug, Parser)]
#[command(name = "voicetape", version, about)]
pub struct Cli {
    /// Text file to narrate. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Voice sample WAV to clone. Repeat the flag for more samples.
    #[arg(short, long = "voice", value_name = "WAV", required = true)]
    pub voices: Vec<PathBuf>,

    /// Narration language code, like "en" or "pt". Detected from the text
    /// when omitted.
    #[arg(short, long)]
    pub language: Option<LanguageCode>,

    /// Where to write the finished narration
    #[arg(short, long, default_value = "narration.wav")]
    pub output: PathBuf,

    /// Fragments synthesized in parallel, overriding POOL_SIZE
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// What to do with a fragment that failed synthesis: "fail" or "silence"
    #[arg(long, value_name = "POLICY")]
    pub on_missing_clip: Option<MissingClipPolicy>,

    /// Emit progress events and the final report as JSON lines on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Build the narration request, reading the text from the input file
    /// or from stdin
    pub fn to_request(&self) -> AppResult<NarrationRequest> {
        let text = match &self.input {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::BadRequest(format!("cannot read {}: {e}", path.display()))
            })?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| AppError::BadRequest(format!("cannot read stdin: {e}")))?;
                text
            }
        };

        Ok(NarrationRequest {
            text,
            voice_samples: self.voices.clone(),
            language: self.language,
            output_path: self.output.clone(),
        })
    }
}
