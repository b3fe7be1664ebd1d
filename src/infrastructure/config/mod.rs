use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::narration::{MissingClipPolicy, PipelineOptions};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub engine_url: String,
    pub engine_timeout_secs: u64,
    pub pool_size: usize,
    pub seam_trim_ms: u64,
    pub max_fragment_length: usize,
    pub temp_root: PathBuf,
    pub missing_clip_policy: MissingClipPolicy,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            engine_url: env::var("XTTS_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5002".to_string()),
            engine_timeout_secs: env::var("XTTS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            pool_size: env::var("POOL_SIZE")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            seam_trim_ms: env::var("SEAM_TRIM_MS")
                .unwrap_or_else(|_| "250".to_string())
                .parse()?,
            max_fragment_length: env::var("MAX_FRAGMENT_LENGTH")
                .unwrap_or_else(|_| "200".to_string())
                .parse()?,
            temp_root: env::var("TEMP_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            missing_clip_policy: env::var("ON_MISSING_CLIP")
                .unwrap_or_else(|_| "fail".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            pool_size: self.pool_size,
            seam_trim: Duration::from_millis(self.seam_trim_ms),
            missing_clip_policy: self.missing_clip_policy,
            max_fragment_length: self.max_fragment_length,
            temp_root: self.temp_root.clone(),
        }
    }
}
