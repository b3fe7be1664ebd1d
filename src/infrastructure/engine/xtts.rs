use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{EngineError, SynthesisEngine};
use crate::domain::narration::VoiceProfile;

/// Request body for the synthesis server's TTS route
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    language: &'a str,
    speaker_wav: Vec<String>,
}

/// HTTP adapter to an XTTS-family synthesis server.
///
/// The server owns the model, so the expensive initialization happens once
/// per server lifetime rather than once per fragment. One shared client is
/// reused for every request.
pub struct XttsServerEngine {
    client: reqwest::Client,
    base_url: String,
}

impl XttsServerEngine {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| EngineError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn synthesis_url(&self) -> String {
        format!("{}/api/tts", self.base_url)
    }
}

#[async_trait]
impl SynthesisEngine for XttsServerEngine {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        output: &Path,
    ) -> Result<(), EngineError> {
        let start_time = std::time::Instant::now();

        let body = SynthesisRequest {
            text,
            language: voice.language.as_str(),
            speaker_wav: voice
                .sample_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        };

        tracing::debug!(
            url = %self.synthesis_url(),
            language = %voice.language,
            text_length = text.chars().count(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling synthesis server"
        );

        let response = self
            .client
            .post(self.synthesis_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    url = %self.synthesis_url(),
                    text_length = text.chars().count(),
                    "Synthesis request failed"
                );
                EngineError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Synthesis server returned an error"
            );
            return Err(EngineError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let audio_bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read synthesis response body");
            EngineError::Request(e.to_string())
        })?;

        tokio::fs::write(output, &audio_bytes)
            .await
            .map_err(|source| EngineError::Store {
                path: output.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            clip = %output.display(),
            "Fragment synthesized"
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "xtts-server"
    }

    /// Reachability probe only: any HTTP response counts as ready, since
    /// model servers commonly 404 their root route.
    async fn ready(&self) -> Result<(), EngineError> {
        self.client
            .get(self.base_url.as_str())
            .send()
            .await
            .map_err(|e| EngineError::Unreachable {
                url: self.base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
