use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lingua::{LanguageDetector, LanguageDetectorBuilder};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::assembler::{Assembler, MissingClipPolicy};
use super::dto::{NarrationReport, NarrationRequest, VoiceProfile};
use super::error::NarrationError;
use super::fragmenter::fragmentize;
use super::language::LanguageCode;
use super::progress::{ProgressEvent, ProgressReporter};
use super::scheduler::Scheduler;
use crate::infrastructure::engine::SynthesisEngine;

/// Tunables for a narration pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Maximum concurrent synthesis calls
    pub pool_size: usize,
    /// Audio trimmed from each seam when clips are joined
    pub seam_trim: Duration,
    /// What to do when a fragment has no clip at assembly time
    pub missing_clip_policy: MissingClipPolicy,
    /// Soft target for fragment length, in characters
    pub max_fragment_length: usize,
    /// Directory that holds the per-run scratch directories
    pub temp_root: PathBuf,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pool_size: 1,
            seam_trim: Duration::from_millis(250),
            missing_clip_policy: MissingClipPolicy::default(),
            max_fragment_length: 200,
            temp_root: std::env::temp_dir(),
        }
    }
}

/// Per-run state: identity, scratch space, and the output target.
///
/// Every path a run touches is derived from here, and everything is torn
/// down together when the run ends.
#[derive(Debug)]
pub struct RunContext {
    pub run_id: Uuid,
    pub temp_dir: PathBuf,
    pub output_path: PathBuf,
    pub total_fragments: usize,
}

impl RunContext {
    /// Create the run's scratch directory under `temp_root`
    pub fn create(
        temp_root: &Path,
        output_path: PathBuf,
        total_fragments: usize,
    ) -> std::io::Result<Self> {
        let run_id = Uuid::new_v4();
        let temp_dir = temp_root.join(format!("voicetape-{run_id}"));
        std::fs::create_dir_all(&temp_dir)?;
        Ok(Self {
            run_id,
            temp_dir,
            output_path,
            total_fragments,
        })
    }

    /// Path of the clip for a 0-based fragment index. Files are numbered
    /// from 1, `fragment_1.wav` through `fragment_{total}.wav`.
    pub fn clip_path(&self, index: usize) -> PathBuf {
        self.temp_dir.join(format!("fragment_{}.wav", index + 1))
    }

    /// Remove the scratch directory. Failures are logged, never returned:
    /// leftover temp files must not fail a finished run.
    pub fn cleanup(&self) {
        if let Err(e) = std::fs::remove_dir_all(&self.temp_dir) {
            tracing::warn!(
                run_id = %self.run_id,
                temp_dir = %self.temp_dir.display(),
                error = %e,
                "Failed to remove the run's temp directory"
            );
        }
    }
}

pub struct NarrationService {
    engine: Arc<dyn SynthesisEngine>,
    reporter: Arc<dyn ProgressReporter>,
    options: PipelineOptions,
    language_detector: LanguageDetector,
    run_lock: Mutex<()>,
}

impl NarrationService {
    pub fn new(
        engine: Arc<dyn SynthesisEngine>,
        reporter: Arc<dyn ProgressReporter>,
        options: PipelineOptions,
    ) -> Self {
        // Detector covers the languages enabled in Cargo.toml, which match
        // the engine's supported set
        let language_detector = LanguageDetectorBuilder::from_all_languages().build();

        Self {
            engine,
            reporter,
            options,
            language_detector,
            run_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
pub trait NarrationServiceApi: Send + Sync {
    /// Narrate text into a single audio file
    ///
    /// This operation:
    /// - Normalizes the text and resolves the narration language
    /// - Synthesizes fragments through the engine, bounded by the pool
    /// - Joins the clips in fragment order and writes the output file
    ///
    /// Returns metadata about the produced narration.
    async fn narrate(&self, request: NarrationRequest)
        -> Result<NarrationReport, NarrationError>;
}

#[async_trait]
impl NarrationServiceApi for NarrationService {
    async fn narrate(
        &self,
        request: NarrationRequest,
    ) -> Result<NarrationReport, NarrationError> {
        // One run at a time: the scratch layout and the progress protocol
        // both assume a single active run.
        let _run_guard = self
            .run_lock
            .try_lock()
            .map_err(|_| NarrationError::RunInProgress)?;

        let start_time = Instant::now();

        tracing::info!(
            engine = self.engine.name(),
            text_length = request.text.len(),
            voice_samples = request.voice_samples.len(),
            output = %request.output_path.display(),
            "Narration request"
        );

        // 1. Validate the voice samples
        if request.voice_samples.is_empty() {
            return Err(NarrationError::NoVoiceSamples);
        }
        for sample in &request.voice_samples {
            if !sample.exists() {
                return Err(NarrationError::VoiceSampleNotFound(sample.clone()));
            }
        }

        // 2. Normalize the text
        let text = normalize_text(&request.text);
        let char_count = text.chars().count();
        if text.is_empty() {
            return Err(NarrationError::EmptyText(
                "the text is empty after normalization".to_string(),
            ));
        }

        // 3. Resolve the narration language
        let language = match request.language {
            Some(language) => language,
            None => self.detect_language(&text),
        };
        tracing::info!(language = %language, char_count, "Narration language resolved");

        // 4. Split into fragments
        let fragments = fragmentize(&text, self.options.max_fragment_length);
        if fragments.is_empty() {
            return Err(NarrationError::EmptyText(
                "no speakable fragments in the text".to_string(),
            ));
        }
        let total = fragments.len();

        // 5. Probe the engine before burning any synthesis time
        self.engine.ready().await?;

        // 6. Set up the run
        let ctx = RunContext::create(
            &self.options.temp_root,
            request.output_path.clone(),
            total,
        )
        .map_err(|e| {
            NarrationError::Other(
                anyhow::Error::new(e).context("failed to create the run's temp directory"),
            )
        })?;
        let voice = VoiceProfile {
            sample_paths: request.voice_samples.clone(),
            language,
        };

        tracing::info!(
            run_id = %ctx.run_id,
            fragments = total,
            pool_size = self.options.pool_size,
            temp_dir = %ctx.temp_dir.display(),
            "Narration run started"
        );
        self.reporter
            .report(ProgressEvent::synthesizing(total, 0, None));

        // 7. Synthesize all fragments
        let scheduler = Scheduler::new(
            self.engine.clone(),
            self.reporter.clone(),
            self.options.pool_size,
        );
        let results = scheduler.run(fragments, &voice, &ctx).await;
        let failed_fragments: Vec<usize> = results
            .iter()
            .enumerate()
            .filter_map(|(index, result)| result.is_none().then_some(index))
            .collect();

        // 8. Join the clips into the output file
        let assembler = Assembler::new(
            self.reporter.clone(),
            self.options.seam_trim,
            self.options.missing_clip_policy,
        );
        let assembly = assembler.assemble(&ctx, &results);

        // 9. Tear the scratch space down whatever happened
        ctx.cleanup();

        let stats = assembly?;

        // 10. Close out the run
        self.reporter.report(ProgressEvent::joining(total, total));

        let report = NarrationReport {
            output_path: ctx.output_path.clone(),
            language,
            char_count,
            fragments_total: total,
            failed_fragments,
            duration_seconds: stats.output_duration.as_secs_f64(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        };

        tracing::info!(
            run_id = %ctx.run_id,
            fragments = report.fragments_total,
            failed = report.failed_fragments.len(),
            duration_secs = format!("{:.2}", report.duration_seconds),
            elapsed_secs = format!("{:.2}", report.elapsed_seconds),
            output = %ctx.output_path.display(),
            "Narration complete"
        );

        Ok(report)
    }
}

impl NarrationService {
    /// Detect language from text
    fn detect_language(&self, text: &str) -> LanguageCode {
        match self.language_detector.detect_language_of(text) {
            Some(language) => LanguageCode::from_lingua(language),
            None => {
                tracing::warn!("Could not detect language, falling back to English");
                LanguageCode::English
            }
        }
    }
}

/// Strip URLs and collapse whitespace so the fragmenter sees clean prose
fn normalize_text(text: &str) -> String {
    // Remove URLs (both http and https)
    let url_pattern = regex::Regex::new(r"https?://[^\s]+").unwrap();
    let without_urls = url_pattern.replace_all(text, "");

    // Normalize whitespace (replace multiple spaces/newlines with single space)
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
    let normalized = whitespace_pattern.replace_all(&without_urls, " ");

    normalized.trim().to_string()
}
