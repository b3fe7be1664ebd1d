use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Semaphore};

use super::dto::VoiceProfile;
use super::eta::EtaTracker;
use super::fragmenter::Fragment;
use super::progress::{ProgressEvent, ProgressReporter};
use super::service::RunContext;
use crate::infrastructure::engine::{EngineError, SynthesisEngine};

/// Outcome of one successfully synthesized fragment
#[derive(Debug, Clone)]
pub struct FragmentResult {
    pub index: usize,
    pub clip_path: PathBuf,
    pub elapsed: Duration,
}

/// Fans fragments out to a bounded set of synthesis workers and collects
/// the outcomes back into index order.
pub struct Scheduler {
    engine: Arc<dyn SynthesisEngine>,
    reporter: Arc<dyn ProgressReporter>,
    pool_size: usize,
}

impl Scheduler {
    pub fn new(
        engine: Arc<dyn SynthesisEngine>,
        reporter: Arc<dyn ProgressReporter>,
        pool_size: usize,
    ) -> Self {
        Self {
            engine,
            reporter,
            pool_size: pool_size.max(1),
        }
    }

    /// Synthesize every fragment, at most `pool_size` at a time.
    ///
    /// Returns a vector aligned with fragment indices; `None` marks a
    /// fragment whose synthesis failed. Failures are logged and skipped so
    /// the rest of the run keeps going. The call returns only once every
    /// submitted fragment has reported back.
    ///
    /// After each completion the coordinator records the elapsed time,
    /// projects the remaining time from the running mean, and emits one
    /// progress event. Only the coordinator touches the timing state.
    pub async fn run(
        &self,
        fragments: Vec<Fragment>,
        voice: &VoiceProfile,
        ctx: &RunContext,
    ) -> Vec<Option<FragmentResult>> {
        let total = fragments.len();
        let mut results: Vec<Option<FragmentResult>> = vec![None; total];
        if total == 0 {
            return results;
        }

        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let (tx, mut rx) = mpsc::channel::<(usize, Result<FragmentResult, EngineError>)>(32);
        let voice = Arc::new(voice.clone());

        // Submission in index order; completion order is up to the pool.
        for fragment in fragments {
            let semaphore = semaphore.clone();
            let engine = self.engine.clone();
            let voice = voice.clone();
            let clip_path = ctx.clip_path(fragment.index);
            let tx = tx.clone();

            tokio::spawn(async move {
                // The semaphore lives as long as the workers, so acquire
                // only fails if it were closed.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let outcome =
                    synthesize_fragment(engine.as_ref(), &fragment, &voice, &clip_path).await;
                let _ = tx.send((fragment.index, outcome)).await;
            });
        }
        drop(tx);

        let mut eta = EtaTracker::new();
        let mut completed = 0usize;

        while let Some((index, outcome)) = rx.recv().await {
            completed += 1;
            match outcome {
                Ok(result) => {
                    eta.record(result.elapsed);
                    results[index] = Some(result);
                }
                Err(error) => {
                    tracing::error!(
                        fragment = index + 1,
                        total,
                        error = %error,
                        "Fragment synthesis failed, continuing without it"
                    );
                }
            }
            let estimate = eta.estimate(total - completed);
            self.reporter
                .report(ProgressEvent::synthesizing(total, completed, estimate));
        }

        tracing::info!(
            total,
            succeeded = eta.completed(),
            failed = total - eta.completed(),
            "Synthesis phase finished"
        );

        results
    }
}

/// One worker step: a single engine call with its wall time measured
async fn synthesize_fragment(
    engine: &dyn SynthesisEngine,
    fragment: &Fragment,
    voice: &VoiceProfile,
    clip_path: &Path,
) -> Result<FragmentResult, EngineError> {
    tracing::debug!(
        fragment = fragment.index + 1,
        text_length = fragment.text.chars().count(),
        "Synthesizing fragment"
    );

    let start_time = Instant::now();
    engine.synthesize(&fragment.text, voice, clip_path).await?;
    let elapsed = start_time.elapsed();

    tracing::debug!(
        fragment = fragment.index + 1,
        latency_ms = elapsed.as_millis(),
        "Fragment synthesized"
    );

    Ok(FragmentResult {
        index: fragment.index,
        clip_path: clip_path.to_path_buf(),
        elapsed,
    })
}
