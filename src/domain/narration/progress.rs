use std::time::Duration;

use serde::Serialize;

/// Pipeline phase a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Synthesizing,
    Joining,
}

/// One progress observation, emitted by the coordinator after each completed
/// fragment and each joined clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub total: usize,
    pub completed: usize,
    pub phase: Phase,
    /// Projected seconds left in the synthesis phase. None until the first
    /// fragment completes, and always None while joining.
    pub eta_seconds: Option<u64>,
}

impl ProgressEvent {
    pub fn synthesizing(total: usize, completed: usize, eta: Option<Duration>) -> Self {
        Self {
            total,
            completed,
            phase: Phase::Synthesizing,
            eta_seconds: eta.map(|d| d.as_secs()),
        }
    }

    pub fn joining(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            phase: Phase::Joining,
            eta_seconds: None,
        }
    }

    /// Position of this event on a 0-100 scale. Synthesis covers the first
    /// 90 percent of the bar, joining the final 10.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        let ratio = self.completed as f32 / self.total as f32;
        match self.phase {
            Phase::Synthesizing => ratio * 90.0,
            Phase::Joining => 90.0 + ratio * 10.0,
        }
    }
}

/// Sink for progress events.
///
/// Reports are delivered synchronously from the coordinating task, so
/// implementations must return quickly and never block on the pipeline.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Reporter that discards everything
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&self, _event: ProgressEvent) {}
}

/// Reporter that logs each event through tracing
#[derive(Debug, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, event: ProgressEvent) {
        tracing::info!(
            phase = ?event.phase,
            completed = event.completed,
            total = event.total,
            eta_seconds = event.eta_seconds,
            percent = event.percent(),
            "narration progress"
        );
    }
}
