use std::time::Duration;

/// Running mean of per-fragment synthesis times, used to project how long
/// the fragments still in flight will take.
#[derive(Debug, Default)]
pub struct EtaTracker {
    durations: Vec<Duration>,
}

impl EtaTracker {
    pub fn new() -> Self {
        Self {
            durations: Vec::new(),
        }
    }

    /// Record the elapsed time of one completed fragment
    pub fn record(&mut self, elapsed: Duration) {
        self.durations.push(elapsed);
    }

    pub fn completed(&self) -> usize {
        self.durations.len()
    }

    /// Mean synthesis time over everything recorded so far
    pub fn mean(&self) -> Option<Duration> {
        if self.durations.is_empty() {
            return None;
        }
        let total: Duration = self.durations.iter().sum();
        Some(total / self.durations.len() as u32)
    }

    /// Projected time to finish `remaining` fragments.
    /// None until the first completion lands.
    pub fn estimate(&self, remaining: usize) -> Option<Duration> {
        self.mean().map(|mean| mean * remaining as u32)
    }
}
