use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::narration::{Phase, ProgressEvent, ProgressReporter};

/// Terminal progress bar fed by pipeline events.
///
/// The bar runs 0 to 100. Synthesis fills the first 90 percent and joining
/// the last 10, which `ProgressEvent::percent` already accounts for.
pub struct ConsoleReporter {
    bar: ProgressBar,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        self.bar.set_position(event.percent().round() as u64);

        if event.percent() >= 100.0 {
            self.bar.finish_with_message("done");
            return;
        }
        let message = match (event.phase, event.eta_seconds) {
            (Phase::Synthesizing, Some(eta)) => {
                format!(
                    "synthesizing {}/{} (eta {eta}s)",
                    event.completed, event.total
                )
            }
            (Phase::Synthesizing, None) => {
                format!("synthesizing {}/{}", event.completed, event.total)
            }
            (Phase::Joining, _) => format!("joining {}/{}", event.completed, event.total),
        };
        self.bar.set_message(message);
    }
}

/// Writes each event as one JSON line on stdout, for callers that drive
/// the binary programmatically
#[derive(Debug, Default)]
pub struct JsonLineReporter;

impl ProgressReporter for JsonLineReporter {
    fn report(&self, event: ProgressEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize a progress event"),
        }
    }
}
