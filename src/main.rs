use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicetape::cli::progress::{ConsoleReporter, JsonLineReporter};
use voicetape::cli::Cli;
use voicetape::domain::narration::{
    NarrationReport, NarrationService, NarrationServiceApi, ProgressReporter,
};
use voicetape::error::{AppError, AppResult};
use voicetape::infrastructure::config::{Config, LogFormat};
use voicetape::infrastructure::engine::XttsServerEngine;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Initialize logging
    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "Narration failed");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, config: Config) -> AppResult<()> {
    tracing::info!(engine_url = %config.engine_url, "Starting voicetape");

    // Read the text up front so a bad input path fails before any wiring
    let request = cli.to_request()?;

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the synthesis engine (inject server url and timeout)
    let engine = Arc::new(XttsServerEngine::new(
        &config.engine_url,
        config.engine_timeout(),
    )?);

    // 2. Pick the progress reporter
    let reporter: Arc<dyn ProgressReporter> = if cli.json {
        Arc::new(JsonLineReporter)
    } else {
        Arc::new(ConsoleReporter::new())
    };

    // 3. Instantiate the narration service (inject engine and reporter)
    let mut options = config.pipeline_options();
    if let Some(jobs) = cli.jobs {
        options.pool_size = jobs;
    }
    if let Some(policy) = cli.on_missing_clip {
        options.missing_clip_policy = policy;
    }
    let service = NarrationService::new(engine, reporter, options);

    // Run the narration
    let report = service.narrate(request).await?;

    print_report(&cli, &report)
}

fn print_report(cli: &Cli, report: &NarrationReport) -> AppResult<()> {
    if cli.json {
        let line =
            serde_json::to_string(report).map_err(|e| AppError::Internal(e.to_string()))?;
        println!("{line}");
        return Ok(());
    }

    println!(
        "Wrote {} ({:.1}s of audio from {} fragments in {:.1}s)",
        report.output_path.display(),
        report.duration_seconds,
        report.fragments_total,
        report.elapsed_seconds
    );
    if !report.failed_fragments.is_empty() {
        println!(
            "  {} of {} fragments failed synthesis and were replaced with silence",
            report.failed_fragments.len(),
            report.fragments_total
        );
    }
    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicetape=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicetape=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .pretty(),
            )
            .init();
    }
}
