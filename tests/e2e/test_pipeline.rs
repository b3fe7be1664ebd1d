use crate::helpers;

use std::sync::Arc;

use helpers::engine_mocks::{clip_duration, MockEngine, MOCK_SAMPLE_RATE};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use voicetape::domain::narration::{LanguageCode, NarrationError, NarrationServiceApi};
use voicetape::infrastructure::audio;

const CHAPTER: &str = "One sentence here. Another follows! Done now.";

// What the fragmenter makes of CHAPTER: terminators split it, and interior
// periods of non-final fragments soften into commas.
const CHAPTER_FRAGMENTS: [&str; 3] = ["One sentence here,", "Another follows!", "Done now."];

const SEAM_TRIM_FRAMES: usize = 250 * MOCK_SAMPLE_RATE as usize / 1000;

fn frames_of(text: &str) -> usize {
    clip_duration(text).as_millis() as usize * MOCK_SAMPLE_RATE as usize / 1000
}

#[tokio::test]
async fn it_should_narrate_a_chapter_into_one_wav() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    let report = ctx.service.narrate(ctx.request(CHAPTER)).await.unwrap();

    assert_eq!(report.fragments_total, 3);
    assert_eq!(report.failed_fragments, Vec::<usize>::new());
    assert_eq!(report.language, LanguageCode::English);
    assert_eq!(report.char_count, CHAPTER.chars().count());
    assert_eq!(report.output_path, ctx.output_path());

    // Three clips joined with two seams, each seam losing 250ms
    let output = audio::read_wav(&ctx.output_path()).unwrap();
    let expected_frames: usize = CHAPTER_FRAGMENTS.iter().map(|t| frames_of(t)).sum::<usize>()
        - 2 * SEAM_TRIM_FRAMES;
    assert_eq!(output.frames(), expected_frames);

    let expected_seconds = expected_frames as f64 / MOCK_SAMPLE_RATE as f64;
    assert!((report.duration_seconds - expected_seconds).abs() < 1e-6);
}

#[tokio::test]
async fn it_should_keep_a_single_fragment_untrimmed() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    ctx.service
        .narrate(ctx.request("Only one line here."))
        .await
        .unwrap();

    let output = audio::read_wav(&ctx.output_path()).unwrap();
    assert_eq!(output.frames(), frames_of("Only one line here."));
}

#[tokio::test]
async fn it_should_produce_the_same_audio_at_any_pool_size() {
    let serial = TestContext::new(Arc::new(MockEngine::default()));
    let parallel = TestContext::with_options(Arc::new(MockEngine::default()), |options| {
        options.pool_size = 4;
    });

    serial
        .service
        .narrate(serial.request(CHAPTER))
        .await
        .unwrap();
    parallel
        .service
        .narrate(parallel.request(CHAPTER))
        .await
        .unwrap();

    let one_worker = std::fs::read(serial.output_path()).unwrap();
    let four_workers = std::fs::read(parallel.output_path()).unwrap();
    assert_eq!(one_worker, four_workers);
}

#[tokio::test]
async fn it_should_call_the_engine_once_per_fragment() {
    let engine = Arc::new(MockEngine::default());
    let ctx = TestContext::new(engine.clone());

    ctx.service.narrate(ctx.request(CHAPTER)).await.unwrap();

    assert_eq!(engine.calls(), 3);
}

#[tokio::test]
async fn it_should_clean_up_its_scratch_space() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    ctx.service.narrate(ctx.request(CHAPTER)).await.unwrap();

    assert!(ctx.output_path().exists());
    assert_eq!(ctx.leftover_run_dirs(), Vec::<std::path::PathBuf>::new());
}

#[tokio::test]
async fn it_should_reject_text_with_nothing_to_say() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    let err = ctx.service.narrate(ctx.request("   ")).await.unwrap_err();
    assert!(matches!(err, NarrationError::EmptyText(_)));

    // Terminators with no words around them fragment into nothing
    let err = ctx.service.narrate(ctx.request("...")).await.unwrap_err();
    assert!(matches!(err, NarrationError::EmptyText(_)));

    assert!(!ctx.output_path().exists());
}

#[tokio::test]
async fn it_should_validate_voice_samples_before_synthesizing() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    let mut request = ctx.request(CHAPTER);
    request.voice_samples.clear();
    let err = ctx.service.narrate(request).await.unwrap_err();
    assert!(matches!(err, NarrationError::NoVoiceSamples));

    let mut request = ctx.request(CHAPTER);
    request.voice_samples = vec![ctx.dir.path().join("ghost.wav")];
    let err = ctx.service.narrate(request).await.unwrap_err();
    assert!(matches!(err, NarrationError::VoiceSampleNotFound(_)));
}

#[tokio::test]
async fn it_should_detect_the_language_when_none_is_given() {
    let ctx = TestContext::new(Arc::new(MockEngine::default()));

    let mut request = ctx.request(
        "The quick brown fox jumps over the lazy dog. \
         It was the best of times, it was the worst of times.",
    );
    request.language = None;

    let report = ctx.service.narrate(request).await.unwrap();
    assert_eq!(report.language, LanguageCode::English);
}
