use crate::helpers;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use helpers::xtts_server::{spawn_broken_xtts_server, spawn_xtts_server, wav_bytes};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use voicetape::domain::narration::{LanguageCode, NarrationError, NarrationServiceApi, VoiceProfile};
use voicetape::infrastructure::audio;
use voicetape::infrastructure::engine::{EngineError, SynthesisEngine, XttsServerEngine};

#[tokio::test]
async fn it_should_post_the_fragment_to_the_synthesis_route() {
    let (url, captured, shutdown) = spawn_xtts_server(wav_bytes(500)).await;
    let engine = XttsServerEngine::new(&url, Duration::from_secs(5)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let clip_path = dir.path().join("fragment_1.wav");
    let voice = VoiceProfile {
        sample_paths: vec![PathBuf::from("/voices/narrator.wav")],
        language: LanguageCode::Portuguese,
    };

    engine.ready().await.unwrap();
    engine
        .synthesize("Olá mundo,", &voice, &clip_path)
        .await
        .unwrap();

    {
        let requests = captured.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["text"], "Olá mundo,");
        assert_eq!(requests[0]["language"], "pt");
        assert_eq!(requests[0]["speaker_wav"][0], "/voices/narrator.wav");
    }

    let clip = audio::read_wav(&clip_path).unwrap();
    assert_eq!(clip.duration(), Duration::from_millis(500));

    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn it_should_narrate_through_a_live_synthesis_server() {
    let (url, captured, shutdown) = spawn_xtts_server(wav_bytes(600)).await;
    let engine = Arc::new(XttsServerEngine::new(&url, Duration::from_secs(5)).unwrap());
    let ctx = TestContext::new(engine);

    let report = ctx
        .service
        .narrate(ctx.request("Hello out there. Anyone home?"))
        .await
        .unwrap();

    assert_eq!(report.fragments_total, 2);
    assert_eq!(captured.lock().len(), 2);

    // Two 600ms clips joined over one 250ms seam
    let output = audio::read_wav(&ctx.output_path()).unwrap();
    assert_eq!(output.frames(), 950 * output.sample_rate as usize / 1000);

    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn it_should_surface_server_errors_with_status_and_body() {
    let (url, shutdown) = spawn_broken_xtts_server().await;
    let engine = XttsServerEngine::new(&url, Duration::from_secs(5)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let voice = VoiceProfile {
        sample_paths: vec![PathBuf::from("/voices/narrator.wav")],
        language: LanguageCode::English,
    };

    let err = engine
        .synthesize("Hello.", &voice, &dir.path().join("clip.wav"))
        .await
        .unwrap_err();

    match err {
        EngineError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("model exploded"));
        }
        other => panic!("expected a status error, got {other}"),
    }

    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn it_should_fail_the_run_up_front_when_the_server_is_down() {
    // Bind a port, then free it, so nothing answers there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let engine = Arc::new(XttsServerEngine::new(&url, Duration::from_secs(2)).unwrap());
    let ctx = TestContext::new(engine);

    let err = ctx
        .service
        .narrate(ctx.request("Hello out there. Anyone home?"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NarrationError::Engine(EngineError::Unreachable { .. })
    ));
    // The probe fails the run before a single fragment is attempted
    assert!(ctx.reporter.events().is_empty());
}
