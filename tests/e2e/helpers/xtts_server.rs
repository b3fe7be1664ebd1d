use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use warp::Filter;

use super::engine_mocks::MOCK_SAMPLE_RATE;

/// Request bodies the mock server has accepted, in arrival order
pub type CapturedRequests = Arc<Mutex<Vec<serde_json::Value>>>;

/// Serve `response` for every POST to /api/tts, capturing request bodies.
/// GET on the root answers 200 so reachability probes pass.
pub async fn spawn_xtts_server(response: Vec<u8>) -> (String, CapturedRequests, mpsc::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));

    let seen = captured.clone();
    let tts = warp::post()
        .and(warp::path("api").and(warp::path("tts")))
        .and(warp::body::json())
        .map(move |body: serde_json::Value| {
            seen.lock().push(body);
            warp::reply::Response::new(response.clone().into())
        });
    let root = warp::get().map(|| "XTTS");

    let (addr, server) = warp::serve(tts.or(root)).bind_with_graceful_shutdown(
        ([127, 0, 0, 1], 0),
        async move {
            shutdown_rx.recv().await;
        },
    );
    tokio::spawn(server);
    (format!("http://{}", addr), captured, shutdown_tx)
}

/// Serve a 500 with a plain-text body for every POST to /api/tts
pub async fn spawn_broken_xtts_server() -> (String, mpsc::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let tts = warp::post()
        .and(warp::path("api").and(warp::path("tts")))
        .map(|| {
            warp::reply::with_status(
                "model exploded",
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            )
        });
    let root = warp::get().map(|| "XTTS");

    let (addr, server) = warp::serve(tts.or(root)).bind_with_graceful_shutdown(
        ([127, 0, 0, 1], 0),
        async move {
            shutdown_rx.recv().await;
        },
    );
    tokio::spawn(server);
    (format!("http://{}", addr), shutdown_tx)
}

/// Valid 16-bit mono WAV bytes of the given length, for mock responses
pub fn wav_bytes(duration_ms: u64) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: MOCK_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).expect("Failed to start the wav");
        for i in 0..(duration_ms * u64::from(MOCK_SAMPLE_RATE) / 1000) {
            writer
                .write_sample(((i % 64) as i16 - 32) * 100)
                .expect("Failed to write a sample");
        }
        writer.finalize().expect("Failed to finalize the wav");
    }
    cursor.into_inner()
}
