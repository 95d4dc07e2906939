use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use eventify_core::RecordStore;
use eventify_server::App;
use tracing_subscriber::EnvFilter;

/// Bind address, `host:port`.
const BIND_ENV: &str = "EVENTIFY_BIND";
/// Directory for the JSON collections.
const DATA_DIR_ENV: &str = "EVENTIFY_DATA_DIR";
/// Listener worker thread count.
const WORKERS_ENV: &str = "EVENTIFY_WORKERS";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_WORKERS: usize = 4;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let bind = std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let data_dir = data_dir_from_env();
    let workers = workers_from_env();

    let store = RecordStore::new(data_dir.clone())?;
    let app = Arc::new(App::new(store));
    let server =
        tiny_http::Server::http(&bind).map_err(|e| format!("failed to bind {bind}: {e}"))?;

    tracing::info!(
        "listening on http://{bind} (data dir {}, {workers} workers)",
        data_dir.display()
    );
    eventify_server::serve(Arc::new(server), app, workers);
    Ok(())
}

fn data_dir_from_env() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("eventify"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn workers_from_env() -> usize {
    std::env::var(WORKERS_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_WORKERS)
}
