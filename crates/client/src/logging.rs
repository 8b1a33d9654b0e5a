//! File logging so the REPL's stdout stays clean.
use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hanoi_runtime::{Clock, SystemClock};

use crate::config::ClientConfig;

/// Install a file-only subscriber under `<log_dir>/<session_id>/client.log`.
pub fn setup_logging(config: &ClientConfig) -> Result<()> {
    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session_{}", SystemClock.now().as_millis() / 1000));

    let session_log_dir = config.log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the background writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!(session = %session_id, "Logging initialized");
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(())
}
