//! Terminal client entry point.
//!
//! Loads configuration from the environment (and `.env`), routes logs to a
//! per-session file, then runs a line-based REPL against the runtime.
mod app;
mod command;
mod config;
mod dirs;
mod logging;
mod render;

use anyhow::Result;
use app::App;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(&config)?;

    App::start(config).await?.run().await
}
