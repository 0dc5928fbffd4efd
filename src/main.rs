mod app;
mod config;
mod domain;
mod error;
mod infrastructure;
mod practicum;
mod tasks;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let logging_config = config::load_logging_config();
    let logs_dir = directories::ensure_log_dir(&logging_config.logs_dir)?;
    logging::init_tracing(&logging_config, &logs_dir)?;

    let config = config::load_config().inspect_err(|err| {
        tracing::error!(error = %err, "configuration is incomplete, stopping");
    })?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::HomeworkBotApp::initialize(config, shutdown)?;
    app.run().await
}
