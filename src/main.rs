// src/main.rs
mod app;
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_command};
use olympic_teletext::config::Config;
use olympic_teletext::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config commands edit or print the file and exit before anything else touches it
    if is_config_command(&args) {
        if args.list_config {
            return commands::handle_list_config_command().await;
        }
        return commands::handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;
    let date = commands::resolve_date(&args)?;

    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");
    tracing::debug!("Using feed {} (column {})", config.api_domain, config.column_id);

    let result = app::run_interactive(&args, &config, date).await;
    if let Err(e) = &result {
        tracing::error!("Exiting with error: {e}");
    }
    result
}
