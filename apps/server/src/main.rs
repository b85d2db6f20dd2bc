//! RegBridge server binary
//!
//! Loads `.env`, sets up logging and runs the gateway until Ctrl-C.

use anyhow::Context as _;
use regbridge_core::branding;
use regbridge_gateway::{GatewayConfig, GatewayServer};
use tracing::info;

/// Get the logs directory path (under the platform data directory)
fn get_logs_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(branding::LOG_PREFIX)
        .join("logs")
}

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact format
/// - File: daily rotation in ~/.local/share/regbridge/logs/ (Linux)
///   or %LOCALAPPDATA%/regbridge/logs/ (Windows)
///
/// Returns `None` for the guard when the file appender cannot be created;
/// console logging still works in that case.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // RUST_LOG takes precedence
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,regbridge=debug,regbridge_core=debug,regbridge_gateway=debug")
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let logs_dir = get_logs_dir();
    let file_appender = std::fs::create_dir_all(&logs_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            // Creates files like: regbridge.2026-01-22.log
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(branding::LOG_PREFIX)
                .filename_suffix("log")
                .build(&logs_dir)
                .map_err(|e| e.to_string())
        });

    match file_appender {
        Ok(appender) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);

            // File layer: no colors, include more detail
            let file_layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();

            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();

            tracing::warn!("File logging disabled ({}): {}", logs_dir.display(), e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    // Guard must stay alive for the duration of the program
    let _guard = init_tracing();

    info!(
        "{} v{} starting",
        branding::DISPLAY_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let config = GatewayConfig::from_env().context("Failed to load gateway configuration")?;
    info!("Gateway will listen on {}", config.base_url());

    let server = GatewayServer::new(config).context("Failed to initialize gateway")?;
    server.run().await.context("Gateway server failed")?;

    Ok(())
}
