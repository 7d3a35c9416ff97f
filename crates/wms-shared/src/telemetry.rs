//! Telemetry setup

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LogSettings};
use crate::error::AppError;

/// Install the global subscriber: stdout (pretty or JSON) plus an optional
/// daily-rotated file under `settings.directory`.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_telemetry(settings: &LogSettings) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .map_err(|e| AppError::TelemetryError(e.to_string()))?,
    };

    let file_appender = match &settings.directory {
        Some(dir) => Some(
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("wms")
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| AppError::TelemetryError(e.to_string()))?,
        ),
        None => None,
    };

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true),
            )
            .with(file_appender.map(|appender| {
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_target(true)
                    .with_level(true)
            }))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false),
            )
            .with(file_appender.map(|appender| {
                fmt::layer()
                    .with_writer(appender)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(false) // No colors in file
            }))
            .try_init(),
    };

    result.map_err(|e| AppError::TelemetryError(e.to_string()))?;
    tracing::debug!("Telemetry initialized ({:?}, file logging: {})", settings.format, settings.directory.is_some());
    Ok(())
}
