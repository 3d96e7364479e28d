//! Logging Infrastructure
//!
//! Console output plus optional daily rotating files:
//! - `<log_dir>/app/app.<date>`: everything except security events
//! - `<log_dir>/security/security.<date>`: `target: "security"` only

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const SECURITY_TARGET: &str = "security";

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Default filter when `RUST_LOG` is unset (e.g. "info", "debug")
/// * `json_format` - JSON lines (production) instead of pretty output
/// * `log_dir` - Optional directory for rolling log files
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// cafe_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + files)
/// cafe_server::init_logger_with_file("info", true, Some("./data/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            let app_log_dir = log_dir.join("app");
            let security_log_dir = log_dir.join("security");
            fs::create_dir_all(&app_log_dir)?;
            fs::create_dir_all(&security_log_dir)?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let app_layer = fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(Mutex::new(app_log))
                .with_filter(filter_fn(|meta| meta.target() != SECURITY_TARGET))
                .boxed();

            // Security events are kept apart for review
            let security_log =
                RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
            let security_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(security_log))
                .with_filter(filter_fn(|meta| meta.target() == SECURITY_TARGET))
                .boxed();

            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}
