//! Structured logging for the Cairn tools.
//!
//! Console output goes through a `tracing-subscriber` fmt layer; debug builds
//! can additionally write one JSON object per event to `cairn.log`. Records
//! emitted through the `log` facade (the config crate) are forwarded into the
//! same subscriber.

use std::path::{Path, PathBuf};

use cairn_config::Config;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,cairn_mesh=info";
const LOG_FILE: &str = "cairn.log";

type JsonFileLayer<S> = fmt::Layer<S, JsonFields, Format<Json, Uptime>, std::fs::File>;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured `debug.log_level`. When
/// `debug_build` is set and `log_dir` can be created, events are also written
/// as JSON to `<log_dir>/cairn.log`; if the file cannot be opened, logging
/// continues on the console only.
///
/// # Examples
///
/// ```no_run
/// use cairn_config::Config;
/// use cairn_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Ok(file_layer) = json_file_layer(log_dir)
    {
        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default directives.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}

/// Filter directives from the config's log level, or the default ones.
fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// JSON layer writing to a freshly truncated `cairn.log` in `log_dir`.
fn json_file_layer<S>(log_dir: &Path) -> std::io::Result<JsonFileLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(log_dir)?;
    let log_file = std::fs::File::create(log_file_path(log_dir))?;
    Ok(fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json())
}
