use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::field::MakeExt;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use ua_config::{LogFormat, LoggingConfig};

/// Build the level filter. `RUST_LOG` wins over the config when set.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    let directives = config.filter_directives();
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))
}

/// Resolve `config.file` against `base_dir` when it is relative.
pub fn resolve_log_path(config: &LoggingConfig, base_dir: &Path) -> Option<PathBuf> {
    config.file.as_ref().map(|file| {
        if file.is_relative() {
            base_dir.join(file)
        } else {
            file.clone()
        }
    })
}

/// Initialise the `tracing` subscriber stack from [`LoggingConfig`].
///
/// `plain` renders compact single-line events (the `domain` field set by the
/// `ua_*!` macros appears with the other fields); `json` emits one JSON
/// object per event. Both go to stderr and, when `file` is set, to that file.
///
/// Returns an optional [`WorkerGuard`] that **must** be held until the process
/// exits; dropping it flushes and closes the non-blocking file writer.
///
/// `log` records emitted by `ua-core` reach the subscriber through
/// `tracing-subscriber`'s default `tracing-log` bridge.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;
    let is_json = config.format == LogFormat::Json;

    let stderr_layer = if is_json {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let mut guard = None;
    let file_layer = match resolve_log_path(config, base_dir) {
        Some(path) => {
            let dir = path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("log file path has no parent directory"))?;
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log file path has no file name"))?;
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
            guard = Some(file_guard);

            let layer = if is_json {
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .boxed()
            } else {
                // A field formatter of its own keeps this layer's cached span
                // fields apart from the (possibly ANSI-styled) stderr ones.
                let fields = fmt::format::debug_fn(|writer, field, value| {
                    if field.name() == "message" {
                        write!(writer, "{value:?}")
                    } else {
                        write!(writer, "{field}={value:?}")
                    }
                })
                .delimited(" ");
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(false)
                    .fmt_fields(fields)
                    .with_writer(non_blocking)
                    .boxed()
            };
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer.and_then(file_layer).with_filter(filter))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))?;

    Ok(guard)
}
