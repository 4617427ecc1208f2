//! Subscriber setup. Core and adapters only emit; this is the one place
//! anything gets installed.
//!
//! Without `RUST_LOG` the level comes from the flags: warn by default, one
//! step louder per `-v`, and error-only under `--quiet`. Setting
//! `logging.directory` adds a daily-rotated plain-text file next to stderr.

use std::io::IsTerminal as _;
use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "forge";
const CRATES: [&str; 4] = ["forge", "forge_core", "forge_adapters", "tower_http"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking file writer alive; drop it last.
#[must_use]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. A second call fails.
pub fn init_logging(args: &GlobalArgs, config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let level = derive_level(args);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let mut layers: Vec<BoxedLayer> = vec![stderr_layer(args)];

    let file_guard = match &config.directory {
        Some(dir) => {
            let (layer, guard) = file_layer(dir)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(LoggingGuard { _file: file_guard })
}

fn stderr_layer(args: &GlobalArgs) -> BoxedLayer {
    if args.output_format == OutputFormat::Json {
        return tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed();
    }

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .boxed()
}

fn file_layer(dir: &Path) -> anyhow::Result<(BoxedLayer, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| anyhow::anyhow!("Cannot log to '{}': {e}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .boxed();
    Ok((layer, guard))
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
