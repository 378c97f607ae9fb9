//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! `RUST_LOG` takes precedence when set; otherwise the level comes from the
//! command line and applies to this crate, with dependencies held at `warn`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// Single-line output.
    #[default]
    Compact,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
    /// Ignore `RUST_LOG` because the level was asked for explicitly.
    pub ignore_env: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::default(),
            ignore_env: false,
        }
    }
}

/// Installs the global subscriber writing to stderr.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config.level, config.ignore_env);
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };

    if let Err(error) = result {
        eprintln!("Failed to install logger: {}", error);
    }
}

fn build_env_filter(level: LevelFilter, ignore_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level));
    if ignore_env {
        return fallback();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("warn,hn_search={level}")
}
