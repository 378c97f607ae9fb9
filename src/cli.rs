//! Command line arguments.

use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_HITS_PER_PAGE, DEFAULT_TIMEOUT_SECS};
use crate::logging::{LogConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "hn_search",
    version,
    about = "Search Hacker News stories from a native window"
)]
pub struct Cli {
    /// Query to run on launch (defaults to the last search, then "redux").
    #[arg(long, value_name = "TERMS")]
    pub query: Option<String>,

    /// Number of hits requested per page.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HITS_PER_PAGE)]
    pub hits_per_page: u32,

    /// Base path of the search API.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout for a single page request.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::default()
            .with_base_url(self.base_url.as_str())
            .with_hits_per_page(self.hits_per_page)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.verbosity.tracing_level_filter(),
            format: self.log_format,
            ignore_env: self.verbosity.is_present(),
        }
    }
}
