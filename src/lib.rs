//! Hacker News search client: per-query result cache, table sorting and the
//! search session that ties them to a background fetcher.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod hn_client;
pub mod loader;
pub mod logging;
pub mod models;
pub mod session;
pub mod sort;

pub use cache::{CacheEntry, ResultCache};
pub use error::FetchError;
pub use hn_client::{HackerNewsClient, PageFetcher};
pub use models::{HackerNewsItem, Page};
pub use session::{FetchRequest, SearchSession};
pub use sort::{apply_display_order, sort, toggle_sort, SortMode, SortState};
