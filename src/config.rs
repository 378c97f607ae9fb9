use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";
pub const DEFAULT_QUERY: &str = "redux";
pub const DEFAULT_HITS_PER_PAGE: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Storage key the last submitted search is persisted under.
pub const LAST_SEARCH_STORAGE_KEY: &str = "last_search_key";

/// Runtime settings for the search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base path of the search API, without trailing slash.
    pub base_url: String,
    /// Query run on launch when nothing else was asked for.
    pub default_query: String,
    pub hits_per_page: u32,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = query.into();
        self
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Picks the query to start with: an explicit one wins, then the last
    /// search from a previous run, then the configured default.
    pub fn initial_query(&self, explicit: Option<&str>, persisted: Option<&str>) -> String {
        explicit
            .or(persisted)
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .unwrap_or(&self.default_query)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_search_api() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://hn.algolia.com/api/v1");
        assert_eq!(config.default_query, "redux");
        assert_eq!(config.hits_per_page, 100);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        let config = Config::default().with_base_url("http://localhost:8080/api/");
        assert_eq!(config.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn hits_per_page_is_at_least_one() {
        assert_eq!(Config::default().with_hits_per_page(0).hits_per_page, 1);
    }

    #[test]
    fn initial_query_precedence() {
        let config = Config::default();
        assert_eq!(config.initial_query(Some("rust"), Some("react")), "rust");
        assert_eq!(config.initial_query(None, Some("react")), "react");
        assert_eq!(config.initial_query(None, None), "redux");
        assert_eq!(config.initial_query(None, Some("   ")), "redux");
    }
}
