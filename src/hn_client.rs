use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::models::Page;

const PATH_SEARCH: &str = "/search";
const PARAM_SEARCH: &str = "query=";
const PARAM_PAGE: &str = "page=";
const PARAM_HPP: &str = "hitsPerPage=";

/// Anything that can produce one page of search results.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, search_term: &str, page: u32) -> Result<Page>;
}

/// Blocking client for the HN search API.
#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
    hits_per_page: u32,
}

impl HackerNewsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            hits_per_page: config.hits_per_page,
        })
    }

    pub fn search_url(&self, search_term: &str, page: u32) -> String {
        build_search_url(&self.base_url, search_term, page, self.hits_per_page)
    }
}

impl PageFetcher for HackerNewsClient {
    fn fetch_page(&self, search_term: &str, page: u32) -> Result<Page> {
        let url = self.search_url(search_term, page);
        debug!(%url, "requesting search page");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "search api rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let page: Page = serde_json::from_str(&body)?;
        debug!(term = search_term, page = page.index, hits = page.hits.len(), "decoded search page");
        Ok(page)
    }
}

/// `{base}/search?query=..&page=..&hitsPerPage=..` with the term percent-encoded.
pub fn build_search_url(base_url: &str, search_term: &str, page: u32, hits_per_page: u32) -> String {
    format!(
        "{base_url}{PATH_SEARCH}?{PARAM_SEARCH}{}&{PARAM_PAGE}{page}&{PARAM_HPP}{hits_per_page}",
        urlencoding::encode(search_term)
    )
}
