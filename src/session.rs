//! Search controller state: what the user typed, what was last submitted,
//! the accumulated results and the status of the last fetch.
//!
//! Nothing in here does I/O. Methods that need the network return a
//! [`FetchRequest`] for the caller to run, and the result is handed back
//! through [`SearchSession::complete`].

use tracing::{debug, warn};

use crate::cache::{CacheEntry, ResultCache};
use crate::error::Result;
use crate::models::{HackerNewsItem, Page};
use crate::sort::{apply_display_order, SortState};

/// A page the session wants fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: String,
    pub page: u32,
}

impl FetchRequest {
    pub fn new(key: impl Into<String>, page: u32) -> Self {
        Self {
            key: key.into(),
            page,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// Live contents of the search box.
    pub search_term: String,
    search_key: String,
    cache: ResultCache,
    error: Option<String>,
    is_loading: bool,
}

impl SearchSession {
    pub fn new(initial_term: impl Into<String>) -> Self {
        Self {
            search_term: initial_term.into(),
            ..Self::default()
        }
    }

    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn needs_to_search(&self, term: &str) -> bool {
        !self.cache.contains_key(term)
    }

    /// Makes the search box contents the active key.
    ///
    /// Only asks for page 0 when that key has never been fetched; otherwise the
    /// cached results are shown as they are. Clears any previous fetch error.
    /// A new search supersedes a fetch that is still in flight.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let term = self.search_term.trim().to_string();
        if term.is_empty() {
            return None;
        }

        self.search_key = term.clone();
        self.error = None;
        if !self.needs_to_search(&term) {
            debug!(key = %term, "serving search from cache");
            return None;
        }
        self.is_loading = true;
        Some(FetchRequest::new(term, 0))
    }

    /// Asks for the page after the last one received for the active key.
    /// Does nothing while another fetch is in flight.
    pub fn request_more(&mut self) -> Option<FetchRequest> {
        if self.search_key.is_empty() {
            return None;
        }
        if self.is_loading {
            debug!(key = %self.search_key, "fetch already in flight");
            return None;
        }
        let next_page = if self.cache.contains_key(&self.search_key) {
            self.cache.get(&self.search_key).last_page + 1
        } else {
            0
        };
        self.is_loading = true;
        Some(FetchRequest::new(self.search_key.clone(), next_page))
    }

    /// Applies a finished fetch.
    ///
    /// Pages are merged under the key they were requested for, even when the
    /// user has moved on to another search since. A failure only records the
    /// error and leaves the cache as it was.
    pub fn complete(&mut self, request: &FetchRequest, result: Result<Page>) {
        self.is_loading = false;
        match result {
            Ok(page) => {
                self.cache = self.cache.merge(&request.key, page);
                self.error = None;
            }
            Err(error) => {
                warn!(key = %request.key, page = request.page, %error, "keeping cached results after failed fetch");
                self.error = Some(error.to_string());
            }
        }
    }

    /// Hides a row from the active results.
    pub fn dismiss(&mut self, item_id: &str) {
        self.cache = self.cache.remove(&self.search_key, item_id);
    }

    pub fn current_entry(&self) -> &CacheEntry {
        self.cache.get(&self.search_key)
    }

    pub fn current_page(&self) -> u32 {
        self.current_entry().last_page
    }

    pub fn visible_items(&self, sort_state: SortState) -> Vec<HackerNewsItem> {
        apply_display_order(&self.current_entry().items, sort_state)
    }
}
