use std::collections::HashMap;

use crate::models::{HackerNewsItem, Page};

/// Hits accumulated for a single search key, oldest page first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub items: Vec<HackerNewsItem>,
    pub last_page: u32,
}

static EMPTY_ENTRY: CacheEntry = CacheEntry {
    items: Vec::new(),
    last_page: 0,
};

/// Per-search-key result cache.
///
/// Every operation leaves `self` untouched and hands back the next cache
/// value; whoever owns "the current cache" swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `page.hits` after whatever is already cached for `key` and
    /// records `page.index` as the last page seen.
    ///
    /// No deduplication: merging the same page twice keeps both copies.
    pub fn merge(&self, key: &str, page: Page) -> ResultCache {
        let mut next = self.clone();
        let entry = next.entries.entry(key.to_string()).or_default();
        entry.items.extend(page.hits);
        entry.last_page = page.index;
        next
    }

    /// Drops the first item under `key` whose id is `item_id`.
    ///
    /// Unknown keys and unknown ids leave the cache as it was.
    pub fn remove(&self, key: &str, item_id: &str) -> ResultCache {
        let Some(position) = self
            .entries
            .get(key)
            .and_then(|entry| entry.items.iter().position(|item| item.id == item_id))
        else {
            return self.clone();
        };

        let mut next = self.clone();
        if let Some(entry) = next.entries.get_mut(key) {
            entry.items.remove(position);
        }
        next
    }

    /// Entry for `key`, or an empty entry (no items, page 0) if nothing was
    /// merged under it yet.
    pub fn get(&self, key: &str) -> &CacheEntry {
        self.entries.get(key).unwrap_or(&EMPTY_ENTRY)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
