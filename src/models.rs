use serde::{Deserialize, Serialize};

/// A single search hit as returned by the HN search API.
///
/// Only `id` is required. Every display field may be `null` or missing in the
/// payload (comments and polls have no url, deleted stories have no title), in
/// which case it is `None` and sorts before any present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackerNewsItem {
    #[serde(rename = "objectID")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "num_comments", default)]
    pub comments_count: Option<u32>,
    #[serde(default)]
    pub points: Option<u32>,
}

impl HackerNewsItem {
    /// Builds an item with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            author: None,
            url: None,
            comments_count: None,
            points: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_comments(mut self, count: u32) -> Self {
        self.comments_count = Some(count);
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

/// One batch of hits plus the page index it was served as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub hits: Vec<HackerNewsItem>,
    #[serde(rename = "page")]
    pub index: u32,
}

impl Page {
    pub fn new(index: u32, hits: Vec<HackerNewsItem>) -> Self {
        Self { hits, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_payload_and_ignores_extra_fields() {
        let json = r#"{
            "hits": [
                {
                    "objectID": "16582136",
                    "title": "Redux is dead",
                    "author": "pg",
                    "url": "https://example.com/redux",
                    "num_comments": 42,
                    "points": 310,
                    "created_at": "2018-03-14T10:00:00.000Z",
                    "_tags": ["story"]
                },
                {
                    "objectID": "16582137",
                    "title": null,
                    "author": "dang",
                    "url": null,
                    "num_comments": null
                }
            ],
            "page": 2,
            "nbHits": 1234,
            "nbPages": 13,
            "hitsPerPage": 100
        }"#;

        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.index, 2);
        assert_eq!(page.hits.len(), 2);

        let first = &page.hits[0];
        assert_eq!(first.id, "16582136");
        assert_eq!(first.display_title(), "Redux is dead");
        assert_eq!(first.comments_count, Some(42));
        assert_eq!(first.points, Some(310));

        let second = &page.hits[1];
        assert_eq!(second.title, None);
        assert_eq!(second.url, None);
        assert_eq!(second.comments_count, None);
        assert_eq!(second.points, None);
        assert_eq!(second.display_title(), "");
    }

    #[test]
    fn rejects_hit_without_identifier() {
        let json = r#"{ "hits": [ { "title": "orphan" } ], "page": 0 }"#;
        assert!(serde_json::from_str::<Page>(json).is_err());
    }
}
