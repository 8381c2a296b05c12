use serde::{Deserialize, Serialize};
use url::Url;

/// Title used when a page or section has no usable heading
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// A question/answer pair taken from a FAQ region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Structured content extracted from one page or section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL the record was extracted from
    pub url: String,

    /// First heading, document title, or [`UNTITLED_SECTION`]
    pub title: String,

    /// Paragraph text of the main region, space-joined
    pub content: String,

    /// Trimmed text of every `pre` block, in document order
    pub code_examples: Vec<String>,

    /// Present only when a FAQ region yielded at least one pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<Vec<FaqEntry>>,
}

/// Records of one crawl, in visit order
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    entries: Vec<(Url, PageRecord)>,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: Url, record: PageRecord) {
        self.entries.push((url, record));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &PageRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    /// Distinct page URLs, in first-visit order
    pub fn urls(&self) -> Vec<&Url> {
        let mut urls: Vec<&Url> = Vec::new();
        for (url, _) in &self.entries {
            if urls.last() != Some(&url) {
                urls.push(url);
            }
        }
        urls
    }
}
