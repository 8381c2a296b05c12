pub mod extract;
pub mod html;

#[cfg(test)]
mod tests;

pub use extract::ContentExtractor;

use crate::config::{CrawlConfig, ExtractionMode, LinkDiscovery};
use crate::results::PageRecord;
use scraper::Html;
use url::Url;

/// Result of parsing one rendered page
pub struct ParseResult {
    /// Records extracted from the page, in document order
    pub records: Vec<PageRecord>,
    /// Raw `href` values of outgoing links, in document order
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given records and links
    pub fn new(records: Vec<PageRecord>, links: Vec<String>) -> Self {
        Self { records, links }
    }

    /// Creates a parse result without link discovery
    pub fn records_only(records: Vec<PageRecord>) -> Self {
        Self {
            records,
            links: Vec::new(),
        }
    }
}

/// Parses rendered markup once and runs both extraction and link discovery on it
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    extractor: ContentExtractor,
    discovery: LinkDiscovery,
}

impl Parser {
    pub fn new(extraction: ExtractionMode, discovery: LinkDiscovery) -> Self {
        Self {
            extractor: ContentExtractor::new(extraction),
            discovery,
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.extraction, config.link_discovery)
    }

    /// Extract records and discover links
    pub fn parse(&self, markup: &str, url: &Url) -> ParseResult {
        let doc = Html::parse_document(markup);
        let records = self.extractor.extract(&doc, url);
        let links = html::discover_links(&doc, self.discovery);

        ::log::debug!(
            "Parsed {}: {} record(s), {} link(s)",
            url,
            records.len(),
            links.len()
        );

        ParseResult::new(records, links)
    }

    /// Extract a single page-level record, ignoring links and section splitting
    pub fn parse_single(&self, markup: &str, url: &Url) -> ParseResult {
        let doc = Html::parse_document(markup);
        ParseResult::records_only(vec![extract::extract_page(&doc, url.as_str())])
    }
}
