use crate::config::{CrawlConfig, ExtractionMode, LinkDiscovery};
use crate::parsers::Parser;
use url::Url;

const PAGE: &str = r#"<html>
  <head><title>Ex Docs</title></head>
  <body>
    <nav class="menu"><a href="/docs/next">Next</a></nav>
    <div role="main">
      <h1>Getting started</h1>
      <p>Install the tool.</p>
      <section><h2>Usage</h2><p>Run it.</p><pre>ex run</pre></section>
    </div>
    <a href="/blog">Blog</a>
  </body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_record_and_links() {
        let url = Url::parse("https://ex.com/docs").unwrap();
        let result = Parser::default().parse(PAGE, &url);

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.url, "https://ex.com/docs");
        assert_eq!(record.title, "Getting started");
        assert_eq!(record.content, "Install the tool. Run it.");
        assert_eq!(record.code_examples, vec!["ex run"]);
        assert!(record.faq.is_none());
        assert_eq!(result.links, vec!["/docs/next", "/blog"]);
    }

    #[test]
    fn test_parse_with_sections_and_navigation() {
        let url = Url::parse("https://ex.com/docs").unwrap();
        let parser = Parser::new(ExtractionMode::Sections, LinkDiscovery::Navigation);
        let result = parser.parse(PAGE, &url);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].title, "Usage");
        assert_eq!(result.records[0].content, "Run it.");
        assert_eq!(result.links, vec!["/docs/next"]);
    }

    #[test]
    fn test_parse_single_ignores_links_and_sections() {
        let mut config = CrawlConfig::new("https://ex.com/docs");
        config.extraction = ExtractionMode::Sections;
        let url = config.base_url().unwrap();
        let result = Parser::from_config(&config).parse_single(PAGE, &url);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].title, "Getting started");
        assert!(result.links.is_empty());
    }
}
