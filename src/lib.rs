//! Crawls a documentation site through a headless browser and extracts
//! each in-scope page into a structured JSON record.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod output;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, OutputMode, RendererConfig, ScopeMode};
pub use crawlers::{Renderer, WebDriverRenderer};
pub use error::{CrawlError, Result};
pub use filter::ScopeFilter;
pub use parsers::{ContentExtractor, Parser};
pub use results::{CrawlResult, FaqEntry, PageRecord};

use std::path::PathBuf;

/// Runs one crawl as configured and writes its output
///
/// Returns the files written. Render failures never surface here; only
/// configuration and output errors do.
pub async fn run<R: Renderer>(config: &CrawlConfig, renderer: &mut R) -> Result<Vec<PathBuf>> {
    let start_url = config.base_url()?;
    let parser = Parser::from_config(config);

    let result = match config.output {
        OutputMode::Solo => crawlers::crawl_solo(&start_url, renderer, &parser).await,
        OutputMode::Combined | OutputMode::SplitPerSection => {
            let filter = ScopeFilter::from_config(config)?;
            crawlers::crawl(&start_url, renderer, &parser, &filter).await
        }
    };

    output::write_output(config, &result)
}
