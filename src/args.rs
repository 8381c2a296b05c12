use clap::Parser;
use doc_scrape::config::{ExtractionMode, LinkDiscovery, LinkResolution};
use doc_scrape::{CrawlConfig, OutputMode, Result, ScopeMode};
use std::path::PathBuf;

/// Single-dash long flags accepted for compatibility with older invocations
const LEGACY_FLAGS: &[&str] = &["-all", "-csection", "-solo"];

#[derive(Parser, Debug)]
#[command(name = "doc-scrape")]
#[command(about = "Suck down documentation from a base URL")]
#[command(version)]
pub struct Args {
    /// The base URL of the documentation site to scrape
    pub base_url: String,

    /// Scrape all pages on the site, not just those under /docs
    #[arg(long)]
    pub all: bool,

    /// Save each documentation section into its own file
    #[arg(long)]
    pub csection: bool,

    /// Scrape only the provided URL and then stop
    #[arg(long)]
    pub solo: bool,

    /// Split pages into one record per section/chapter container
    #[arg(long)]
    pub sections: bool,

    /// Follow only links found in navigation, menu or sidebar containers
    #[arg(long)]
    pub nav_only: bool,

    /// Resolve relative links against the page they appear on instead of the base URL
    #[arg(long)]
    pub page_relative: bool,

    /// Treat URLs that differ only by #fragment as the same page
    #[arg(long)]
    pub strip_fragments: bool,

    /// Regex for URLs that are never followed (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Directory the JSON files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON crawl configuration file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File of KEY=VALUE lines loaded into the environment (default: ./.env if present)
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

impl Args {
    /// Build the crawl configuration from the config file (if any) and flags
    pub fn to_config(&self) -> Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?.with_start_url(&self.base_url),
            None => CrawlConfig::new(&self.base_url),
        };

        if self.all {
            config.scope = ScopeMode::Unrestricted;
        }
        // Solo takes precedence over per-section output
        if self.solo {
            config.output = OutputMode::Solo;
        } else if self.csection {
            config.output = OutputMode::SplitPerSection;
        }
        if self.sections {
            config.extraction = ExtractionMode::Sections;
        }
        if self.nav_only {
            config.link_discovery = LinkDiscovery::Navigation;
        }
        if self.page_relative {
            config.link_resolution = LinkResolution::AgainstPage;
        }
        if self.strip_fragments {
            config.strip_fragments = true;
        }
        config.exclude_patterns.extend(self.exclude.iter().cloned());
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }

        Ok(config)
    }
}

/// Rewrite `-all`, `-csection` and `-solo` to their double-dash forms
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if LEGACY_FLAGS.contains(&arg.as_str()) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
