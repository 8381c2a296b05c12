use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Which discovered links are eligible for traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// Only paths containing `/docs`, plus the base page itself
    #[default]
    RestrictedToDocsPath,
    /// Any page on the base origin
    Unrestricted,
}

/// How the crawl result is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One document holding every record in visit order
    #[default]
    Combined,
    /// One file per record
    SplitPerSection,
    /// Render and extract the base page only, no link following
    Solo,
}

/// Whether a page yields one record or one record per section container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    #[default]
    Page,
    Sections,
}

/// Where outgoing links are collected from on a rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkDiscovery {
    /// Every `a[href]` in the document
    #[default]
    Document,
    /// Anchors with text inside navigation/menu/sidebar containers,
    /// falling back to the whole document when none exist
    Navigation,
}

/// What relative links are joined against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkResolution {
    /// The crawl's base URL, whatever page the link was found on
    #[default]
    AgainstBase,
    /// The page the link was found on
    AgainstPage,
}

/// Immutable configuration for a single crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from, without a trailing slash
    pub start_url: String,

    #[serde(default)]
    pub scope: ScopeMode,

    #[serde(default)]
    pub output: OutputMode,

    #[serde(default)]
    pub extraction: ExtractionMode,

    #[serde(default)]
    pub link_discovery: LinkDiscovery,

    #[serde(default)]
    pub link_resolution: LinkResolution,

    /// Drop `#fragment` before de-duplication
    #[serde(default)]
    pub strip_fragments: bool,

    /// Regex patterns for URLs that are never followed
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Directory the JSON output is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Default value for output_dir
fn default_output_dir() -> PathBuf {
    PathBuf::from("documentation")
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: normalize_start_url(start_url),
            scope: ScopeMode::default(),
            output: OutputMode::default(),
            extraction: ExtractionMode::default(),
            link_discovery: LinkDiscovery::default(),
            link_resolution: LinkResolution::default(),
            strip_fragments: false,
            exclude_patterns: Vec::new(),
            output_dir: default_output_dir(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.start_url = normalize_start_url(&config.start_url);
        Ok(config)
    }

    /// Replace the start URL, keeping every other setting
    pub fn with_start_url(mut self, start_url: &str) -> Self {
        self.start_url = normalize_start_url(start_url);
        self
    }

    /// Parse the start URL
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.start_url).map_err(|source| CrawlError::InvalidUrl {
            url: self.start_url.clone(),
            source,
        })
    }
}

fn normalize_start_url(start_url: &str) -> String {
    start_url.trim().trim_end_matches('/').to_string()
}

/// Browser configuration read from the environment
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path to the chromedriver executable
    pub chromedriver_path: PathBuf,

    /// Path to the Chrome/Chromium binary
    pub chrome_binary_path: PathBuf,

    /// An already-running WebDriver server; when set, chromedriver is not spawned
    pub webdriver_url: Option<String>,

    /// Port the spawned chromedriver listens on
    pub webdriver_port: u16,

    /// Maximum wait for `<body>` to be present
    pub ready_timeout: Duration,

    /// Fixed delay after readiness for client-side content to settle
    pub settle_delay: Duration,

    /// Upper bound on a whole render, navigation included
    pub page_timeout: Duration,
}

pub const CHROMEDRIVER_PATH_VAR: &str = "CHROMEDRIVER_PATH";
pub const CHROME_BINARY_PATH_VAR: &str = "CHROME_BINARY_PATH";
pub const WEBDRIVER_URL_VAR: &str = "WEBDRIVER_URL";
pub const WEBDRIVER_PORT_VAR: &str = "WEBDRIVER_PORT";

/// Default value for webdriver_port (ChromeDriver default)
fn default_webdriver_port() -> u16 {
    9515
}

/// Load variables from a `.env` file into the process environment
///
/// Without an explicit path, a `.env` in the working directory or one of its
/// parents is used when present. Variables already set in the environment
/// are never overridden. Returns the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| CrawlError::EnvFile {
                path: path.display().to_string(),
                source,
            })?;
            ::log::debug!("Loaded environment from {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => {
                ::log::debug!("Loaded environment from {}", found.display());
                Ok(Some(found))
            }
            Err(e) => {
                ::log::debug!("No .env file loaded: {}", e);
                Ok(None)
            }
        },
    }
}

impl RendererConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| CrawlError::ConfigurationMissing(key.to_string()))
        };

        let chromedriver_path = PathBuf::from(required(CHROMEDRIVER_PATH_VAR)?);
        let chrome_binary_path = PathBuf::from(required(CHROME_BINARY_PATH_VAR)?);

        let webdriver_url = lookup(WEBDRIVER_URL_VAR).filter(|url| !url.is_empty());

        let webdriver_port = match lookup(WEBDRIVER_PORT_VAR) {
            Some(port) => port.parse().unwrap_or_else(|_| {
                ::log::warn!(
                    "Ignoring invalid {}={}, using {}",
                    WEBDRIVER_PORT_VAR,
                    port,
                    default_webdriver_port()
                );
                default_webdriver_port()
            }),
            None => default_webdriver_port(),
        };

        Ok(Self {
            chromedriver_path,
            chrome_binary_path,
            webdriver_url,
            webdriver_port,
            ready_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(2),
            page_timeout: Duration::from_secs(45),
        })
    }
}
