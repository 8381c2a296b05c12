use thiserror::Error;

/// Errors raised while configuring, rendering or persisting a crawl.
///
/// Only configuration and writer errors are fatal. Render errors are
/// reported by the [`Renderer`](crate::crawlers::Renderer) and absorbed by
/// the traversal, which drops the affected branch and keeps going.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// A required environment variable is not set.
    #[error("{0} must be set in the environment or the .env file")]
    ConfigurationMissing(String),

    /// An explicitly requested `.env` file could not be loaded.
    #[error("cannot load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Navigation or page-source retrieval failed.
    #[error("failed to render {url}: {reason}")]
    Render { url: String, reason: String },

    #[error("timed out rendering {url} after {seconds} seconds")]
    RenderTimeout { url: String, seconds: u64 },

    /// The WebDriver server could not be started or reached.
    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("invalid exclude pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_missing_names_variable() {
        let err = CrawlError::ConfigurationMissing("CHROMEDRIVER_PATH".to_string());
        assert!(err.to_string().contains("CHROMEDRIVER_PATH"));
        assert!(err.to_string().contains(".env"));
    }

    #[test]
    fn test_render_timeout_display() {
        let err = CrawlError::RenderTimeout {
            url: "https://example.com/docs".to_string(),
            seconds: 45,
        };
        let message = err.to_string();
        assert!(message.contains("https://example.com/docs"));
        assert!(message.contains("45"));
    }
}
