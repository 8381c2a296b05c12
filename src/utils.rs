use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Characters left unescaped in a title slug
const SLUG_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Convert a record title to a filename-safe slug
///
/// Lowercases, replaces spaces with underscores, then percent-encodes
/// everything else outside `[A-Za-z0-9_.~-]`. Distinct titles can share a
/// slug ("Intro" and "intro"); callers writing one file per slug overwrite.
pub fn slugify_title(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "_");
    utf8_percent_encode(&lowered, SLUG_SAFE).to_string()
}

/// Filename prefix derived from the host, dots replaced by underscores
///
/// A non-default port is kept: `127.0.0.1:8000` becomes `127_0_0_1:8000`.
pub fn domain_prefix(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let netloc = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    netloc.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Getting Started"), "getting_started");
        assert_eq!(slugify_title("Intro"), slugify_title("intro"));
        assert_eq!(slugify_title("API/Reference v2.0"), "api%2Freference_v2.0");
        assert_eq!(slugify_title("Q&A: FAQ?"), "q%26a%3A_faq%3F");
        assert_eq!(slugify_title("Café"), "caf%C3%A9");
    }

    #[test]
    fn test_domain_prefix() {
        let url = Url::parse("https://docs.example.com/docs").unwrap();
        assert_eq!(domain_prefix(&url), "docs_example_com");

        let url = Url::parse("http://127.0.0.1:8000/docs").unwrap();
        assert_eq!(domain_prefix(&url), "127_0_0_1:8000");

        // Default ports are not part of the parsed URL
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(domain_prefix(&url), "example_com");
    }
}
