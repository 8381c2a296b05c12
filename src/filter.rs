use crate::config::{CrawlConfig, LinkResolution, ScopeMode};
use crate::error::Result;
use regex::Regex;
use url::Url;

/// Path marker a link must carry to be followed in restricted mode
pub const DOCS_PATH_MARKER: &str = "/docs";

/// Decides which discovered links a crawl may follow
///
/// Relative links are joined against the crawl's base URL by default, not
/// against the page they appear on. A relative link three hops deep is
/// therefore resolved as if it sat on the base page. Use
/// [`LinkResolution::AgainstPage`] for page-relative joining.
#[derive(Debug)]
pub struct ScopeFilter {
    base: Url,
    mode: ScopeMode,
    resolution: LinkResolution,
    strip_fragments: bool,
    exclude_regexes: Vec<Regex>,
}

impl ScopeFilter {
    /// Create a filter with default resolution and no exclusions
    pub fn new(base: Url, mode: ScopeMode) -> Self {
        Self {
            base,
            mode,
            resolution: LinkResolution::AgainstBase,
            strip_fragments: false,
            exclude_regexes: Vec::new(),
        }
    }

    /// Create a filter from a crawl configuration
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            base: config.base_url()?,
            mode: config.scope,
            resolution: config.link_resolution,
            strip_fragments: config.strip_fragments,
            exclude_regexes,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Join a raw `href` into an absolute URL
    ///
    /// `page` is only consulted under [`LinkResolution::AgainstPage`].
    pub fn resolve(&self, href: &str, page: &Url) -> Option<Url> {
        let against = match self.resolution {
            LinkResolution::AgainstBase => &self.base,
            LinkResolution::AgainstPage => page,
        };
        match against.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::trace!("Cannot resolve link {:?}: {}", href, e);
                None
            }
        }
    }

    /// Check a raw link against the base URL
    pub fn should_crawl(&self, href: &str) -> bool {
        self.resolve(href, &self.base)
            .is_some_and(|url| self.is_in_scope(&url))
    }

    /// Check an already-resolved URL
    pub fn is_in_scope(&self, url: &Url) -> bool {
        if url.origin() != self.base.origin() {
            return false;
        }

        // The base page is always in scope
        if trim_trailing_slash(url.path()) == trim_trailing_slash(self.base.path()) {
            return true;
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            return false;
        }

        match self.mode {
            ScopeMode::Unrestricted => true,
            ScopeMode::RestrictedToDocsPath => url.path().contains(DOCS_PATH_MARKER),
        }
    }

    /// Create the key a URL is visited under
    pub fn normalize_url(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        if self.strip_fragments {
            normalized.set_fragment(None);
        }
        normalized
    }

    /// Key a URL is recorded under in the visited set
    ///
    /// A path and its trailing-slash form share one key, so `/docs/` and
    /// `/docs` are crawled once.
    pub fn visit_key(&self, url: &Url) -> String {
        let mut key = self.normalize_url(url);
        let trimmed = trim_trailing_slash(key.path()).to_string();
        if trimmed.len() != key.path().len() {
            key.set_path(&trimmed);
        }
        key.into()
    }
}

/// Path without its trailing `/`, leaving the root path alone
fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Scope decision for a single raw link, without a configured filter
pub fn is_in_scope(candidate: &str, base: &Url, mode: ScopeMode) -> bool {
    ScopeFilter::new(base.clone(), mode).should_crawl(candidate)
}
