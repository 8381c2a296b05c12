use crate::crawlers::Renderer;
use crate::filter::ScopeFilter;
use crate::parsers::Parser;
use crate::results::CrawlResult;
use std::collections::HashSet;
use url::Url;

/// Crawls depth-first from `start_url`, returning records in visit order.
///
/// Pages are visited in pre-order, following each page's links left to
/// right, exactly as a recursive walk would. Pending pages are kept on an
/// explicit stack, so deep sites do not grow the call stack.
///
/// A page that fails to render is logged and skipped: it contributes no
/// records and its links are never discovered. Each URL is rendered at
/// most once, whether or not the render succeeded.
pub async fn crawl<R: Renderer>(
    start_url: &Url,
    renderer: &mut R,
    parser: &Parser,
    filter: &ScopeFilter,
) -> CrawlResult {
    ::log::info!("Starting crawl at {}", start_url);

    let mut visited: HashSet<String> = HashSet::new();
    let mut result = CrawlResult::new();
    let mut pending: Vec<Url> = vec![filter.normalize_url(start_url)];

    while let Some(url) = pending.pop() {
        if !mark_url_as_visited(filter.visit_key(&url), &mut visited) {
            continue;
        }

        ::log::info!("Scraping section: ({})", url);

        let Some(markup) = render_page(renderer, &url).await else {
            continue;
        };
        let parsed = parser.parse(&markup, &url);

        for record in parsed.records {
            result.push(url.clone(), record);
        }

        let children = queue_links(&url, &parsed.links, filter, &visited);
        // Reversed so the first link on the page is popped first
        pending.extend(children.into_iter().rev());
    }

    ::log::info!(
        "Crawl finished: {} page(s) visited, {} record(s) extracted",
        visited.len(),
        result.len()
    );
    result
}

/// Renders and extracts `start_url` alone, without following any links
pub async fn crawl_solo<R: Renderer>(
    start_url: &Url,
    renderer: &mut R,
    parser: &Parser,
) -> CrawlResult {
    ::log::info!("Scraping single page in solo mode: {}", start_url);

    let mut result = CrawlResult::new();
    if let Some(markup) = render_page(renderer, start_url).await {
        for record in parser.parse_single(&markup, start_url).records {
            result.push(start_url.clone(), record);
        }
    }
    result
}

/// Marks a visit key as visited, returning false if it already was
fn mark_url_as_visited(key: String, visited: &mut HashSet<String>) -> bool {
    if visited.contains(&key) {
        ::log::trace!("Skipping already visited: {}", key);
        return false;
    }
    visited.insert(key);
    true
}

async fn render_page<R: Renderer>(renderer: &mut R, url: &Url) -> Option<String> {
    match renderer.render(url).await {
        Ok(markup) => Some(markup),
        Err(e) => {
            ::log::error!("Error scraping {}: {}", url, e);
            None
        }
    }
}

/// Resolves a page's links and keeps the in-scope, unvisited ones, in page order
fn queue_links(
    page: &Url,
    links: &[String],
    filter: &ScopeFilter,
    visited: &HashSet<String>,
) -> Vec<Url> {
    let mut queued = Vec::new();

    for link in links {
        let Some(resolved) = filter.resolve(link, page) else {
            continue;
        };

        if !filter.is_in_scope(&resolved) {
            ::log::debug!("Scope filter rejected: {}", resolved);
            continue;
        }

        let normalized = filter.normalize_url(&resolved);
        if visited.contains(&filter.visit_key(&normalized)) {
            ::log::debug!("Skipping already visited link: {}", normalized);
            continue;
        }

        ::log::debug!("Queuing link for crawling: {}", normalized);
        queued.push(normalized);
    }

    queued
}
