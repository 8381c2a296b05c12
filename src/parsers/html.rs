use crate::config::LinkDiscovery;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Anchors that carry a link target
pub const LINK_SELECTOR: &str = "a[href]";

/// Containers preferred by [`LinkDiscovery::Navigation`]
pub const NAVIGATION_SELECTOR: &str = "nav.navigation, nav.menu, nav.sidebar, \
     ul.navigation, ul.menu, ul.sidebar, \
     ol.navigation, ol.menu, ol.sidebar, \
     div.navigation, div.menu, div.sidebar";

static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LINK_SELECTOR).expect("link selector is valid"));

static NAVIGATION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(NAVIGATION_SELECTOR).expect("navigation selector is valid")
});

/// Text content of an element with surrounding whitespace removed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collects raw `href` values of outgoing links, in document order
pub fn discover_links(doc: &Html, mode: LinkDiscovery) -> Vec<String> {
    let links = match mode {
        LinkDiscovery::Document => document_links(doc),
        LinkDiscovery::Navigation => navigation_links(doc),
    };

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}

fn document_links(doc: &Html) -> Vec<String> {
    doc.select(&LINKS)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect()
}

fn navigation_links(doc: &Html) -> Vec<String> {
    let mut containers: Vec<ElementRef<'_>> = doc.select(&NAVIGATION).collect();
    if containers.is_empty() {
        containers.push(doc.root_element());
    }

    // Nested containers would otherwise report the same anchors twice
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for container in containers {
        for anchor in container.select(&LINKS) {
            if element_text(anchor).is_empty() {
                continue;
            }
            if let Some(href) = anchor.value().attr("href") {
                if seen.insert(href.to_string()) {
                    links.push(href.to_string());
                }
            }
        }
    }
    links
}
