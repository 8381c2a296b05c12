//! Structured content extraction from a rendered page.
//!
//! Every lookup that has more than one candidate selector uses an ordered
//! list and stops at the first selector that matches anything. The order of
//! each list is part of the output contract: on pages where several
//! candidate containers exist, the earlier selector decides the result.

use crate::config::ExtractionMode;
use crate::parsers::html::element_text;
use crate::results::{FaqEntry, PageRecord, UNTITLED_SECTION};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Heading levels tried for a title, highest priority first
pub const TITLE_SELECTORS: &[&str] = &["h1", "h2", "h3"];

/// Document title used when no heading is present
pub const DOCUMENT_TITLE_SELECTOR: &str = "title";

/// Main content containers, highest priority first
pub const MAIN_REGION_SELECTORS: &[&str] = &[
    "[role=\"main\"]",
    ".main-content",
    "#main-content",
    ".content",
    "#content",
    "article",
    ".docSearch-content",
];

pub const PARAGRAPH_SELECTOR: &str = "p";

pub const CODE_BLOCK_SELECTOR: &str = "pre";

/// FAQ containers, highest priority first
pub const FAQ_SELECTORS: &[&str] = &[".faq", ".faqs", "#faq", "#faqs"];

pub const FAQ_QUESTION_SELECTOR: &str = "h3";

pub const FAQ_ANSWER_SELECTOR: &str = "p";

/// Repeated containers a page is split on in [`ExtractionMode::Sections`]
pub const SECTION_SELECTORS: &[&str] = &["section", ".section", ".chapter"];

struct Selectors {
    title: Vec<Selector>,
    document_title: Selector,
    main_region: Vec<Selector>,
    paragraph: Selector,
    code_block: Selector,
    faq: Vec<Selector>,
    faq_question: Selector,
    faq_answer: Selector,
    section: Vec<Selector>,
}

fn compile(css: &str) -> Selector {
    Selector::parse(css).expect("built-in selector is valid")
}

fn compile_all(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|css| compile(css)).collect()
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    title: compile_all(TITLE_SELECTORS),
    document_title: compile(DOCUMENT_TITLE_SELECTOR),
    main_region: compile_all(MAIN_REGION_SELECTORS),
    paragraph: compile(PARAGRAPH_SELECTOR),
    code_block: compile(CODE_BLOCK_SELECTOR),
    faq: compile_all(FAQ_SELECTORS),
    faq_question: compile(FAQ_QUESTION_SELECTOR),
    faq_answer: compile(FAQ_ANSWER_SELECTOR),
    section: compile_all(SECTION_SELECTORS),
});

/// Turns a parsed document into one or more [`PageRecord`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor {
    mode: ExtractionMode,
}

impl ContentExtractor {
    pub fn new(mode: ExtractionMode) -> Self {
        Self { mode }
    }

    pub fn extract(&self, doc: &Html, url: &Url) -> Vec<PageRecord> {
        match self.mode {
            ExtractionMode::Page => vec![extract_page(doc, url.as_str())],
            ExtractionMode::Sections => extract_sections(doc, url.as_str()),
        }
    }
}

/// Extracts a single record for the whole page
pub fn extract_page(doc: &Html, url: &str) -> PageRecord {
    let scope = Scope::page(doc.root_element());

    let title = extract_title(scope)
        .or_else(|| {
            ::log::debug!("No heading on {}, trying document title", url);
            extract_document_title(doc)
        })
        .unwrap_or_else(|| {
            ::log::debug!("No title on {}, using {:?}", url, UNTITLED_SECTION);
            UNTITLED_SECTION.to_string()
        });

    PageRecord {
        url: url.to_string(),
        title,
        content: extract_main_content(scope),
        code_examples: extract_code_examples(scope),
        faq: extract_faqs(scope),
    }
}

/// Extracts one record per section container, or one for the whole page
/// when the page has none
///
/// Nested containers get their own record. Each element belongs only to
/// its innermost enclosing container, so nested content is never repeated
/// in the outer record.
pub fn extract_sections(doc: &Html, url: &str) -> Vec<PageRecord> {
    let root = doc.root_element();
    let Some(selector) = SELECTORS
        .section
        .iter()
        .find(|selector| root.select(selector).next().is_some())
    else {
        ::log::debug!("No section containers on {}, treating page as one section", url);
        return vec![extract_page(doc, url)];
    };

    root.select(selector)
        .map(|section| {
            let scope = Scope::section(section, selector);
            PageRecord {
                url: url.to_string(),
                title: extract_title(scope).unwrap_or_else(|| UNTITLED_SECTION.to_string()),
                content: extract_main_content(scope),
                code_examples: extract_code_examples(scope),
                faq: extract_faqs(scope),
            }
        })
        .collect()
}

/// Region elements are selected from, optionally owned by one section
#[derive(Clone, Copy)]
struct Scope<'a> {
    root: ElementRef<'a>,
    section: Option<(ElementRef<'a>, &'static Selector)>,
}

impl<'a> Scope<'a> {
    fn page(root: ElementRef<'a>) -> Self {
        Self { root, section: None }
    }

    fn section(section: ElementRef<'a>, boundary: &'static Selector) -> Self {
        Self {
            root: section,
            section: Some((section, boundary)),
        }
    }

    /// Same section ownership, rooted at a descendant
    fn within(self, root: ElementRef<'a>) -> Self {
        Self { root, ..self }
    }

    fn select(self, selector: &Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.root
            .select(selector)
            .filter(move |element| self.owns(*element))
    }

    /// True when `element` sits in no container nested inside the section
    fn owns(&self, element: ElementRef<'a>) -> bool {
        let Some((section, boundary)) = self.section else {
            return true;
        };
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| boundary.matches(ancestor))
            .is_some_and(|nearest| nearest.id() == section.id())
    }
}

/// First non-empty heading, trying heading levels in priority order
fn extract_title(scope: Scope<'_>) -> Option<String> {
    SELECTORS.title.iter().find_map(|selector| {
        scope
            .select(selector)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// Text of the document's `<title>` element, if non-empty
fn extract_document_title(doc: &Html) -> Option<String> {
    doc.select(&SELECTORS.document_title)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Paragraph text of the first matching main region, or of the whole scope
fn extract_main_content(scope: Scope<'_>) -> String {
    let region = first_match(scope, &SELECTORS.main_region).unwrap_or_else(|| {
        ::log::debug!("No main region matched, using every paragraph");
        scope
    });

    region
        .select(&SELECTORS.paragraph)
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of every code block, in document order
fn extract_code_examples(scope: Scope<'_>) -> Vec<String> {
    scope.select(&SELECTORS.code_block).map(element_text).collect()
}

/// Question/answer pairs from the first matching FAQ region
///
/// Questions and answers are paired by position, so the result is as long
/// as the shorter of the two lists. `None` when no region matched or no
/// pair could be formed.
fn extract_faqs(scope: Scope<'_>) -> Option<Vec<FaqEntry>> {
    let container = first_match(scope, &SELECTORS.faq)?;

    let questions = container.select(&SELECTORS.faq_question).map(element_text);
    let answers = container.select(&SELECTORS.faq_answer).map(element_text);
    let faqs: Vec<FaqEntry> = questions
        .zip(answers)
        .map(|(question, answer)| FaqEntry { question, answer })
        .collect();

    if faqs.is_empty() { None } else { Some(faqs) }
}

/// First element matched by the highest-priority selector that matches anything
fn first_match<'a>(scope: Scope<'a>, selectors: &[Selector]) -> Option<Scope<'a>> {
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).next())
        .map(|element| scope.within(element))
}
