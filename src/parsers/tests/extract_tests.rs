use crate::config::ExtractionMode;
use crate::parsers::extract::{self, ContentExtractor};
use crate::results::{FaqEntry, UNTITLED_SECTION};
use scraper::Html;
use url::Url;

const URL: &str = "https://ex.com/docs/page";

fn page(body: &str) -> Html {
    Html::parse_document(&format!("<html><head></head><body>{}</body></html>", body))
}

#[cfg(test)]
mod title_tests {
    use super::*;

    #[test]
    fn test_h1_wins_over_lower_levels() {
        let doc = page("<h2>Secondary</h2><h1>  Primary  </h1><h3>Tertiary</h3>");
        let record = extract::extract_page(&doc, URL);
        assert_eq!(record.title, "Primary");
    }

    #[test]
    fn test_falls_back_through_heading_levels() {
        let doc = page("<h3>Tertiary</h3><h2>Secondary</h2>");
        assert_eq!(extract::extract_page(&doc, URL).title, "Secondary");

        let doc = page("<h3>Tertiary</h3>");
        assert_eq!(extract::extract_page(&doc, URL).title, "Tertiary");
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        let doc = page("<h1>   </h1><h1>Real title</h1>");
        assert_eq!(extract::extract_page(&doc, URL).title, "Real title");
    }

    #[test]
    fn test_document_title_fallback() {
        let doc = Html::parse_document(
            "<html><head><title> Guide | Ex </title></head><body><p>text</p></body></html>",
        );
        assert_eq!(extract::extract_page(&doc, URL).title, "Guide | Ex");
    }

    #[test]
    fn test_untitled_fallback() {
        let doc = Html::parse_document(
            "<html><head><title>  </title></head><body><p>text</p></body></html>",
        );
        assert_eq!(extract::extract_page(&doc, URL).title, UNTITLED_SECTION);

        let doc = page("<p>no headings at all</p>");
        assert_eq!(extract::extract_page(&doc, URL).title, "Untitled Section");
    }
}

#[cfg(test)]
mod content_tests {
    use super::*;

    #[test]
    fn test_first_main_selector_wins() {
        // `.content` precedes `article` in the priority list
        let doc = page(
            r#"<article><p>Article text</p></article>
               <div class="content"><p> First </p><p>Second</p></div>"#,
        );
        let record = extract::extract_page(&doc, URL);
        assert_eq!(record.content, "First Second");
    }

    #[test]
    fn test_role_main_has_highest_priority() {
        let doc = page(
            r#"<div id="main-content"><p>Not this</p></div>
               <div role="main"><p>This one</p></div>"#,
        );
        assert_eq!(extract::extract_page(&doc, URL).content, "This one");
    }

    #[test]
    fn test_first_element_of_matching_selector_is_used() {
        let doc = page(
            r#"<article><p>One</p></article>
               <article><p>Two</p></article>"#,
        );
        assert_eq!(extract::extract_page(&doc, URL).content, "One");
    }

    #[test]
    fn test_matching_region_without_paragraphs_gives_empty_content() {
        let doc = page(r#"<main role="main"><div>no paragraphs</div></main><p>outside</p>"#);
        assert_eq!(extract::extract_page(&doc, URL).content, "");
    }

    #[test]
    fn test_whole_document_fallback() {
        let doc = page("<div><p>Alpha</p></div><footer><p>\n  Beta\n</p></footer>");
        assert_eq!(extract::extract_page(&doc, URL).content, "Alpha Beta");
    }

    #[test]
    fn test_code_examples_in_document_order() {
        let doc = page(
            r#"<pre>  first()  </pre>
               <div class="content"><p>Intro</p><pre><code>second()</code></pre></div>"#,
        );
        let record = extract::extract_page(&doc, URL);
        assert_eq!(record.code_examples, vec!["first()", "second()"]);
        assert_eq!(record.url, URL);
    }
}

#[cfg(test)]
mod faq_tests {
    use super::*;

    #[test]
    fn test_positional_zip_truncates() {
        let doc = page(
            r#"<div class="faq"><h3>Q1</h3><h3>Q2</h3><p>A1</p></div>"#,
        );
        let faqs = extract::extract_page(&doc, URL).faq.unwrap();
        assert_eq!(
            faqs,
            vec![FaqEntry {
                question: "Q1".to_string(),
                answer: "A1".to_string()
            }]
        );
    }

    #[test]
    fn test_misaligned_markup_pairs_by_position() {
        let doc = page(
            r#"<div id="faq">
                 <p>Preamble</p>
                 <h3>Q1</h3><p>A1</p>
                 <h3>Q2</h3><p>A2</p>
               </div>"#,
        );
        let faqs = extract::extract_page(&doc, URL).faq.unwrap();
        assert_eq!(faqs.len(), 2);
        assert_eq!(faqs[0].question, "Q1");
        assert_eq!(faqs[0].answer, "Preamble");
        assert_eq!(faqs[1].answer, "A1");
    }

    #[test]
    fn test_first_faq_selector_wins() {
        let doc = page(
            r#"<div id="faq"><h3>Later</h3><p>No</p></div>
               <div class="faqs"><h3>Earlier</h3><p>Yes</p></div>"#,
        );
        let faqs = extract::extract_page(&doc, URL).faq.unwrap();
        assert_eq!(faqs[0].question, "Earlier");
    }

    #[test]
    fn test_faq_absent_without_region_or_pairs() {
        let doc = page("<h3>Q</h3><p>A</p>");
        assert!(extract::extract_page(&doc, URL).faq.is_none());

        let doc = page(r#"<div class="faq"><p>Only answers</p></div>"#);
        assert!(extract::extract_page(&doc, URL).faq.is_none());
    }
}

#[cfg(test)]
mod section_tests {
    use super::*;

    #[test]
    fn test_one_record_per_section() {
        let doc = page(
            r#"<h1>Page</h1>
               <section><h2>Install</h2><p>Run it.</p><pre>cargo install</pre></section>
               <section><p>Untitled part.</p></section>"#,
        );
        let url = Url::parse(URL).unwrap();
        let records = ContentExtractor::new(ExtractionMode::Sections).extract(&doc, &url);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Install");
        assert_eq!(records[0].content, "Run it.");
        assert_eq!(records[0].code_examples, vec!["cargo install"]);
        assert_eq!(records[1].title, UNTITLED_SECTION);
        assert_eq!(records[1].content, "Untitled part.");
        assert!(records.iter().all(|r| r.url == URL));
    }

    #[test]
    fn test_nested_sections_do_not_repeat_content() {
        let doc = page(
            r#"<section><h1>Guide</h1><p>Intro.</p>
                 <section><h2>Install</h2><p>Run it.</p><pre>cargo install</pre>
                   <div class="faq"><h3>Root?</h3><p>No.</p></div>
                 </section>
               </section>"#,
        );
        let records = extract::extract_sections(&doc, URL);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Guide");
        assert_eq!(records[0].content, "Intro.");
        assert!(records[0].code_examples.is_empty());
        assert!(records[0].faq.is_none());
        assert_eq!(records[1].title, "Install");
        assert_eq!(records[1].content, "Run it. No.");
        assert_eq!(records[1].code_examples, vec!["cargo install"]);
        assert_eq!(records[1].faq.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_higher_priority_section_selector_wins() {
        let doc = page(
            r#"<div class="chapter"><h2>Chapter</h2></div>
               <section><h2>Section</h2></section>"#,
        );
        let records = extract::extract_sections(&doc, URL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Section");
    }

    #[test]
    fn test_page_without_sections_is_one_section() {
        let doc = page("<h1>Whole</h1><p>Body</p>");
        let records = extract::extract_sections(&doc, URL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], extract::extract_page(&doc, URL));
    }

    #[test]
    fn test_page_mode_ignores_sections() {
        let doc = page("<section><h2>A</h2></section><section><h2>B</h2></section>");
        let url = Url::parse(URL).unwrap();
        let records = ContentExtractor::default().extract(&doc, &url);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }
}
