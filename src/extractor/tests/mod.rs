use std::fs;
use url::Url;

use crate::extractor::{ExtractError, ExtractionMethod, clean, is_garbled, reader};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn page_url() -> Url {
    Url::parse("https://example.com/news/harbor-bridge").unwrap()
}

#[test]
fn test_primary_extracts_article() {
    let html = fixture("article.html");

    let result = reader::primary(&html, &page_url()).unwrap();
    let content = clean(&result.content);

    assert_eq!(result.method, ExtractionMethod::Readability);
    assert!(result.title.unwrap().contains("Harbor Bridge Reopens"));
    assert!(content.contains("reopened to traffic on Monday"));
    assert!(content.contains("reinforced two of the main piers"));
    assert!(!content.contains("<script"));
    assert!(!content.contains("window.analytics"));
    assert!(!is_garbled(&content));
}

#[test]
fn test_fallback_extracts_article() {
    let html = fixture("article.html");

    let result = reader::fallback(&html, &page_url());
    let content = clean(&result.content);

    assert_eq!(result.method, ExtractionMethod::Selector);
    assert_eq!(result.title.as_deref(), Some("Harbor Bridge Reopens After Repairs"));
    assert!(content.starts_with(r#"<div class="article-content">"#));
    assert!(content.contains("reopened to traffic on Monday"));
    assert!(!content.contains("Most read"));
    assert!(!content.contains("<nav"));
    assert!(!content.contains("<footer"));

    // Check that relative links are resolved
    assert!(content.contains("https://example.com/related/bridge-history"));
    assert!(content.contains("https://example.com/images/bridge.jpg"));

    // Bare video links are annotated for the client
    assert!(content.contains(r#"class="youtube-link" data-video-id="dQw4w9WgXcQ""#));
}

#[test]
fn test_garbled_page_stays_garbled_after_cleaning() {
    let html = fixture("garbled.html");

    let content = match reader::primary(&html, &page_url()) {
        Ok(result) => clean(&result.content),
        Err(_) => clean(&reader::fallback(&html, &page_url()).content),
    };

    assert!(is_garbled(&content));
}

#[test]
fn test_empty_page_has_no_primary_content() {
    let html = fixture("empty.html");

    let result = reader::primary(&html, &page_url());
    assert!(matches!(result, Err(ExtractError::Empty)));

    let fallback = reader::fallback(&html, &page_url());
    assert_eq!(
        fallback.content.trim_end(),
        r#"<div class="article-content"></div>"#
    );
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    // Should handle malformed HTML gracefully
    if let Ok(result) = reader::primary(html, &page_url()) {
        assert!(result.content.contains("Unclosed tags") || result.content.contains("More content"));
    }

    let fallback = reader::fallback(html, &page_url());
    assert!(fallback.content.contains("Unclosed tags"));
    assert!(fallback.content.contains("More content"));
}

mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_fallback_never_panics(html in ".*") {
            let _ = reader::fallback(&html, &page_url());
        }

        #[test]
        fn test_cleaned_fallback_has_no_control_characters(html in ".*") {
            let cleaned = clean(&reader::fallback(&html, &page_url()).content);
            prop_assert!(cleaned.chars().all(|c| !c.is_control() || c == '\n' || c == '\r'));
        }
    }
}
