use readability::extractor;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::model::{ExtractError, ExtractionMethod, ExtractionResult};

/// Minimum inner markup length for a selector match to count as the article.
const MIN_CONTAINER_LEN: usize = 200;

/// Tried in order; the first element of each selector is the only candidate.
const CONTENT_SELECTORS: &[&str] = &[
    "article", "main", ".article", ".content", ".post", "#content", "#main",
];

static CONTENT_SELECTOR_LIST: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

static BOILERPLATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, style, nav, header, footer, iframe").unwrap());

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());

static SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).unwrap());

/// Density-scored extraction of the main content node.
pub fn primary(html: &str, url: &Url) -> Result<ExtractionResult, ExtractError> {
    let article = extractor::extract(&mut html.as_bytes(), url)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    if article.text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    debug!(
        title = %article.title,
        content_len = article.content.len(),
        text_len = article.text.len(),
        "readability picked a content node"
    );

    Ok(ExtractionResult {
        title: non_empty(article.title),
        content: article.content,
        method: ExtractionMethod::Readability,
    })
}

/// Boilerplate-stripping extraction by well-known content containers.
///
/// Always yields something: when no container qualifies, the whole body is used.
pub fn fallback(html: &str, base_url: &Url) -> ExtractionResult {
    let mut document = Html::parse_document(html);
    let title = extract_title(&document);

    let boilerplate: Vec<_> = document
        .select(&BOILERPLATE_SELECTOR)
        .map(|element| element.id())
        .collect();
    for id in boilerplate {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let content = select_main_content(&document);
    let content = resolve_links(&content, base_url);

    ExtractionResult {
        title,
        content: format!(r#"<div class="article-content">{content}</div>"#),
        method: ExtractionMethod::Selector,
    }
}

fn select_main_content(document: &Html) -> String {
    for (selector_str, selector) in CONTENT_SELECTORS.iter().zip(CONTENT_SELECTOR_LIST.iter()) {
        if let Some(element) = document.select(selector).next() {
            let inner = element.inner_html();
            if inner.len() > MIN_CONTAINER_LEN {
                debug!(selector = selector_str, len = inner.len(), "content container matched");
                return inner;
            }
        }
    }

    debug!("no content container qualified, using body");
    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

fn extract_title(document: &Html) -> Option<String> {
    // Try og:title first
    if let Ok(selector) = Selector::parse("meta[property='og:title']")
        && let Some(content) = document
            .select(&selector)
            .find_map(|element| element.value().attr("content"))
    {
        return non_empty(content.to_string());
    }

    for tag in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(tag) {
            for element in document.select(&selector) {
                let title = element.text().collect::<String>().trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    None
}

fn resolve_links(html: &str, base_url: &Url) -> String {
    let html = HREF_REGEX.replace_all(html, |caps: &regex::Captures| {
        match base_url.join(&caps[1]) {
            Ok(absolute_url) => format!(r#"href="{}""#, absolute_url),
            Err(_) => caps[0].to_string(),
        }
    });

    SRC_REGEX
        .replace_all(&html, |caps: &regex::Captures| match base_url.join(&caps[1]) {
            Ok(absolute_url) => format!(r#"src="{}""#, absolute_url),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
