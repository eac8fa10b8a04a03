//! Last checks before article markup reaches a page.

use tracing::{debug, warn};

use crate::content::NO_CONTENT;
use crate::extractor::is_garbled;

/// Replaces markup that still looks garbled at render time.
pub const GARBLED_NOTICE: &str = "<div class=\"error-message\"><p>Sorry, we couldn't properly display this article.</p><p>The article might be behind a paywall or requires JavaScript.</p></div>";

/// Content shorter than this is rendered as is.
const MIN_CHECKED_LEN: usize = 20;

/// Chooses what the article view shows: freshly fetched content when it is
/// usable, the summary stored from the feed otherwise, and a link to the
/// original article when neither can be shown.
pub fn display_content(fetched: &str, stored_summary: &str, article_url: &str) -> String {
    if fetched != NO_CONTENT && !fetched.trim().is_empty() && !is_garbled(fetched) {
        debug!(len = fetched.len(), "displaying fetched content");
        return fetched.to_string();
    }

    if !stored_summary.trim().is_empty() && !is_garbled(stored_summary) {
        debug!(len = stored_summary.len(), "displaying stored summary");
        return stored_summary.to_string();
    }

    warn!(url = article_url, "neither fetched content nor summary can be displayed");
    format!(
        "<p>Content couldn't be properly displayed. <a href=\"{}\" target=\"_blank\">View the original article</a>.</p>",
        escape_attribute(article_url)
    )
}

/// Drops U+FFFD and swaps garbled markup for [`GARBLED_NOTICE`].
pub fn safe_markup(content: &str) -> String {
    let content = content.replace('\u{FFFD}', "");
    if content.len() > MIN_CHECKED_LEN && is_garbled(&content) {
        warn!(len = content.len(), "markup garbled at render time");
        return GARBLED_NOTICE.to_string();
    }
    content
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARBLED: &str = "Ã© Ã¨ Ã¢ Ã® Ã© Ã¨ Ã¢ Ã® Ã© Ã¨ Ã¢ Ã® Ã© Ã¨ Ã¢ Ã®";
    const URL: &str = "https://example.com/a?b=1&c=2";

    #[test]
    fn test_prefers_fetched_content() {
        let shown = display_content("<p>Full story</p>", "<p>Summary</p>", URL);
        assert_eq!(shown, "<p>Full story</p>");
    }

    #[test]
    fn test_sentinel_falls_back_to_summary() {
        assert_eq!(display_content(NO_CONTENT, "<p>Summary</p>", URL), "<p>Summary</p>");
        assert_eq!(display_content(GARBLED, "<p>Summary</p>", URL), "<p>Summary</p>");
        assert_eq!(display_content("  ", "<p>Summary</p>", URL), "<p>Summary</p>");
    }

    #[test]
    fn test_links_to_original_when_nothing_is_usable() {
        let shown = display_content(NO_CONTENT, GARBLED, URL);
        assert!(shown.contains("couldn't be properly displayed"));
        assert!(shown.contains(r#"href="https://example.com/a?b=1&amp;c=2""#));

        let shown = display_content(NO_CONTENT, "", URL);
        assert!(shown.contains("View the original article"));
    }

    #[test]
    fn test_safe_markup_strips_replacement_characters() {
        assert_eq!(safe_markup("<p>ok\u{FFFD} text</p>"), "<p>ok text</p>");
    }

    #[test]
    fn test_safe_markup_replaces_garbled_markup() {
        assert_eq!(safe_markup(GARBLED), GARBLED_NOTICE);
        // short fragments are never checked
        assert_eq!(safe_markup("Ã©Ã¨"), "Ã©Ã¨");
    }
}
