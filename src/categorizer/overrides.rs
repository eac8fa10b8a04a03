//! Category hints carried by the feed itself.
//!
//! Item tags take precedence; the feed name is only consulted when the item
//! has no tags at all. Rules are evaluated in order and the first match wins.

use crate::categorizer::Category;

#[derive(Debug, Clone, Copy)]
pub struct OverrideRule {
    pub category: Category,
    hints: &'static [&'static str],
}

impl OverrideRule {
    const fn new(category: Category, hints: &'static [&'static str]) -> Self {
        Self { category, hints }
    }

    /// `haystack` is expected lowercased.
    pub fn matches(&self, haystack: &str) -> bool {
        self.hints.iter().any(|hint| haystack.contains(hint))
    }
}

pub const TAG_RULES: &[OverrideRule] = &[
    OverrideRule::new(Category::Technology, &["tech"]),
    OverrideRule::new(Category::Politics, &["polit"]),
    OverrideRule::new(Category::Sports, &["sport"]),
    OverrideRule::new(Category::Business, &["business", "econ"]),
    OverrideRule::new(Category::Entertainment, &["entertain"]),
    OverrideRule::new(Category::Health, &["health"]),
    OverrideRule::new(Category::Science, &["science"]),
];

pub const FEED_NAME_RULES: &[OverrideRule] = &[
    OverrideRule::new(Category::Technology, &["tech", "digital"]),
    OverrideRule::new(Category::Politics, &["polit"]),
    OverrideRule::new(Category::Sports, &["sport"]),
    OverrideRule::new(Category::Business, &["business", "econ"]),
    OverrideRule::new(Category::Entertainment, &["entertain", "hollywood"]),
    OverrideRule::new(Category::Health, &["health"]),
    OverrideRule::new(Category::Science, &["science"]),
];

/// Returns the category implied by the item's tags, or by the feed name when
/// there are no tags.
pub fn category_override(tags: &[String], feed_name: &str) -> Option<Category> {
    let (haystack, rules) = if tags.is_empty() {
        (feed_name.to_lowercase(), FEED_NAME_RULES)
    } else {
        (tags.join(" ").to_lowercase(), TAG_RULES)
    };

    rules
        .iter()
        .find(|rule| rule.matches(&haystack))
        .map(|rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_tag_rules() {
        assert_eq!(
            category_override(&tags(&["Technology"]), ""),
            Some(Category::Technology)
        );
        assert_eq!(
            category_override(&tags(&["World", "Economy"]), ""),
            Some(Category::Business)
        );
        assert_eq!(
            category_override(&tags(&["Geopolitics"]), ""),
            Some(Category::Politics)
        );
        assert_eq!(category_override(&tags(&["Local"]), ""), None);
    }

    #[test]
    fn test_first_matching_tag_rule_wins() {
        // "science" and "tech" both present, technology is checked first
        assert_eq!(
            category_override(&tags(&["Science", "Tech"]), ""),
            Some(Category::Technology)
        );
    }

    #[test]
    fn test_feed_name_used_only_without_tags() {
        assert_eq!(
            category_override(&[], "Hollywood Reporter"),
            Some(Category::Entertainment)
        );
        assert_eq!(
            category_override(&[], "Digital Trends"),
            Some(Category::Technology)
        );
        assert_eq!(category_override(&[], "Daily Courier"), None);

        // tags present but unmatched: the feed name is ignored
        assert_eq!(
            category_override(&tags(&["Local"]), "Hollywood Reporter"),
            None
        );
    }

    #[test]
    fn test_digital_only_applies_to_feed_names() {
        assert_eq!(category_override(&tags(&["Digital"]), ""), None);
    }
}
