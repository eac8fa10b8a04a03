//! Topic classification for feed items.
//!
//! Text is part-of-speech tagged, nouns are matched against a fixed keyword
//! table per category, and the category with the highest accumulated weight
//! wins. Feed-provided tags (or the feed name) can override the result.

pub mod overrides;
pub mod tagger;
pub mod vectors;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub use overrides::category_override;
pub use vectors::CATEGORY_VECTORS;

/// Declaration order is the tie-break priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Politics,
    Sports,
    Business,
    Entertainment,
    Health,
    Science,
    Other,
}

impl Category {
    /// Scored categories, highest priority first.
    pub const PRIORITY: [Category; 7] = [
        Category::Technology,
        Category::Politics,
        Category::Sports,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Politics => "politics",
            Category::Sports => "sports",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated keyword weight per category. Only categories with at least one
/// keyword hit are present; iteration follows category priority.
pub type ClassificationScores = BTreeMap<Category, f64>;

/// A feed entry as handed over by the ingester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category tags from the feed, if any.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FeedItem {
    /// Title and description joined by a single space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

pub fn score(text: &str) -> ClassificationScores {
    let mut scores = ClassificationScores::new();

    for token in tagger::tag(text) {
        if !token.tag.is_noun() {
            continue;
        }
        let word = token.text.to_lowercase();
        for (category, weights) in CATEGORY_VECTORS.iter() {
            if let Some(weight) = weights.get(word.as_str()) {
                *scores.entry(*category).or_insert(0.0) += weight;
            }
        }
    }

    scores
}

/// Picks the category with the strictly highest score. Equal scores go to
/// the category listed first in [`Category::PRIORITY`].
pub fn categorize(text: &str) -> Category {
    let scores = score(text);

    let mut best = Category::Other;
    let mut best_score = 0.0;
    for (&category, &value) in &scores {
        if value > best_score {
            best = category;
            best_score = value;
        }
    }

    debug!(?scores, category = %best, "categorized text");
    best
}

/// Feed hints first, keyword scoring over title and description otherwise.
pub fn categorize_item(feed_name: &str, item: &FeedItem) -> Category {
    if let Some(category) = category_override(&item.categories, feed_name) {
        debug!(category = %category, feed = feed_name, "category taken from feed hints");
        return category;
    }
    categorize(&item.text())
}
