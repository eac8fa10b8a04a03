//! Keyword weights per category.
//!
//! Words are matched exactly against lowercased noun tokens, so each entry is
//! a single word in the form it appears in headlines.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::categorizer::Category;

type Table = &'static [(&'static str, f64)];

const TECHNOLOGY: Table = &[
    ("tech", 1.0),
    ("technology", 1.0),
    ("software", 0.9),
    ("hardware", 0.9),
    ("programming", 0.8),
    ("developer", 0.8),
    ("code", 0.7),
    ("app", 0.5),
    ("application", 0.6),
    ("digital", 0.6),
    ("ai", 0.9),
    ("data", 0.5),
    ("computer", 0.8),
    ("internet", 0.8),
    ("cyber", 0.8),
    ("algorithm", 0.8),
    ("robot", 0.8),
    ("automation", 0.8),
];

const POLITICS: Table = &[
    ("politic", 1.0),
    ("government", 0.9),
    ("election", 0.9),
    ("vote", 0.8),
    ("democracy", 0.9),
    ("congress", 0.9),
    ("senate", 0.9),
    ("parliament", 0.9),
    ("legislation", 0.9),
    ("president", 0.9),
    ("minister", 0.9),
    ("governor", 0.8),
    ("democrat", 0.9),
    ("republican", 0.9),
    ("policy", 0.8),
    ("candidate", 0.8),
    ("campaign", 0.8),
    ("constitution", 0.9),
    ("diplomatic", 0.9),
    ("law", 0.6),
    ("party", 0.7),
    ("administration", 0.8),
    ("senator", 0.9),
    ("congressman", 0.9),
    ("ballot", 0.9),
    ("lobbying", 0.9),
    ("bipartisan", 0.9),
    ("filibuster", 0.9),
    ("geopolitical", 0.9),
    ("diplomat", 0.9),
    ("referendum", 0.9),
    ("constituency", 0.9),
    ("impeachment", 0.9),
    ("veto", 0.9),
];

const SPORTS: Table = &[
    ("sport", 1.0),
    ("game", 0.8),
    ("match", 0.9),
    ("player", 0.9),
    ("team", 0.9),
    ("athlete", 0.9),
    ("championship", 0.9),
    ("tournament", 0.9),
    ("league", 0.9),
    ("football", 1.0),
    ("soccer", 1.0),
    ("basketball", 1.0),
    ("baseball", 1.0),
    ("tennis", 1.0),
    ("cricket", 1.0),
    ("hockey", 1.0),
    ("olympic", 1.0),
    ("coach", 0.9),
    ("score", 0.9),
    ("win", 0.7),
    ("loss", 0.7),
    ("ipl", 1.0),
    ("goal", 0.8),
    ("stadium", 0.9),
    ("referee", 0.9),
    ("umpire", 0.9),
    ("nba", 1.0),
    ("nfl", 1.0),
    ("mlb", 1.0),
    ("fifa", 1.0),
    ("nhl", 1.0),
    ("pga", 1.0),
    ("ufc", 1.0),
    ("medal", 0.8),
    ("competition", 0.7),
    ("trophy", 0.9),
    ("shot", 0.6),
    ("fan", 0.7),
    ("spectator", 0.8),
    ("goalkeeper", 1.0),
    ("runner", 0.9),
    ("batter", 1.0),
    ("wicket", 1.0),
    ("bowl", 0.7),
    ("draft", 0.7),
    ("rookie", 0.9),
    ("playoff", 1.0),
    ("penalty", 0.7),
    ("offside", 1.0),
    ("batting", 1.0),
    ("bowling", 0.9),
    ("fielding", 0.9),
    ("defense", 0.6),
    ("offense", 0.6),
    ("quarter", 0.6),
    ("inning", 1.0),
    ("pitch", 0.7),
    ("f1", 1.0),
    ("boxing", 1.0),
    ("racing", 0.8),
    ("marathon", 0.9),
    ("touchdown", 1.0),
    ("athletics", 0.9),
    ("gymnastics", 1.0),
    ("swimming", 0.8),
];

const BUSINESS: Table = &[
    ("business", 1.0),
    ("economy", 1.0),
    ("market", 0.9),
    ("finance", 0.9),
    ("stock", 0.9),
    ("investment", 0.9),
    ("company", 0.8),
    ("industry", 0.9),
    ("trade", 0.9),
    ("commercial", 0.9),
    ("corporate", 0.9),
    ("entrepreneur", 0.9),
    ("startup", 0.9),
    ("profit", 0.9),
    ("revenue", 0.9),
    ("economic", 0.9),
    ("financial", 0.9),
    ("banking", 0.9),
    ("investor", 0.9),
    ("ceo", 0.8),
];

const ENTERTAINMENT: Table = &[
    ("entertain", 1.0),
    ("movie", 1.0),
    ("film", 1.0),
    ("music", 1.0),
    ("concert", 0.9),
    ("celebrity", 0.9),
    ("actor", 0.9),
    ("actress", 0.9),
    ("director", 0.8),
    ("tv", 0.9),
    ("television", 0.9),
    ("show", 0.6),
    ("drama", 0.9),
    ("comedy", 0.9),
    ("hollywood", 1.0),
    ("bollywood", 1.0),
    ("star", 0.8),
    ("singer", 0.9),
    ("album", 0.9),
    ("release", 0.7),
];

const HEALTH: Table = &[
    ("health", 1.0),
    ("medical", 1.0),
    ("medicine", 1.0),
    ("doctor", 0.9),
    ("hospital", 0.9),
    ("disease", 0.9),
    ("treatment", 0.9),
    ("cure", 0.9),
    ("patient", 0.9),
    ("therapy", 0.9),
    ("diet", 0.9),
    ("fitness", 0.9),
    ("wellness", 0.9),
    ("virus", 0.9),
    ("pandemic", 0.9),
    ("vaccine", 0.9),
    ("symptom", 0.9),
    ("diagnosis", 0.9),
    ("surgery", 0.9),
    ("prescription", 0.9),
];

const SCIENCE: Table = &[
    ("science", 1.0),
    ("research", 0.9),
    ("study", 0.8),
    ("discover", 0.9),
    ("experiment", 0.9),
    ("scientist", 1.0),
    ("laboratory", 0.9),
    ("physics", 1.0),
    ("chemistry", 1.0),
    ("biology", 1.0),
    ("astronomy", 1.0),
    ("space", 0.9),
    ("theory", 0.8),
    ("hypothesis", 0.9),
    ("scientific", 1.0),
    ("molecule", 0.9),
    ("atom", 0.9),
    ("quantum", 1.0),
    ("genetic", 0.9),
    ("evolution", 0.9),
];

/// Category → keyword → weight. Ordered by category priority.
pub static CATEGORY_VECTORS: Lazy<Vec<(Category, HashMap<&'static str, f64>)>> = Lazy::new(|| {
    [
        (Category::Technology, TECHNOLOGY),
        (Category::Politics, POLITICS),
        (Category::Sports, SPORTS),
        (Category::Business, BUSINESS),
        (Category::Entertainment, ENTERTAINMENT),
        (Category::Health, HEALTH),
        (Category::Science, SCIENCE),
    ]
    .into_iter()
    .map(|(category, table)| (category, table.iter().copied().collect()))
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_follow_priority_order() {
        let order: Vec<Category> = CATEGORY_VECTORS.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::PRIORITY.to_vec());
    }

    #[test]
    fn test_weights_are_in_unit_range() {
        for (category, weights) in CATEGORY_VECTORS.iter() {
            assert!(!weights.is_empty(), "{category} has no keywords");
            for (word, weight) in weights {
                assert!((0.0..=1.0).contains(weight), "{word} weight {weight}");
                assert_eq!(*word, word.to_lowercase());
                assert!(!word.contains(' '));
            }
        }
    }
}
