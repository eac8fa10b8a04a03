//! A small rule-based part-of-speech tagger for headline-sized English text.
//!
//! Tags come from a closed-class lexicon first, then word shape (capitals,
//! suffixes), then a left-to-right pass over neighbouring tags to settle
//! words that are commonly both nouns and verbs ("win", "vote", "release").
//! Tag names follow the Penn Treebank set.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Noun,
    PluralNoun,
    ProperNoun,
    PluralProperNoun,
    Verb,
    PastVerb,
    Gerund,
    PastParticiple,
    PresentVerb,
    ThirdPersonVerb,
    Modal,
    Adjective,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    PossessivePronoun,
    Possessive,
    To,
    WhWord,
    Number,
    Punctuation,
}

impl Tag {
    pub fn penn(self) -> &'static str {
        match self {
            Self::Noun => "NN",
            Self::PluralNoun => "NNS",
            Self::ProperNoun => "NNP",
            Self::PluralProperNoun => "NNPS",
            Self::Verb => "VB",
            Self::PastVerb => "VBD",
            Self::Gerund => "VBG",
            Self::PastParticiple => "VBN",
            Self::PresentVerb => "VBP",
            Self::ThirdPersonVerb => "VBZ",
            Self::Modal => "MD",
            Self::Adjective => "JJ",
            Self::Adverb => "RB",
            Self::Determiner => "DT",
            Self::Preposition => "IN",
            Self::Conjunction => "CC",
            Self::Pronoun => "PRP",
            Self::PossessivePronoun => "PRP$",
            Self::Possessive => "POS",
            Self::To => "TO",
            Self::WhWord => "WP",
            Self::Number => "CD",
            Self::Punctuation => ".",
        }
    }

    /// Common or proper noun, singular or plural.
    pub fn is_noun(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::PluralNoun | Self::ProperNoun | Self::PluralProperNoun
        )
    }

    /// Tags after which an ambiguous word reads as a noun.
    fn expects_noun(self) -> bool {
        matches!(
            self,
            Self::Determiner
                | Self::PossessivePronoun
                | Self::Possessive
                | Self::Adjective
                | Self::Number
                | Self::Preposition
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub tag: Tag,
}

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}[\p{L}\p{N}]*(?:-[\p{L}\p{N}]+)*|['’]\p{L}+|\p{N}+(?:[.,]\p{N}+)*|\S").unwrap()
});

const CLOSED_CLASS: &[(&str, Tag)] = &[
    ("the", Tag::Determiner),
    ("a", Tag::Determiner),
    ("an", Tag::Determiner),
    ("this", Tag::Determiner),
    ("that", Tag::Determiner),
    ("these", Tag::Determiner),
    ("those", Tag::Determiner),
    ("every", Tag::Determiner),
    ("each", Tag::Determiner),
    ("some", Tag::Determiner),
    ("any", Tag::Determiner),
    ("no", Tag::Determiner),
    ("another", Tag::Determiner),
    ("all", Tag::Determiner),
    ("both", Tag::Determiner),
    ("in", Tag::Preposition),
    ("on", Tag::Preposition),
    ("at", Tag::Preposition),
    ("of", Tag::Preposition),
    ("for", Tag::Preposition),
    ("with", Tag::Preposition),
    ("by", Tag::Preposition),
    ("from", Tag::Preposition),
    ("about", Tag::Preposition),
    ("into", Tag::Preposition),
    ("over", Tag::Preposition),
    ("after", Tag::Preposition),
    ("before", Tag::Preposition),
    ("under", Tag::Preposition),
    ("between", Tag::Preposition),
    ("through", Tag::Preposition),
    ("during", Tag::Preposition),
    ("against", Tag::Preposition),
    ("without", Tag::Preposition),
    ("within", Tag::Preposition),
    ("among", Tag::Preposition),
    ("across", Tag::Preposition),
    ("amid", Tag::Preposition),
    ("despite", Tag::Preposition),
    ("toward", Tag::Preposition),
    ("towards", Tag::Preposition),
    ("upon", Tag::Preposition),
    ("via", Tag::Preposition),
    ("per", Tag::Preposition),
    ("than", Tag::Preposition),
    ("as", Tag::Preposition),
    ("since", Tag::Preposition),
    ("until", Tag::Preposition),
    ("if", Tag::Preposition),
    ("because", Tag::Preposition),
    ("while", Tag::Preposition),
    ("although", Tag::Preposition),
    ("though", Tag::Preposition),
    ("whether", Tag::Preposition),
    ("and", Tag::Conjunction),
    ("or", Tag::Conjunction),
    ("but", Tag::Conjunction),
    ("nor", Tag::Conjunction),
    ("yet", Tag::Conjunction),
    ("so", Tag::Conjunction),
    ("i", Tag::Pronoun),
    ("you", Tag::Pronoun),
    ("he", Tag::Pronoun),
    ("she", Tag::Pronoun),
    ("it", Tag::Pronoun),
    ("we", Tag::Pronoun),
    ("they", Tag::Pronoun),
    ("me", Tag::Pronoun),
    ("him", Tag::Pronoun),
    ("us", Tag::Pronoun),
    ("them", Tag::Pronoun),
    ("my", Tag::PossessivePronoun),
    ("your", Tag::PossessivePronoun),
    ("his", Tag::PossessivePronoun),
    ("her", Tag::PossessivePronoun),
    ("its", Tag::PossessivePronoun),
    ("our", Tag::PossessivePronoun),
    ("their", Tag::PossessivePronoun),
    ("can", Tag::Modal),
    ("could", Tag::Modal),
    ("will", Tag::Modal),
    ("would", Tag::Modal),
    ("shall", Tag::Modal),
    ("should", Tag::Modal),
    ("may", Tag::Modal),
    ("might", Tag::Modal),
    ("must", Tag::Modal),
    ("couldn", Tag::Modal),
    ("wouldn", Tag::Modal),
    ("shouldn", Tag::Modal),
    ("to", Tag::To),
    ("who", Tag::WhWord),
    ("whom", Tag::WhWord),
    ("whose", Tag::WhWord),
    ("which", Tag::WhWord),
    ("what", Tag::WhWord),
    ("where", Tag::WhWord),
    ("when", Tag::WhWord),
    ("why", Tag::WhWord),
    ("how", Tag::WhWord),
    ("not", Tag::Adverb),
    ("'t", Tag::Adverb),
    ("never", Tag::Adverb),
    ("very", Tag::Adverb),
    ("also", Tag::Adverb),
    ("just", Tag::Adverb),
    ("now", Tag::Adverb),
    ("then", Tag::Adverb),
    ("still", Tag::Adverb),
    ("already", Tag::Adverb),
    ("always", Tag::Adverb),
    ("often", Tag::Adverb),
    ("too", Tag::Adverb),
    ("more", Tag::Adverb),
    ("most", Tag::Adverb),
    ("less", Tag::Adverb),
    ("here", Tag::Adverb),
    ("there", Tag::Adverb),
    ("again", Tag::Adverb),
    ("soon", Tag::Adverb),
    ("only", Tag::Adverb),
    ("even", Tag::Adverb),
    ("ever", Tag::Adverb),
    ("'s", Tag::Possessive),
    ("'re", Tag::PresentVerb),
    ("'ve", Tag::PresentVerb),
    ("'m", Tag::PresentVerb),
    ("'ll", Tag::Modal),
    ("'d", Tag::Modal),
    ("be", Tag::Verb),
    ("am", Tag::PresentVerb),
    ("are", Tag::PresentVerb),
    ("is", Tag::ThirdPersonVerb),
    ("was", Tag::PastVerb),
    ("were", Tag::PastVerb),
    ("been", Tag::PastParticiple),
    ("being", Tag::Gerund),
    ("have", Tag::PresentVerb),
    ("has", Tag::ThirdPersonVerb),
    ("had", Tag::PastVerb),
    ("do", Tag::PresentVerb),
    ("does", Tag::ThirdPersonVerb),
    ("did", Tag::PastVerb),
    ("don", Tag::PresentVerb),
    ("doesn", Tag::ThirdPersonVerb),
    ("didn", Tag::PastVerb),
    ("isn", Tag::ThirdPersonVerb),
    ("aren", Tag::PresentVerb),
    ("wasn", Tag::PastVerb),
    ("weren", Tag::PastVerb),
    ("hasn", Tag::ThirdPersonVerb),
    ("haven", Tag::PresentVerb),
    ("says", Tag::ThirdPersonVerb),
    ("said", Tag::PastVerb),
    ("new", Tag::Adjective),
    ("old", Tag::Adjective),
    ("big", Tag::Adjective),
    ("small", Tag::Adjective),
    ("top", Tag::Adjective),
    ("first", Tag::Adjective),
    ("last", Tag::Adjective),
    ("next", Tag::Adjective),
    ("other", Tag::Adjective),
    ("many", Tag::Adjective),
    ("few", Tag::Adjective),
    ("major", Tag::Adjective),
    ("good", Tag::Adjective),
    ("bad", Tag::Adjective),
    ("high", Tag::Adjective),
    ("low", Tag::Adjective),
    ("late", Tag::Adjective),
    ("early", Tag::Adjective),
    ("own", Tag::Adjective),
    ("global", Tag::Adjective),
    ("local", Tag::Adjective),
    ("national", Tag::Adjective),
    ("federal", Tag::Adjective),
];

const IRREGULAR_PAST: &[&str] = &[
    "threw", "won", "lost", "made", "took", "gave", "went", "came", "saw", "got", "told",
    "became", "began", "brought", "built", "bought", "caught", "chose", "drew", "drove",
    "ate", "fell", "felt", "found", "flew", "grew", "held", "kept", "knew", "led", "left",
    "met", "paid", "ran", "rose", "sent", "sold", "spoke", "spent", "stood", "struck",
    "taught", "thought", "wrote", "broke", "shook", "sang", "swam", "wore", "hid",
];

/// Words read as nouns unless the context calls for a verb.
const NOUN_OR_VERB: &[&str] = &[
    "win", "show", "release", "vote", "study", "trade", "code", "score", "cure", "match",
    "draft", "pitch", "bowl", "experiment", "star", "stock", "market", "campaign",
    "research", "coach", "race", "play", "plan", "report", "call", "deal", "rise", "fall",
    "lead", "test", "launch", "attack", "ban", "bid", "charge", "claim", "fight", "return",
    "visit", "work", "change", "need", "support", "control", "use", "start", "run", "record",
    "offer", "cost", "drop", "strike", "film", "program", "design", "discover", "entertain",
];

/// Nouns that would otherwise be caught by a verb or adjective suffix rule.
const SUFFIX_EXCEPTIONS: &[&str] = &[
    "hospital", "capital", "festival", "animal", "proposal", "trial", "signal", "rival",
    "journal", "total", "approval", "arrival", "survival", "official", "individual",
    "material", "potential", "terminal", "republic", "clinic", "traffic", "music", "topic",
    "logic", "critic", "mechanic", "olympic", "programming", "lobbying", "banking",
    "batting", "bowling", "fielding", "racing", "boxing", "swimming", "building", "meeting",
    "funding", "spending", "housing", "training", "morning", "evening", "wedding",
    "shooting", "warning", "hearing", "ruling", "bombing", "opening", "offspring", "thing",
    "king", "ring", "spring", "wing", "string", "ceiling", "feed", "seed", "speed", "greed",
    "breed", "creed", "shed", "sled",
];

static LEXICON: LazyLock<HashMap<&'static str, Tag>> = LazyLock::new(|| {
    let mut lexicon: HashMap<&'static str, Tag> = CLOSED_CLASS.iter().copied().collect();
    for &word in IRREGULAR_PAST {
        lexicon.entry(word).or_insert(Tag::PastVerb);
    }
    lexicon
});

static NOUN_OR_VERB_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NOUN_OR_VERB.iter().copied().collect());

static SUFFIX_EXCEPTION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SUFFIX_EXCEPTIONS.iter().copied().collect());

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ic", "al", "ish",
];

/// Splits `text` into tokens and tags each one.
pub fn tag(text: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut ambiguous: Vec<bool> = Vec::new();
    let mut sentence_start = true;

    for m in TOKEN_REGEX.find_iter(text) {
        let word = m.as_str();
        let lower = normalize(word);
        let (tag, is_ambiguous) = lexical_tag(word, &lower, sentence_start);
        sentence_start = matches!(word, "." | "!" | "?" | ":" | "\"" | "“");
        tokens.push(Token { text: word, tag });
        ambiguous.push(is_ambiguous);
    }

    for i in 0..tokens.len() {
        let prev = i.checked_sub(1).map(|p| tokens[p]);
        let next = tokens.get(i + 1).copied();
        if let Some(tag) = contextual_tag(tokens[i], ambiguous[i], prev, next) {
            tokens[i].tag = tag;
        }
    }

    tokens
}

fn lexical_tag(word: &str, lower: &str, sentence_start: bool) -> (Tag, bool) {
    let Some(first) = word.chars().next() else {
        return (Tag::Punctuation, false);
    };

    if first.is_numeric() {
        return (Tag::Number, false);
    }
    let clitic = matches!(first, '\'' | '’') && word.chars().count() > 1;
    if !first.is_alphabetic() && !clitic {
        return (Tag::Punctuation, false);
    }
    if let Some(&tag) = LEXICON.get(lower) {
        return (tag, false);
    }

    if first.is_uppercase() && !sentence_start {
        return (proper_noun(word), false);
    }
    if NOUN_OR_VERB_SET.contains(lower) {
        return (Tag::Noun, true);
    }
    if SUFFIX_EXCEPTION_SET.contains(lower) {
        return (Tag::Noun, false);
    }
    // Acronyms such as NBA or CEO.
    if word.len() > 1 && word.chars().all(|c| c.is_uppercase() || c.is_numeric()) {
        return (proper_noun(word), false);
    }

    (shape_tag(lower), false)
}

fn proper_noun(word: &str) -> Tag {
    let plural = word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && word.chars().any(|c| c.is_lowercase());
    if plural {
        Tag::PluralProperNoun
    } else {
        Tag::ProperNoun
    }
}

fn shape_tag(lower: &str) -> Tag {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        return Tag::Adverb;
    }
    if len > 4 && lower.ends_with("ing") {
        return Tag::Gerund;
    }
    if len > 3 && lower.ends_with("ed") {
        return Tag::PastVerb;
    }
    if len > 4
        && ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| lower.ends_with(suffix))
    {
        return Tag::Adjective;
    }
    if len > 3
        && lower.ends_with('s')
        && !["ss", "us", "is", "ous"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
    {
        return Tag::PluralNoun;
    }
    Tag::Noun
}

fn contextual_tag(
    token: Token<'_>,
    ambiguous: bool,
    prev: Option<Token<'_>>,
    next: Option<Token<'_>>,
) -> Option<Tag> {
    let prev_tag = prev.map(|p| p.tag);
    let prev_lower = prev.map(|p| normalize(p.text));

    if ambiguous {
        return match prev_tag {
            Some(Tag::Modal | Tag::To) => Some(Tag::Verb),
            Some(Tag::Pronoun) if is_subject_pronoun(prev_lower.as_deref()) => {
                Some(Tag::PresentVerb)
            }
            Some(Tag::Adverb) if matches!(prev_lower.as_deref(), Some("not" | "never" | "'t")) => {
                Some(Tag::Verb)
            }
            Some(Tag::PresentVerb | Tag::ThirdPersonVerb | Tag::PastVerb)
                if matches!(
                    prev_lower.as_deref(),
                    Some("do" | "does" | "did" | "don" | "doesn" | "didn")
                ) =>
            {
                Some(Tag::Verb)
            }
            _ => None,
        };
    }

    match token.tag {
        // "the swimming", "a record-breaking" read as nouns
        Tag::Gerund if prev_tag.is_some_and(Tag::expects_noun) => Some(Tag::Noun),
        // "is building" keeps its verb reading
        Tag::Noun
            if normalize(token.text).ends_with("ing")
                && matches!(
                    prev_lower.as_deref(),
                    Some("is" | "are" | "was" | "were" | "be" | "been" | "am")
                ) =>
        {
            Some(Tag::Gerund)
        }
        // "Senate passes the bill": a plural after a subject, before an object
        Tag::PluralNoun
            if prev_tag.is_some_and(Tag::is_noun)
                && next.is_some_and(|n| {
                    matches!(
                        n.tag,
                        Tag::Determiner | Tag::PossessivePronoun | Tag::Number
                    )
                }) =>
        {
            Some(Tag::ThirdPersonVerb)
        }
        _ => None,
    }
}

/// Lowercases and folds typographic apostrophes to ASCII.
fn normalize(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

fn is_subject_pronoun(word: Option<&str>) -> bool {
    matches!(word, Some("i" | "you" | "he" | "she" | "it" | "we" | "they"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(&str, &'static str)> {
        tag(text).into_iter().map(|t| (t.text, t.tag.penn())).collect()
    }

    #[test]
    fn test_tags_simple_sentence() {
        assert_eq!(
            tags("The quarterback threw a touchdown in the playoff game"),
            vec![
                ("The", "DT"),
                ("quarterback", "NN"),
                ("threw", "VBD"),
                ("a", "DT"),
                ("touchdown", "NN"),
                ("in", "IN"),
                ("the", "DT"),
                ("playoff", "NN"),
                ("game", "NN"),
            ]
        );
    }

    #[test]
    fn test_noun_or_verb_follows_context() {
        let after_det = tag("the win");
        assert_eq!(after_det[1].tag, Tag::Noun);

        let after_to = tag("hoping to win");
        assert_eq!(after_to[2].tag, Tag::Verb);

        let after_modal = tag("voters will vote");
        assert_eq!(after_modal[2].tag, Tag::Verb);

        let after_pronoun = tag("they release");
        assert_eq!(after_pronoun[1].tag, Tag::PresentVerb);

        let after_negation = tag("did not trade");
        assert_eq!(after_negation[2].tag, Tag::Verb);
    }

    #[test]
    fn test_proper_nouns_and_acronyms() {
        let tokens = tag("Fans in Boston cheer as NBA Finals open");
        assert_eq!(tokens[0].tag.penn(), "NNS");
        assert_eq!(tokens[2].tag, Tag::ProperNoun);
        assert_eq!(tokens[5].tag, Tag::ProperNoun);
        assert_eq!(tokens[6].tag, Tag::PluralProperNoun);
    }

    #[test]
    fn test_suffix_rules() {
        let tokens = tag("researchers quickly announced dangerous findings");
        let penn: Vec<_> = tokens.iter().map(|t| t.tag.penn()).collect();
        assert_eq!(penn, vec!["NNS", "RB", "VBD", "JJ", "NNS"]);
    }

    #[test]
    fn test_suffix_exceptions_stay_nouns() {
        let tokens = tag("a hospital and the boxing");
        assert_eq!(tokens[1].tag, Tag::Noun);
        assert_eq!(tokens[4].tag, Tag::Noun);
    }

    #[test]
    fn test_gerund_after_determiner_is_noun() {
        let tokens = tag("the sailing was rough");
        assert_eq!(tokens[1].tag, Tag::Noun);
    }

    #[test]
    fn test_possessive_and_punctuation() {
        let tokens = tag("The team's coach, 45, resigned.");
        let penn: Vec<_> = tokens.iter().map(|t| t.tag.penn()).collect();
        assert_eq!(penn, vec!["DT", "NN", "POS", "NN", ".", "CD", ".", "VBD", "."]);
    }

    #[test]
    fn test_third_person_verb_between_nouns() {
        let tokens = tag("Senate passes the bill");
        assert_eq!(tokens[1].tag, Tag::ThirdPersonVerb);
    }

    #[test]
    fn test_empty_text() {
        assert!(tag("").is_empty());
        assert!(tag("   ").is_empty());
    }
}
