use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_NON_ASCII_RUN: usize = 4;
pub const MAX_NON_ASCII_RUN: usize = 64;

/// Legacy single-byte punctuation that survives a latin-1 style decode.
const PUNCTUATION_FIXES: &[(char, char)] = &[
    ('\u{0093}', '\u{201C}'), // opening quote
    ('\u{0094}', '\u{201D}'), // closing quote
    ('\u{0096}', '\u{2013}'), // en dash
    ('\u{0097}', '\u{2014}'), // em dash
];

static CONTROL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x09\x0B\x0C\x0E-\x1F\x7F-\x9F]").unwrap());

static MISDECODED_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#õ[0-9A-Za-z]{3,}").unwrap());

static DATA_URI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:[^;]+;base64,[a-zA-Z0-9+/=]{50,}").unwrap());

// Alternatives 1 and 2 are passed through untouched so already rewritten
// anchors and links inside attribute values are not wrapped again.
static VIDEO_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(<a href="[^"]*" class="youtube-link" data-video-id="[a-zA-Z0-9_-]{11}">[^<]*</a>)"#,
        r#"|((?:href|src)="[^"<]*")"#,
        r"|(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})",
    ))
    .unwrap()
});

/// Scrubs extracted markup of decoding debris.
///
/// Cleaning is idempotent: every step either deletes characters or emits text
/// that its own pattern no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleaner {
    non_ascii_run: usize,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(DEFAULT_NON_ASCII_RUN)
    }
}

impl Cleaner {
    /// `non_ascii_run` is the shortest run of consecutive non-ASCII
    /// characters treated as residue; clamped to `1..=MAX_NON_ASCII_RUN`.
    pub fn new(non_ascii_run: usize) -> Self {
        Self {
            non_ascii_run: non_ascii_run.clamp(1, MAX_NON_ASCII_RUN),
        }
    }

    pub fn non_ascii_run(&self) -> usize {
        self.non_ascii_run
    }

    pub fn clean(&self, content: &str) -> String {
        debug!(
            len = content.len(),
            nul = content.matches('\u{0}').count(),
            replacement = content.matches('\u{FFFD}').count(),
            "cleaning content"
        );

        let content: String = content
            .chars()
            .filter(|&c| c != '\u{0}' && c != '\u{FFFD}')
            .map(|c| {
                PUNCTUATION_FIXES
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map_or(c, |&(_, to)| to)
            })
            .collect();

        let content = CONTROL_REGEX.replace_all(&content, "");

        // Data URIs go before the marker and run passes: removing one can join
        // the text around it into a new match for either.
        let content = DATA_URI_REGEX.replace_all(&content, "");
        let content = MISDECODED_MARKER_REGEX.replace_all(&content, " ");
        let content = self.collapse_non_ascii_runs(&content);

        let content = annotate_video_links(&content);

        debug!(len = content.len(), "content cleaned");
        content
    }

    /// Replaces each run of at least `non_ascii_run` non-ASCII characters
    /// with a single space.
    fn collapse_non_ascii_runs(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut run_start = None;
        let mut run_len = 0;

        for (i, c) in content.char_indices() {
            if !c.is_ascii() {
                run_start.get_or_insert(i);
                run_len += 1;
                continue;
            }
            if let Some(start) = run_start.take() {
                self.flush_run(&mut out, &content[start..i], run_len);
                run_len = 0;
            }
            out.push(c);
        }
        if let Some(start) = run_start {
            self.flush_run(&mut out, &content[start..], run_len);
        }

        out
    }

    fn flush_run(&self, out: &mut String, run: &str, run_len: usize) {
        if run_len >= self.non_ascii_run {
            out.push(' ');
        } else {
            out.push_str(run);
        }
    }
}

/// Cleans with the default run length.
pub fn clean(content: &str) -> String {
    Cleaner::default().clean(content)
}

fn annotate_video_links(content: &str) -> String {
    VIDEO_LINK_REGEX
        .replace_all(content, |caps: &regex::Captures| {
            match caps.get(3) {
                Some(video_id) => {
                    let link = &caps[0];
                    format!(
                        r#"<a href="{link}" class="youtube-link" data-video-id="{}">{link}</a>"#,
                        video_id.as_str()
                    )
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
