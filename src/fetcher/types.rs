use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024; // 5MB

/// Which request shape to use. The fallback profile is deliberately plainer:
/// shorter timeout, fewer headers, library-default redirect handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchProfile {
    Primary,
    Fallback,
}

impl FetchProfile {
    pub fn user_agent(self) -> &'static str {
        match self {
            Self::Primary => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            }
            Self::Fallback => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
            }
        }
    }

    /// Extra request headers on top of the user agent.
    pub fn headers(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Primary => &[
                (
                    "accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
                ),
                ("accept-language", "en-US,en;q=0.5"),
                ("connection", "keep-alive"),
                ("upgrade-insecure-requests", "1"),
                ("cache-control", "max-age=0"),
            ],
            Self::Fallback => &[
                ("accept", "text/html,application/xhtml+xml,application/xml"),
                ("accept-language", "en-US,en;q=0.9"),
            ],
        }
    }
}

impl fmt::Display for FetchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Network limits applied by the HTTP page source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub primary_timeout: Duration,
    pub fallback_timeout: Duration,
    pub max_redirects: usize,
    pub max_body_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
            fallback_timeout: DEFAULT_FALLBACK_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// A fetched page body, untouched.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub url_final: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
    pub fetched_at: DateTime<Utc>,
}

/// Lowercase charset label, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedEncoding(String);

impl ResolvedEncoding {
    pub const UTF_8: &'static str = "utf-8";

    /// Normalizes `label`; a blank label resolves to utf-8.
    pub fn new(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            Self::utf8()
        } else {
            Self(label)
        }
    }

    pub fn utf8() -> Self {
        Self(Self::UTF_8.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_utf8(&self) -> bool {
        self.0 == Self::UTF_8
    }
}

impl fmt::Display for ResolvedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body bytes after decoding. When no decoder applied, `bytes` are the
/// original body and `transcoded` is false.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub bytes: Bytes,
    pub encoding: ResolvedEncoding,
    pub transcoded: bool,
}

impl DecodedDocument {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}
