//! Article content retrieval: fetch, decode, extract, clean.
//!
//! A fetch runs as a two-state machine. The primary stage uses the full
//! browser-like request and density-based extraction; when that yields
//! nothing usable the fallback stage refetches with a plainer request and
//! selector-based extraction. Nothing here returns an error: every failure
//! ends in the [`NO_CONTENT`] sentinel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::extractor::{Cleaner, GarbleDetector, is_binary, reader};
use crate::fetcher::{
    DecodedDocument, FailureKind, FetchError, FetchProfile, HttpSource, PageSource,
    decode_document,
};

/// Shown in place of article content when nothing could be extracted.
pub const NO_CONTENT: &str = "No content available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStage {
    Primary,
    Fallback,
}

impl ExtractionStage {
    fn profile(self) -> FetchProfile {
        match self {
            Self::Primary => FetchProfile::Primary,
            Self::Fallback => FetchProfile::Fallback,
        }
    }
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Result of one content fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentOutcome {
    /// Cleaned markup, or [`NO_CONTENT`].
    pub content: String,
    /// Stage the fetch ended in.
    pub stage: ExtractionStage,
    /// False when `content` is the sentinel.
    pub available: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ContentOutcome {
    fn extracted(content: String, stage: ExtractionStage, fetched_at: DateTime<Utc>) -> Self {
        Self {
            content,
            stage,
            available: true,
            fetched_at: Some(fetched_at),
        }
    }

    fn unavailable(stage: ExtractionStage) -> Self {
        Self {
            content: NO_CONTENT.to_string(),
            stage,
            available: false,
            fetched_at: None,
        }
    }
}

/// What the primary stage decided.
enum Transition {
    Done(ContentOutcome),
    Fallback,
    Abort,
}

/// A decoded page ready for extraction.
struct LoadedPage {
    decoded: DecodedDocument,
    base_url: Url,
    fetched_at: DateTime<Utc>,
}

/// Entry point used by the application to turn an article URL into content.
#[derive(Clone)]
pub struct ContentPipeline<S> {
    source: S,
    detector: GarbleDetector,
    cleaner: Cleaner,
}

impl ContentPipeline<HttpSource> {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let source = HttpSource::new(&config.fetch_settings())?;
        Ok(Self::new(source, config.garble_detector(), config.cleaner()))
    }
}

impl<S: PageSource> ContentPipeline<S> {
    pub fn new(source: S, detector: GarbleDetector, cleaner: Cleaner) -> Self {
        Self {
            source,
            detector,
            cleaner,
        }
    }

    /// Pipeline with default garble threshold and cleaner settings.
    pub fn with_source(source: S) -> Self {
        Self::new(source, GarbleDetector::default(), Cleaner::default())
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_content(&self, url: &str) -> ContentOutcome {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                let error = FetchError::from(e);
                warn!(kind = %error.kind(), error = %error, "rejecting article url");
                return ContentOutcome::unavailable(ExtractionStage::Primary);
            }
        };

        let outcome = match self.run_primary(&url).await {
            Transition::Done(outcome) => outcome,
            Transition::Abort => ContentOutcome::unavailable(ExtractionStage::Primary),
            Transition::Fallback => self.run_fallback(&url).await,
        };

        info!(
            stage = %outcome.stage,
            available = outcome.available,
            len = outcome.content.len(),
            "content fetch finished"
        );
        outcome
    }

    /// Content string only, sentinel included.
    pub async fn fetch_article_content(&self, url: &str) -> String {
        self.fetch_content(url).await.content
    }

    async fn run_primary(&self, url: &Url) -> Transition {
        let stage = ExtractionStage::Primary;
        let Some(page) = self.load(url, stage).await else {
            return Transition::Abort;
        };

        let html = page.decoded.text();
        let result = match reader::primary(&html, &page.base_url) {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "primary extraction unavailable, falling back");
                return Transition::Fallback;
            }
        };

        let content = self.cleaner.clean(&result.content);
        if self.detector.is_garbled(&content) {
            warn!(
                kind = %FailureKind::Rejected,
                encoding = %page.decoded.encoding,
                chars = content.chars().count(),
                "primary content garbled, falling back"
            );
            return Transition::Fallback;
        }

        Transition::Done(ContentOutcome::extracted(content, stage, page.fetched_at))
    }

    /// Fallback output is returned as is, garbled or not.
    async fn run_fallback(&self, url: &Url) -> ContentOutcome {
        let stage = ExtractionStage::Fallback;
        let Some(page) = self.load(url, stage).await else {
            return ContentOutcome::unavailable(stage);
        };

        let result = reader::fallback(&page.decoded.text(), &page.base_url);
        let content = self.cleaner.clean(&result.content);
        ContentOutcome::extracted(content, stage, page.fetched_at)
    }

    /// Fetches and decodes `url` for `stage`, rejecting binary payloads.
    async fn load(&self, url: &Url, stage: ExtractionStage) -> Option<LoadedPage> {
        let raw = match self.source.get(url, stage.profile()).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(kind = %e.kind(), stage = %stage, error = %e, "page fetch failed");
                return None;
            }
        };

        if is_binary(&raw.body) {
            warn!(
                kind = %FailureKind::Rejected,
                stage = %stage,
                bytes = raw.body.len(),
                content_type = raw.content_type.as_deref().unwrap_or(""),
                "binary page body rejected"
            );
            return None;
        }

        let decoded = decode_document(&raw);
        if decoded.transcoded && is_binary(&decoded.bytes) {
            warn!(
                kind = %FailureKind::Rejected,
                stage = %stage,
                encoding = %decoded.encoding,
                bytes = decoded.bytes.len(),
                "decoded page body rejected as binary"
            );
            return None;
        }

        debug!(
            stage = %stage,
            encoding = %decoded.encoding,
            transcoded = decoded.transcoded,
            bytes = decoded.bytes.len(),
            "page decoded"
        );

        Some(LoadedPage {
            decoded,
            base_url: raw.url_final,
            fetched_at: raw.fetched_at,
        })
    }
}
