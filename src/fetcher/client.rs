use crate::fetcher::{
    errors::FetchError,
    types::{FetchProfile, FetchSettings, RawDocument},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Client, ClientBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where page bytes come from. The content pipeline only talks to this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url` with the given request profile. Non-2xx responses are errors.
    async fn get(&self, url: &Url, profile: FetchProfile) -> Result<RawDocument, FetchError>;
}

/// reqwest-backed source holding one client per profile.
#[derive(Debug, Clone)]
pub struct HttpSource {
    primary: Client,
    fallback: Client,
    max_body_bytes: u64,
}

impl HttpSource {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let primary = profile_builder(FetchProfile::Primary)
            .timeout(settings.primary_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        // No redirect override: the library default applies.
        let fallback = profile_builder(FetchProfile::Fallback)
            .timeout(settings.fallback_timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            primary,
            fallback,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    pub fn client(&self, profile: FetchProfile) -> &Client {
        match profile {
            FetchProfile::Primary => &self.primary,
            FetchProfile::Fallback => &self.fallback,
        }
    }
}

fn profile_builder(profile: FetchProfile) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    for &(name, value) in profile.headers() {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    ClientBuilder::new()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(profile.user_agent())
        .default_headers(headers)
}

#[async_trait]
impl PageSource for HttpSource {
    #[instrument(skip_all, fields(url = %url, profile = %profile))]
    async fn get(&self, url: &Url, profile: FetchProfile) -> Result<RawDocument, FetchError> {
        let response = self
            .client(profile)
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > self.max_body_bytes
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let url_final = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check body size after download (in case Content-Length was missing)
        if body.len() as u64 > self.max_body_bytes {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        debug!(
            status = %status,
            bytes = body.len(),
            content_type = content_type.as_deref().unwrap_or(""),
            "received page body"
        );

        Ok(RawDocument {
            url_final,
            status,
            content_type,
            body,
            fetched_at: Utc::now(),
        })
    }
}

/// Convenience for one-off fetches with default limits.
pub async fn fetch(url: &str, profile: FetchProfile) -> Result<RawDocument, FetchError> {
    let url = Url::parse(url)?;
    HttpSource::new(&FetchSettings::default())?
        .get(&url, profile)
        .await
}
