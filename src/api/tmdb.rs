//! TMDB (The Movie Database) API client
//!
//! Search and trending pools for movies and TV shows.
//! API docs: https://developer.themoviedb.org/docs
//!
//! One HTTP request per call, no caching, no retries. Without a credential
//! the client never touches the network and answers from the sample catalog.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::samples;
use crate::models::{ContentKind, SearchKind, SearchableItem};

/// Default TMDB API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Maximum number of search results kept per query
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl TmdbError {
    /// HTTP status for status-carrying errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TmdbError::Status(status) | TmdbError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TmdbError>;

/// How requests authenticate against TMDB
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// v4 read access token, sent as a bearer header
    AccessToken(String),
    /// v3 key, sent as the `api_key` query parameter
    ApiKey(String),
    /// Nothing configured: answer from the sample catalog
    #[default]
    None,
}

impl Credential {
    /// Pick the bearer token over the v3 key; blank values count as absent
    pub fn from_parts(access_token: Option<&str>, api_key: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        match (present(access_token), present(api_key)) {
            (Some(token), _) => Credential::AccessToken(token),
            (None, Some(key)) => Credential::ApiKey(key),
            (None, None) => Credential::None,
        }
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, Credential::None)
    }
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    credential: Credential,
    base_url: String,
    language: String,
    include_adult: bool,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a client against the public TMDB API
    pub fn new(credential: Credential) -> Self {
        Self::with_base_url(credential, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(credential: Credential, base_url: impl Into<String>) -> Self {
        Self {
            credential,
            base_url: base_url.into(),
            language: "en-GB".to_string(),
            include_adult: false,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Set the `language` parameter sent with every request
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the `include_adult` parameter sent with every request
    pub fn with_include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Build the full request URL, encoding every parameter
    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let include_adult = if self.include_adult { "true" } else { "false" };
        let mut pairs: Vec<(&str, &str)> = vec![
            ("language", self.language.as_str()),
            ("include_adult", include_adult),
        ];
        pairs.extend_from_slice(params);
        if let Credential::ApiKey(key) = &self.credential {
            pairs.push(("api_key", key.as_str()));
        }

        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}{}?{}", self.base_url, endpoint, query)
    }

    /// Make one authenticated GET request and decode the body
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint, params);
        debug!(endpoint, "TMDB request");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json");
        if let Credential::AccessToken(token) = &self.credential {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.status_message)
                .filter(|m| !m.trim().is_empty());
            warn!(endpoint, status = status.as_u16(), "TMDB request rejected");
            return Err(match message {
                Some(message) => TmdbError::Rejected {
                    status: status.as_u16(),
                    message,
                },
                None => TmdbError::Status(status.as_u16()),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Search movies and/or TV shows.
    ///
    /// The query is trimmed; an empty query returns nothing without a request.
    /// Results keep API order, drop non-movie/tv entries, and are capped at
    /// [`SEARCH_RESULT_LIMIT`].
    pub async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<SearchableItem>> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        if !self.has_credential() {
            debug!(term, "no TMDB credential, searching sample catalog");
            return Ok(samples::search_samples(term, kind));
        }

        let endpoint = format!("/search/{}", kind.endpoint());
        let response: ListResponse = self.get(&endpoint, &[("query", term)]).await?;
        let mut items = response.into_items(kind.fixed_kind());
        items.truncate(SEARCH_RESULT_LIMIT);
        Ok(items)
    }

    /// Today's trending pool for a content kind (uncapped; callers slice)
    pub async fn trending(&self, kind: ContentKind) -> Result<Vec<SearchableItem>> {
        if !self.has_credential() {
            debug!(kind = kind.as_param(), "no TMDB credential, using sample trending");
            return Ok(vec![samples::sample_item(kind)]);
        }

        let endpoint = format!("/trending/{}/day", kind.as_param());
        let response: ListResponse = self.get(&endpoint, &[]).await?;
        Ok(response.into_items(Some(kind)))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<ItemRaw>,
}

impl ListResponse {
    fn into_items(self, endpoint_kind: Option<ContentKind>) -> Vec<SearchableItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_item(endpoint_kind))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ItemRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl ItemRaw {
    /// Resolve the media kind: explicit tag, then endpoint, then title/name shape
    fn kind(&self, endpoint_kind: Option<ContentKind>) -> Option<ContentKind> {
        match self.media_type.as_deref() {
            Some("movie") => Some(ContentKind::Movie),
            Some("tv") => Some(ContentKind::Series),
            Some(_) => None, // "person" and anything else
            None => endpoint_kind.or_else(|| {
                if self.title.is_some() {
                    Some(ContentKind::Movie)
                } else if self.name.is_some() {
                    Some(ContentKind::Series)
                } else {
                    None
                }
            }),
        }
    }

    fn into_item(self, endpoint_kind: Option<ContentKind>) -> Option<SearchableItem> {
        let kind = self.kind(endpoint_kind)?;

        let (title, date) = match kind {
            ContentKind::Movie => (self.title.or(self.name), self.release_date),
            ContentKind::Series => (self.name.or(self.title), self.first_air_date),
        };

        Some(SearchableItem {
            id: self.id,
            kind,
            title: title.unwrap_or_default(),
            overview: non_empty(self.overview),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            date_label: non_empty(date),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
