//! HTTP client for the App Store search hints and iTunes search endpoints.
//!
//! Each call is an independent request with its own timeout; the client
//! holds no per-run state beyond the connection pool.

mod hints;

use std::time::Duration;

use asokit_core::{storefront_for, IosSettings, Rank, Suggestion};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ScraperError;

pub const DEFAULT_SEARCH_LIMIT: u32 = 100;
pub const RANK_SEARCH_LIMIT: u32 = 200;

const STOREFRONT_HEADER: &str = "X-Apple-Store-Front";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "trackId")]
    track_id: u64,
}

/// Client for Apple's keyword endpoints.
///
/// Use [`IosClient::new`] with loaded settings, or
/// [`IosClient::with_endpoints`] to point at a mock server in tests.
pub struct IosClient {
    client: Client,
    hints_url: Url,
    search_url: Url,
    hints_timeout: Duration,
    search_timeout: Duration,
}

impl IosClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ScraperError::InvalidUrl`] for an unparseable endpoint.
    pub fn new(settings: &IosSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            hints_url: parse_endpoint(&settings.hints_url)?,
            search_url: parse_endpoint(&settings.search_url)?,
            hints_timeout: Duration::from_secs(settings.hints_timeout_secs),
            search_timeout: Duration::from_secs(settings.search_timeout_secs),
        })
    }

    /// Creates a client with default timeouts against custom endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ScraperError::InvalidUrl`] for an unparseable endpoint.
    pub fn with_endpoints(hints_url: &str, search_url: &str) -> Result<Self, ScraperError> {
        Self::new(&IosSettings {
            hints_url: hints_url.to_owned(),
            search_url: search_url.to_owned(),
            hints_timeout_secs: 10,
            search_timeout_secs: 15,
            user_agent: "asokit/0.1 (keyword-research)".to_string(),
        })
    }

    /// Fetches up to ten autocomplete hints for `keyword` from the
    /// storefront that matches `country`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ScraperError::Xml`] if the body is not well-formed XML.
    pub async fn fetch_autocomplete(
        &self,
        keyword: &str,
        country: &str,
    ) -> Result<Vec<Suggestion>, ScraperError> {
        let mut url = self.hints_url.clone();
        url.query_pairs_mut()
            .append_pair("clientApplication", "Software")
            .append_pair("term", keyword);

        let storefront = storefront_for(country);
        tracing::debug!(keyword, storefront, "requesting search hints");

        let response = self
            .client
            .get(url.clone())
            .header(STOREFRONT_HEADER, storefront)
            .timeout(self.hints_timeout)
            .send()
            .await?;
        let body = Self::success_body(response, &url).await?;
        hints::parse_hints(&body)
    }

    /// Fetches the track ids returned by the iTunes search API, in API order.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ScraperError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_search_results(
        &self,
        keyword: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<String>, ScraperError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("term", keyword)
            .append_pair("country", country)
            .append_pair("entity", "software")
            .append_pair("limit", &limit.to_string());

        let response = self
            .client
            .get(url.clone())
            .timeout(self.search_timeout)
            .send()
            .await?;
        let body = Self::success_body(response, &url).await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("search results for \"{keyword}\""),
                source: e,
            })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| r.track_id.to_string())
            .collect())
    }

    /// Position of `app_id` among the first 200 search results.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_search_results`].
    pub async fn rank(
        &self,
        keyword: &str,
        app_id: &str,
        country: &str,
    ) -> Result<Rank, ScraperError> {
        let results = self
            .fetch_search_results(keyword, country, RANK_SEARCH_LIMIT)
            .await?;
        Ok(Rank::locate(&results, app_id.trim()))
    }

    async fn success_body(response: reqwest::Response, url: &Url) -> Result<String, ScraperError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ScraperError> {
    Url::parse(raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}
