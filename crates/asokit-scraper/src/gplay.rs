//! Google Play search page scraping.
//!
//! Suggestions come from elements carrying a `data-display-text` attribute on
//! the search page. Rankings come from the order of app detail links, after a
//! few scroll-to-bottom passes to trigger lazy loading.

use std::collections::HashSet;
use std::time::Duration;

use asokit_core::{play_position_score, GooglePlaySettings, Rank, Suggestion};
use regex::Regex;
use reqwest::Url;

use crate::browser::{BrowserSession, WaitCondition};
use crate::error::ScraperError;

const SUGGESTION_SELECTOR: &str = "[data-display-text]";
const SUGGESTION_ATTRIBUTE: &str = "data-display-text";
const DETAIL_LINK_SELECTOR: &str = "a[href*=\"/store/apps/details\"]";
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

pub const DEFAULT_SEARCH_LIMIT: usize = 50;
pub const RANK_SEARCH_LIMIT: usize = 100;

const MAX_SUGGESTIONS: usize = asokit_core::scoring::MAX_SUGGESTIONS;

pub struct PlayStoreScraper {
    search_url: Url,
    page_timeout: Duration,
    results_timeout: Duration,
    scroll_passes: u32,
    scroll_settle: Duration,
}

impl PlayStoreScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured search URL does
    /// not parse.
    pub fn new(settings: &GooglePlaySettings) -> Result<Self, ScraperError> {
        let search_url =
            Url::parse(&settings.search_url).map_err(|e| ScraperError::InvalidUrl {
                url: settings.search_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            search_url,
            page_timeout: Duration::from_secs(settings.page_timeout_secs),
            results_timeout: Duration::from_secs(settings.results_timeout_secs),
            scroll_passes: settings.scroll_passes,
            scroll_settle: Duration::from_secs(settings.scroll_settle_secs),
        })
    }

    /// Builds `<search_url>?q=<keyword>&c=apps&hl=en&gl=<country>`.
    #[must_use]
    pub fn search_url(&self, keyword: &str, country: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("c", "apps")
            .append_pair("hl", "en")
            .append_pair("gl", country);
        url
    }

    /// Fetches up to ten autocomplete suggestions for `keyword`.
    ///
    /// Scores follow element position, so an element with an empty display
    /// text is skipped but still consumes its slot.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::WaitTimeout`] if the page body never appears,
    /// or [`ScraperError::Browser`] if navigation or the element query fails.
    pub async fn fetch_suggestions<B: BrowserSession>(
        &self,
        browser: &mut B,
        keyword: &str,
        country: &str,
    ) -> Result<Vec<Suggestion>, ScraperError> {
        let url = self.search_url(keyword, country);
        browser.navigate(url.as_str()).await?;
        browser
            .wait_for(WaitCondition::ElementPresent("body"), self.page_timeout)
            .await?;

        let texts = browser
            .find_elements(SUGGESTION_SELECTOR, SUGGESTION_ATTRIBUTE)
            .await?;

        let suggestions = texts
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .enumerate()
            .filter_map(|(idx, text)| {
                text.filter(|t| !t.is_empty()).map(|text| Suggestion {
                    text,
                    score: play_position_score(idx + 1),
                })
            })
            .collect();
        Ok(suggestions)
    }

    /// Fetches the ordered, de-duplicated app ids shown for `keyword`,
    /// stopping after `limit` unique ids.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::WaitTimeout`] if no detail link appears in
    /// time, or [`ScraperError::Browser`] if navigation or a query fails.
    pub async fn fetch_search_results<B: BrowserSession>(
        &self,
        browser: &mut B,
        keyword: &str,
        country: &str,
        limit: usize,
    ) -> Result<Vec<String>, ScraperError> {
        let url = self.search_url(keyword, country);
        browser.navigate(url.as_str()).await?;
        browser
            .wait_for(
                WaitCondition::ElementPresent(DETAIL_LINK_SELECTOR),
                self.results_timeout,
            )
            .await?;

        for pass in 0..self.scroll_passes {
            browser.execute_script(SCROLL_TO_BOTTOM).await?;
            if let Err(e) = browser
                .wait_for(WaitCondition::DocumentReady, self.scroll_settle)
                .await
            {
                tracing::debug!(keyword, pass, error = %e, "page did not settle after scroll");
            }
        }

        let hrefs = browser.find_elements(DETAIL_LINK_SELECTOR, "href").await?;
        Ok(collect_app_ids(hrefs.into_iter().flatten(), limit))
    }

    /// Position of `app_id` among the first 100 results for `keyword`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_search_results`].
    pub async fn rank<B: BrowserSession>(
        &self,
        browser: &mut B,
        keyword: &str,
        app_id: &str,
        country: &str,
    ) -> Result<Rank, ScraperError> {
        let results = self
            .fetch_search_results(browser, keyword, country, RANK_SEARCH_LIMIT)
            .await?;
        Ok(Rank::locate(&results, app_id))
    }
}

/// Extracts the `id=` parameter from detail-link URLs, keeping first-seen
/// order and dropping repeats.
pub(crate) fn collect_app_ids<I>(hrefs: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let re = Regex::new(r"id=([^&]+)").expect("valid app id regex");
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for href in hrefs {
        if ids.len() >= limit {
            break;
        }
        let Some(id) = re.captures(&href).and_then(|c| c.get(1)) else {
            continue;
        };
        let id = id.as_str().to_owned();
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
#[path = "gplay_test.rs"]
mod tests;
