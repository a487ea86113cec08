//! Per-keyword analysis runs.
//!
//! Keywords are processed one at a time. Fetch failures are logged and
//! collapsed to empty data so every keyword still yields exactly one
//! [`AnalysisRecord`].

use std::fmt;
use std::panic::AssertUnwindSafe;

use asokit_core::{AnalysisRecord, Platform, Rank, ScoringConfig, Suggestion};
use futures::FutureExt;

use crate::browser::BrowserSession;
use crate::error::ScraperError;
use crate::gplay::PlayStoreScraper;
use crate::ios::IosClient;

/// App Store records keep only the strongest suggestions.
const IOS_OUTPUT_SUGGESTIONS: usize = 5;

/// Inputs shared by every keyword in a run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    /// App to rank; `None` skips rank lookups and omits `rank` from records.
    pub app_id: Option<&'a str>,
    /// Country code, already normalized for the platform.
    pub country: &'a str,
}

/// Emitted before each keyword is analysed.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-indexed.
    pub current: usize,
    pub total: usize,
    pub keyword: &'a str,
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] Analyzing: {}",
            self.current, self.total, self.keyword
        )
    }
}

/// Analyse `keywords` on Google Play using `browser`.
///
/// The session is owned by the run and is always quit before returning,
/// including when the keyword loop panics (the panic is resumed after the
/// browser is closed).
pub async fn analyze_gplay<B, P>(
    mut browser: B,
    scraper: &PlayStoreScraper,
    scoring: &ScoringConfig,
    keywords: &[String],
    options: RunOptions<'_>,
    mut progress: P,
) -> Vec<AnalysisRecord>
where
    B: BrowserSession,
    P: FnMut(Progress<'_>),
{
    tracing::info!(keywords = keywords.len(), "starting google play analysis");

    let run = gplay_keywords(
        &mut browser,
        scraper,
        scoring,
        keywords,
        options,
        &mut progress,
    );
    let outcome = AssertUnwindSafe(run).catch_unwind().await;

    if let Err(e) = browser.quit().await {
        tracing::warn!(error = %e, "failed to close browser cleanly");
    }

    match outcome {
        Ok(records) => records,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

async fn gplay_keywords<B, P>(
    browser: &mut B,
    scraper: &PlayStoreScraper,
    scoring: &ScoringConfig,
    keywords: &[String],
    options: RunOptions<'_>,
    progress: &mut P,
) -> Vec<AnalysisRecord>
where
    B: BrowserSession,
    P: FnMut(Progress<'_>),
{
    let mut records = Vec::with_capacity(keywords.len());

    for (idx, keyword) in keywords.iter().enumerate() {
        progress(Progress {
            current: idx + 1,
            total: keywords.len(),
            keyword,
        });

        let suggestions = or_empty(
            scraper
                .fetch_suggestions(browser, keyword, options.country)
                .await,
            keyword,
        );
        let score = scoring.play_keyword_score(&suggestions);

        let rank = match options.app_id {
            Some(app_id) => Some(or_not_ranked(
                scraper
                    .rank(browser, keyword, app_id, options.country)
                    .await,
                keyword,
            )),
            None => None,
        };

        records.push(AnalysisRecord {
            keyword: keyword.clone(),
            platform: Platform::Gplay,
            country: options.country.to_owned(),
            score,
            suggestions,
            rank,
        });
    }

    records
}

/// Analyse `keywords` on the App Store. Each request is independent.
pub async fn analyze_ios<P>(
    client: &IosClient,
    scoring: &ScoringConfig,
    keywords: &[String],
    options: RunOptions<'_>,
    mut progress: P,
) -> Vec<AnalysisRecord>
where
    P: FnMut(Progress<'_>),
{
    tracing::info!(keywords = keywords.len(), "starting app store analysis");
    let mut records = Vec::with_capacity(keywords.len());

    for (idx, keyword) in keywords.iter().enumerate() {
        progress(Progress {
            current: idx + 1,
            total: keywords.len(),
            keyword,
        });

        let mut suggestions = or_empty(
            client.fetch_autocomplete(keyword, options.country).await,
            keyword,
        );
        let score = scoring.ios_keyword_score(keyword, &suggestions);
        suggestions.truncate(IOS_OUTPUT_SUGGESTIONS);

        let rank = match options.app_id {
            Some(app_id) => Some(or_not_ranked(
                client.rank(keyword, app_id, options.country).await,
                keyword,
            )),
            None => None,
        };

        records.push(AnalysisRecord {
            keyword: keyword.clone(),
            platform: Platform::Ios,
            country: options.country.to_owned(),
            score,
            suggestions,
            rank,
        });
    }

    records
}

fn or_empty(result: Result<Vec<Suggestion>, ScraperError>, keyword: &str) -> Vec<Suggestion> {
    result.unwrap_or_else(|e| {
        tracing::warn!(keyword, error = %e, "suggestion fetch failed; continuing with no data");
        Vec::new()
    })
}

fn or_not_ranked(result: Result<Rank, ScraperError>, keyword: &str) -> Rank {
    result.unwrap_or_else(|e| {
        tracing::warn!(keyword, error = %e, "rank lookup failed; reporting not ranked");
        Rank::NotRanked
    })
}
