use super::*;

fn settings() -> GooglePlaySettings {
    GooglePlaySettings {
        search_url: "https://play.google.com/store/search".to_string(),
        page_timeout_secs: 5,
        results_timeout_secs: 10,
        scroll_passes: 3,
        scroll_settle_secs: 2,
    }
}

fn scraper() -> PlayStoreScraper {
    PlayStoreScraper::new(&settings()).expect("valid settings")
}

/// Page stand-in: answers element queries from canned attribute lists.
#[derive(Default)]
struct StaticPage {
    display_texts: Vec<Option<String>>,
    hrefs: Vec<Option<String>>,
    has_body: bool,
    has_links: bool,
    visited: Vec<String>,
    scripts: Vec<String>,
}

impl BrowserSession for StaticPage {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn wait_for(
        &mut self,
        condition: WaitCondition<'_>,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let ready = match condition {
            WaitCondition::ElementPresent("body") => self.has_body,
            WaitCondition::ElementPresent(_) => self.has_links,
            WaitCondition::DocumentReady => true,
        };
        if ready {
            Ok(())
        } else {
            Err(ScraperError::WaitTimeout {
                condition: condition.to_string(),
                timeout_secs: timeout.as_secs(),
            })
        }
    }

    async fn execute_script(
        &mut self,
        script: &str,
    ) -> Result<Option<serde_json::Value>, ScraperError> {
        self.scripts.push(script.to_string());
        Ok(None)
    }

    async fn find_elements(
        &mut self,
        selector: &str,
        _attribute: &str,
    ) -> Result<Vec<Option<String>>, ScraperError> {
        if selector == SUGGESTION_SELECTOR {
            Ok(self.display_texts.clone())
        } else {
            Ok(self.hrefs.clone())
        }
    }

    async fn quit(self) -> Result<(), ScraperError> {
        Ok(())
    }
}

fn texts(raw: &[&str]) -> Vec<Option<String>> {
    raw.iter().map(|t| Some((*t).to_string())).collect()
}

fn detail_links(ids: &[&str]) -> Vec<Option<String>> {
    ids.iter()
        .map(|id| Some(format!("/store/apps/details?id={id}&hl=en")))
        .collect()
}

#[test]
fn search_url_carries_keyword_and_country() {
    let url = scraper().search_url("live scores", "GB");
    assert_eq!(
        url.as_str(),
        "https://play.google.com/store/search?q=live+scores&c=apps&hl=en&gl=GB"
    );
}

#[test]
fn invalid_search_url_is_rejected() {
    let mut bad = settings();
    bad.search_url = "not a url".to_string();
    assert!(matches!(
        PlayStoreScraper::new(&bad),
        Err(ScraperError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn suggestions_are_scored_by_position() {
    let mut page = StaticPage {
        has_body: true,
        display_texts: texts(&["soccer", "soccer live", "soccer games"]),
        ..StaticPage::default()
    };

    let suggestions = scraper()
        .fetch_suggestions(&mut page, "soccer", "US")
        .await
        .unwrap();

    let scores: Vec<u8> = suggestions.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![100, 90, 80]);
    assert_eq!(suggestions[1].text, "soccer live");
    assert_eq!(page.visited.len(), 1);
}

#[tokio::test]
async fn empty_display_text_keeps_its_slot() {
    let mut page = StaticPage {
        has_body: true,
        display_texts: vec![Some("a".to_string()), Some(String::new()), None, Some("d".to_string())],
        ..StaticPage::default()
    };

    let suggestions = scraper()
        .fetch_suggestions(&mut page, "a", "US")
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[1].text, "d");
    assert_eq!(suggestions[1].score, 70);
}

#[tokio::test]
async fn suggestions_are_capped_at_ten() {
    let raw: Vec<String> = (0..15).map(|i| format!("kw {i}")).collect();
    let mut page = StaticPage {
        has_body: true,
        display_texts: raw.into_iter().map(Some).collect(),
        ..StaticPage::default()
    };

    let suggestions = scraper()
        .fetch_suggestions(&mut page, "kw", "US")
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 10);
    assert_eq!(suggestions[9].score, 10);
}

#[tokio::test]
async fn missing_body_is_a_timeout() {
    let mut page = StaticPage::default();
    let result = scraper().fetch_suggestions(&mut page, "soccer", "US").await;
    assert!(matches!(result, Err(ScraperError::WaitTimeout { .. })));
}

#[tokio::test]
async fn search_results_scroll_before_collecting() {
    let mut page = StaticPage {
        has_links: true,
        hrefs: detail_links(&["com.a", "com.b", "com.a", "com.c"]),
        ..StaticPage::default()
    };

    let ids = scraper()
        .fetch_search_results(&mut page, "soccer", "US", DEFAULT_SEARCH_LIMIT)
        .await
        .unwrap();

    assert_eq!(ids, vec!["com.a", "com.b", "com.c"]);
    assert_eq!(page.scripts.len(), 3);
    assert!(page.scripts.iter().all(|s| s == SCROLL_TO_BOTTOM));
}

#[tokio::test]
async fn search_results_without_links_fail() {
    let mut page = StaticPage {
        has_body: true,
        ..StaticPage::default()
    };
    let result = scraper()
        .fetch_search_results(&mut page, "soccer", "US", DEFAULT_SEARCH_LIMIT)
        .await;
    assert!(matches!(result, Err(ScraperError::WaitTimeout { .. })));
    assert!(page.scripts.is_empty());
}

#[tokio::test]
async fn rank_is_position_in_results() {
    let mut page = StaticPage {
        has_links: true,
        hrefs: detail_links(&["com.a", "com.b", "com.target"]),
        ..StaticPage::default()
    };
    let scraper = scraper();

    let found = scraper
        .rank(&mut page, "soccer", "com.target", "US")
        .await
        .unwrap();
    let missing = scraper
        .rank(&mut page, "soccer", "com.other", "US")
        .await
        .unwrap();

    assert_eq!(found, Rank::Position(3));
    assert_eq!(missing, Rank::NotRanked);
}

#[test]
fn collect_app_ids_stops_at_limit() {
    let hrefs = ["id=a", "id=b", "id=c"].iter().map(|s| (*s).to_string());
    assert_eq!(collect_app_ids(hrefs, 2), vec!["a", "b"]);
}

#[test]
fn collect_app_ids_skips_links_without_id() {
    let hrefs = [
        "https://play.google.com/store/apps/details?id=com.x&hl=en",
        "https://play.google.com/store/apps/dev",
        "https://play.google.com/store/apps/details?hl=en&id=com.y",
    ]
    .iter()
    .map(|s| (*s).to_string());
    assert_eq!(collect_app_ids(hrefs, 10), vec!["com.x", "com.y"]);
}
