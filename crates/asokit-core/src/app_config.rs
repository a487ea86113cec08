use std::path::PathBuf;

use crate::scoring::ScoringConfig;

pub const DEFAULT_BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// App Store endpoints and per-request timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IosSettings {
    pub hints_url: String,
    pub search_url: String,
    pub hints_timeout_secs: u64,
    pub search_timeout_secs: u64,
    pub user_agent: String,
}

/// Google Play search page and the waits used while scraping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GooglePlaySettings {
    pub search_url: String,
    pub page_timeout_secs: u64,
    pub results_timeout_secs: u64,
    pub scroll_passes: u32,
    pub scroll_settle_secs: u64,
}

/// Headless browser launch options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// `None` lets the driver search the usual install locations.
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub ios: IosSettings,
    pub gplay: GooglePlaySettings,
    pub browser: BrowserSettings,
    pub scoring: ScoringConfig,
}
