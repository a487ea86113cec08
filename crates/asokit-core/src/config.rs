use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{
    AppConfig, BrowserSettings, GooglePlaySettings, IosSettings, DEFAULT_BROWSER_USER_AGENT,
};
use crate::scoring::ScoringConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("ASOKIT_LOG_LEVEL", "warn");

    let ios = IosSettings {
        hints_url: or_default(
            "ASOKIT_IOS_HINTS_URL",
            "https://search.itunes.apple.com/WebObjects/MZSearchHints.woa/wa/hints",
        ),
        search_url: or_default("ASOKIT_IOS_SEARCH_URL", "https://itunes.apple.com/search"),
        hints_timeout_secs: parse_var(&or_default, "ASOKIT_IOS_HINTS_TIMEOUT_SECS", "10")?,
        search_timeout_secs: parse_var(&or_default, "ASOKIT_IOS_SEARCH_TIMEOUT_SECS", "15")?,
        user_agent: or_default("ASOKIT_HTTP_USER_AGENT", "asokit/0.1 (keyword-research)"),
    };

    let gplay = GooglePlaySettings {
        search_url: or_default(
            "ASOKIT_GPLAY_SEARCH_URL",
            "https://play.google.com/store/search",
        ),
        page_timeout_secs: parse_var(&or_default, "ASOKIT_GPLAY_PAGE_TIMEOUT_SECS", "5")?,
        results_timeout_secs: parse_var(&or_default, "ASOKIT_GPLAY_RESULTS_TIMEOUT_SECS", "10")?,
        scroll_passes: parse_var(&or_default, "ASOKIT_GPLAY_SCROLL_PASSES", "3")?,
        scroll_settle_secs: parse_var(&or_default, "ASOKIT_GPLAY_SCROLL_SETTLE_SECS", "2")?,
    };

    let browser = BrowserSettings {
        chrome_executable: lookup("ASOKIT_CHROME_EXECUTABLE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from),
        user_agent: or_default("ASOKIT_BROWSER_USER_AGENT", DEFAULT_BROWSER_USER_AGENT),
    };

    let defaults = ScoringConfig::default();
    let score = |var: &str, default: u8| -> Result<u8, ConfigError> {
        let value: u8 = parse_var(&or_default, var, &default.to_string())?;
        if value > 100 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("score {value} is above 100"),
            });
        }
        Ok(value)
    };
    let scoring = ScoringConfig {
        gplay_with_suggestions: score(
            "ASOKIT_SCORE_GPLAY_WITH_SUGGESTIONS",
            defaults.gplay_with_suggestions,
        )?,
        gplay_without_suggestions: score(
            "ASOKIT_SCORE_GPLAY_WITHOUT_SUGGESTIONS",
            defaults.gplay_without_suggestions,
        )?,
        ios_exact_match: score("ASOKIT_SCORE_IOS_EXACT_MATCH", defaults.ios_exact_match)?,
        ios_related: score("ASOKIT_SCORE_IOS_RELATED", defaults.ios_related)?,
        ios_no_data: score("ASOKIT_SCORE_IOS_NO_DATA", defaults.ios_no_data)?,
    };

    Ok(AppConfig {
        log_level,
        ios,
        gplay,
        browser,
        scoring,
    })
}

fn parse_var<T, D>(or_default: &D, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Fn(&str, &str) -> String,
{
    let raw = or_default(var, default);
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
