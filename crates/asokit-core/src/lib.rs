//! Shared data model, scoring heuristics, and configuration for `asokit`.

pub mod app_config;
pub mod config;
pub mod keywords;
pub mod scoring;
pub mod storefront;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, BrowserSettings, GooglePlaySettings, IosSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::parse_keywords;
pub use scoring::{ios_position_score, play_position_score, ScoringConfig};
pub use storefront::storefront_for;
pub use types::{AnalysisRecord, Platform, Rank, Suggestion};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no keywords provided")]
    NoKeywords,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
