use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Label emitted in place of a position when the app was not found.
pub const NOT_RANKED: &str = "Not ranked";

/// App store analysed by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Gplay,
    Ios,
}

impl Platform {
    /// Normalizes a user-supplied country code for this platform.
    ///
    /// The App Store endpoints expect lowercase codes; Google Play receives the
    /// value exactly as given.
    #[must_use]
    pub fn normalize_country(self, country: &str) -> String {
        match self {
            Platform::Gplay => country.to_owned(),
            Platform::Ios => country.to_lowercase(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Gplay => write!(f, "gplay"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// One autocomplete suggestion with its position-derived score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "keyword")]
    pub text: String,
    pub score: u8,
}

/// An app's position in a store's search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRank")]
pub enum Rank {
    /// 1-indexed position.
    Position(u32),
    NotRanked,
}

impl Rank {
    /// Locates `target` in an ordered list of app identifiers.
    #[must_use]
    pub fn locate(results: &[String], target: &str) -> Self {
        results
            .iter()
            .position(|id| id == target)
            .and_then(|idx| u32::try_from(idx + 1).ok())
            .map_or(Rank::NotRanked, Rank::Position)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Position(n) => write!(f, "#{n}"),
            Rank::NotRanked => f.write_str(NOT_RANKED),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rank::Position(n) => serializer.serialize_u32(*n),
            Rank::NotRanked => serializer.serialize_str(NOT_RANKED),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRank {
    Position(u32),
    Label(String),
}

impl TryFrom<RawRank> for Rank {
    type Error = String;

    fn try_from(raw: RawRank) -> Result<Self, Self::Error> {
        match raw {
            RawRank::Position(0) => Err("rank positions start at 1".to_string()),
            RawRank::Position(n) => Ok(Rank::Position(n)),
            RawRank::Label(label) if label == NOT_RANKED => Ok(Rank::NotRanked),
            RawRank::Label(label) => Err(format!("unknown rank label \"{label}\"")),
        }
    }
}

/// Result of analysing one keyword on one platform.
///
/// `rank` is only present when the run was given an app identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub keyword: String,
    pub platform: Platform,
    pub country: String,
    pub score: u8,
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}
