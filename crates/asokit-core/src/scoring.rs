//! Popularity heuristics.
//!
//! Keyword scores are coarse buckets chosen by whether a store returned any
//! autocomplete suggestions for the keyword. The bucket values are tunable
//! through [`ScoringConfig`]; its `Default` reproduces the stock constants.

use crate::types::Suggestion;

/// Maximum suggestions either store contributes per keyword.
pub const MAX_SUGGESTIONS: usize = 10;

/// Floor applied to App Store suggestion scores.
const IOS_SCORE_FLOOR: u8 = 10;

/// Score of the Google Play suggestion at 1-indexed `position`:
/// `100 - 10 * (position - 1)`, saturating at zero.
#[must_use]
pub fn play_position_score(position: usize) -> u8 {
    let step = position.saturating_sub(1).saturating_mul(10);
    u8::try_from(100usize.saturating_sub(step)).unwrap_or(0)
}

/// Score of the App Store suggestion at 1-indexed `position`, never below 10.
#[must_use]
pub fn ios_position_score(position: usize) -> u8 {
    play_position_score(position).max(IOS_SCORE_FLOOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub gplay_with_suggestions: u8,
    pub gplay_without_suggestions: u8,
    pub ios_exact_match: u8,
    pub ios_related: u8,
    pub ios_no_data: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gplay_with_suggestions: 80,
            gplay_without_suggestions: 40,
            ios_exact_match: 95,
            ios_related: 70,
            ios_no_data: 20,
        }
    }
}

impl ScoringConfig {
    #[must_use]
    pub fn play_keyword_score(&self, suggestions: &[Suggestion]) -> u8 {
        if suggestions.is_empty() {
            self.gplay_without_suggestions
        } else {
            self.gplay_with_suggestions
        }
    }

    /// App Store keyword score. An exact, case-insensitive match between the
    /// keyword and any suggestion outranks merely having suggestions.
    #[must_use]
    pub fn ios_keyword_score(&self, keyword: &str, suggestions: &[Suggestion]) -> u8 {
        if suggestions.is_empty() {
            return self.ios_no_data;
        }
        let needle = keyword.to_lowercase();
        if suggestions.iter().any(|s| s.text.to_lowercase() == needle) {
            self.ios_exact_match
        } else {
            self.ios_related
        }
    }
}
