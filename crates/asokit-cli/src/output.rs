//! Report rendering for analysis results.

use asokit_core::types::NOT_RANKED;
use asokit_core::AnalysisRecord;
use clap::ValueEnum;

const KEYWORD_WIDTH: usize = 20;
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of records
    Json,
    /// Plain text summary table
    Table,
}

/// Render `records` in the requested format.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub(crate) fn render(
    records: &[AnalysisRecord],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

pub(crate) fn render_table(records: &[AnalysisRecord]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str("\nKeyword Analysis Results\n");
    out.push_str(&rule);
    out.push('\n');
    for record in records {
        let rank = record
            .rank
            .map_or_else(|| NOT_RANKED.to_string(), |r| r.to_string());
        out.push_str(&format!(
            "  {:<width$} Score: {}/100  Rank: {}\n",
            record.keyword,
            record.score,
            rank,
            width = KEYWORD_WIDTH
        ));
    }
    out.push_str(&rule);
    out
}
