//! Parser for the App Store search-hints plist.
//!
//! The response is a property list whose `<string>` elements hold both the
//! suggested terms and metadata (a `Suggestions` title and hint URLs). Only
//! the terms are kept.

use asokit_core::scoring::MAX_SUGGESTIONS;
use asokit_core::{ios_position_score, Suggestion};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ScraperError;

const TITLE_LABEL: &str = "Suggestions";

/// Parse a hints body into at most ten scored suggestions, in document order.
///
/// # Errors
///
/// Returns [`ScraperError::Xml`] if the XML is malformed.
pub(crate) fn parse_hints(xml: &str) -> Result<Vec<Suggestion>, ScraperError> {
    let mut reader = Reader::from_str(xml);

    let mut suggestions = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"string" => {
                if depth == 0 {
                    current.clear();
                }
                depth += 1;
            }
            Event::End(e) if e.name().as_ref() == b"string" => {
                depth = depth.saturating_sub(1);
                if depth == 0 && is_term(&current) {
                    suggestions.push(Suggestion {
                        text: std::mem::take(&mut current),
                        score: ios_position_score(suggestions.len() + 1),
                    });
                    if suggestions.len() >= MAX_SUGGESTIONS {
                        break;
                    }
                }
            }
            Event::Text(e) if depth > 0 => {
                current.push_str(&e.unescape()?);
            }
            Event::CData(e) if depth > 0 => {
                current.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(suggestions)
}

fn is_term(text: &str) -> bool {
    !text.is_empty() && !text.starts_with("http") && text != TITLE_LABEL
}
