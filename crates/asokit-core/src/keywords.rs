use crate::CoreError;

/// Splits a comma-separated keyword argument into an ordered list.
///
/// Each token is trimmed and empty tokens are dropped. Order and case are
/// preserved, and duplicates are kept.
///
/// # Errors
///
/// Returns [`CoreError::NoKeywords`] when nothing is left after trimming.
pub fn parse_keywords(raw: &str) -> Result<Vec<String>, CoreError> {
    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect();

    if keywords.is_empty() {
        return Err(CoreError::NoKeywords);
    }
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_tokens_and_trims() {
        let keywords = parse_keywords("a, , b ,c").unwrap();
        assert_eq!(keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn preserves_case_and_duplicates() {
        let keywords = parse_keywords("Soccer,soccer, Soccer").unwrap();
        assert_eq!(keywords, vec!["Soccer", "soccer", "Soccer"]);
    }

    #[test]
    fn keeps_inner_whitespace() {
        let keywords = parse_keywords("  live scores ,football").unwrap();
        assert_eq!(keywords, vec!["live scores", "football"]);
    }

    #[test]
    fn only_separators_is_an_error() {
        assert!(matches!(parse_keywords(" , ,,"), Err(CoreError::NoKeywords)));
        assert!(matches!(parse_keywords(""), Err(CoreError::NoKeywords)));
    }
}
