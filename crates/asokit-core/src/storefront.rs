/// App Store storefront identifiers sent in `X-Apple-Store-Front`.
const STOREFRONTS: &[(&str, &str)] = &[
    ("us", "143441-1,29"),
    ("gb", "143444-1,29"),
    ("uk", "143444-1,29"),
    ("ca", "143455-1,29"),
    ("au", "143460-1,29"),
    ("de", "143443-1,29"),
    ("fr", "143442-1,29"),
];

const DEFAULT_STOREFRONT: &str = "143441-1,29";

/// Maps a country code to its storefront; unknown codes fall back to the US.
#[must_use]
pub fn storefront_for(country: &str) -> &'static str {
    let country = country.to_ascii_lowercase();
    STOREFRONTS
        .iter()
        .find(|(code, _)| *code == country)
        .map_or(DEFAULT_STOREFRONT, |(_, front)| front)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(storefront_for("de"), "143443-1,29");
        assert_eq!(storefront_for("au"), "143460-1,29");
    }

    #[test]
    fn gb_and_uk_share_a_storefront() {
        assert_eq!(storefront_for("gb"), storefront_for("uk"));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(storefront_for("FR"), "143442-1,29");
    }

    #[test]
    fn unknown_code_falls_back_to_us() {
        assert_eq!(storefront_for("jp"), "143441-1,29");
        assert_eq!(storefront_for(""), "143441-1,29");
    }
}
