//! ISO 3166-1 alpha-2 country code normalization and EU membership.

use super::error::PricingError;

/// EU member state country codes (ISO 3166-1 alpha-2), sorted for binary search.
static EU_MEMBER_STATES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IE", "IT",
    "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Trim and uppercase a country code, rejecting anything that is not two ASCII letters.
///
/// `field` names the input in the returned error.
pub fn normalize_country_code(field: &str, code: &str) -> Result<String, PricingError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(PricingError::invalid(field, "country code is required"));
    }
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PricingError::invalid(
            field,
            format_args!("'{code}' is not an ISO 3166-1 alpha-2 code"),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

/// Whether `code` (already normalized) is an EU member state.
pub fn is_eu_member(code: &str) -> bool {
    EU_MEMBER_STATES.binary_search(&code).is_ok()
}

/// Map a VAT identifier prefix to its ISO country code.
///
/// Greece issues VAT numbers prefixed `EL`; every other member state uses its ISO code.
pub fn country_for_vat_prefix(prefix: &str) -> &str {
    match prefix {
        "EL" => "GR",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_country_code("c", " si ").unwrap(), "SI");
        assert_eq!(normalize_country_code("c", "De").unwrap(), "DE");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(normalize_country_code("c", "").is_err());
        assert!(normalize_country_code("c", "   ").is_err());
        assert!(normalize_country_code("c", "SVN").is_err());
        assert!(normalize_country_code("c", "S1").is_err());
    }

    #[test]
    fn eu_membership() {
        assert!(is_eu_member("SI"));
        assert!(is_eu_member("GR"));
        assert!(!is_eu_member("CH"));
        assert!(!is_eu_member("GB"));
        assert!(!is_eu_member("si"));
    }

    #[test]
    fn greek_prefix() {
        assert_eq!(country_for_vat_prefix("EL"), "GR");
        assert_eq!(country_for_vat_prefix("DE"), "DE");
    }

    #[test]
    fn member_list_is_sorted() {
        for window in EU_MEMBER_STATES.windows(2) {
            assert!(
                window[0] < window[1],
                "member states not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
        assert_eq!(EU_MEMBER_STATES.len(), 27);
    }
}
