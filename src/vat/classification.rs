//! Derive a [`BuyerClassification`] from the VAT-validation outcome.

use serde::{Deserialize, Serialize};

use crate::core::{BuyerClassification, PricingError, country_for_vat_prefix, normalize_country_code};

/// Outcome of an external VAT-number validation (e.g. a VIES lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatValidation {
    pub valid: bool,
    /// Country the number is registered in, when the validator reports it.
    /// VAT prefixes are accepted ("EL" for Greece).
    pub country_code: Option<String>,
}

impl VatValidation {
    pub fn valid_in(country_code: impl Into<String>) -> Self {
        Self {
            valid: true,
            country_code: Some(country_code.into()),
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            country_code: None,
        }
    }
}

/// Classify a buyer for the VAT decision.
///
/// The VAT number counts as validated only when `validation` is present, says
/// `valid`, and (if it reports a country) that country is the buyer's country.
/// A consumer keeps `vat_number_validated = false` regardless of the outcome.
pub fn classify_buyer(
    is_b2b: bool,
    buyer_country_code: &str,
    seller_country_code: &str,
    validation: Option<&VatValidation>,
) -> Result<BuyerClassification, PricingError> {
    let buyer = normalize_country_code("buyer_country_code", buyer_country_code)?;

    let validated = match validation {
        Some(v) if is_b2b && v.valid => match v.country_code.as_deref() {
            Some(reported) => {
                let reported = normalize_country_code("validation.country_code", reported)?;
                let matches = country_for_vat_prefix(&reported) == buyer;
                if !matches {
                    tracing::debug!(
                        buyer = %buyer,
                        registered = %reported,
                        "VAT number registered in another country, not treated as validated"
                    );
                }
                matches
            }
            None => true,
        },
        _ => false,
    };

    BuyerClassification::new(is_b2b, validated, &buyer, seller_country_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_b2b() {
        let v = VatValidation::valid_in("DE");
        let c = classify_buyer(true, "de", "SI", Some(&v)).unwrap();
        assert!(c.is_b2b);
        assert!(c.vat_number_validated);
        assert_eq!(c.buyer_country_code, "DE");
    }

    #[test]
    fn country_mismatch_not_validated() {
        let v = VatValidation::valid_in("AT");
        let c = classify_buyer(true, "DE", "SI", Some(&v)).unwrap();
        assert!(!c.vat_number_validated);
    }

    #[test]
    fn greek_prefix_matches_gr() {
        let v = VatValidation::valid_in("EL");
        let c = classify_buyer(true, "GR", "SI", Some(&v)).unwrap();
        assert!(c.vat_number_validated);
    }

    #[test]
    fn missing_or_invalid_validation() {
        assert!(!classify_buyer(true, "DE", "SI", None).unwrap().vat_number_validated);
        let v = VatValidation::invalid();
        assert!(!classify_buyer(true, "DE", "SI", Some(&v)).unwrap().vat_number_validated);
    }

    #[test]
    fn unreported_country_trusted() {
        let v = VatValidation {
            valid: true,
            country_code: None,
        };
        assert!(classify_buyer(true, "DE", "SI", Some(&v)).unwrap().vat_number_validated);
    }

    #[test]
    fn consumer_never_validated() {
        let v = VatValidation::valid_in("DE");
        let c = classify_buyer(false, "DE", "SI", Some(&v)).unwrap();
        assert!(!c.vat_number_validated);
    }

    #[test]
    fn bad_countries_rejected() {
        assert!(classify_buyer(false, "", "SI", None).is_err());
        assert!(classify_buyer(false, "DE", "", None).is_err());
    }
}
