//! VAT decision table: consumer, domestic B2B, reverse charge.

use rust_decimal::Decimal;

use crate::core::{
    BuyerClassification, MarketConfig, PricingError, VatDecision, VatTreatment,
    normalize_country_code, validate_vat_rate,
};

/// Decide whether VAT is charged and at which rate.
///
/// Rows, first match wins:
///
/// 1. Not B2B → standard rate (`Consumer`)
/// 2. B2B, buyer country = seller country → standard rate (`DomesticB2b`)
/// 3. B2B, cross-border, VAT number validated → 0 (`ReverseCharge`)
/// 4. B2B, cross-border, not validated → standard rate (`UnverifiedCrossBorderB2b`)
///
/// An unverified cross-border buyer is never zero-rated.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] for a missing or malformed country code or a
/// rate outside `[0, 1)`.
pub fn decide_vat(
    buyer_country_code: &str,
    seller_country_code: &str,
    is_b2b: bool,
    vat_number_validated: bool,
    standard_vat_rate: Decimal,
) -> Result<VatDecision, PricingError> {
    let buyer = normalize_country_code("buyer_country_code", buyer_country_code)?;
    let seller = normalize_country_code("seller_country_code", seller_country_code)?;
    validate_vat_rate("standard_vat_rate", standard_vat_rate)?;

    let treatment = if !is_b2b {
        VatTreatment::Consumer
    } else if buyer == seller {
        VatTreatment::DomesticB2b
    } else if vat_number_validated {
        VatTreatment::ReverseCharge
    } else {
        VatTreatment::UnverifiedCrossBorderB2b
    };

    let effective_rate = match treatment {
        VatTreatment::ReverseCharge => Decimal::ZERO,
        _ => standard_vat_rate,
    };

    tracing::debug!(
        buyer = %buyer,
        seller = %seller,
        ?treatment,
        rate = %effective_rate,
        "VAT decided"
    );

    Ok(VatDecision {
        applies_vat: effective_rate > Decimal::ZERO,
        effective_rate,
        treatment,
    })
}

/// [`decide_vat`] for a session classification under a market configuration.
///
/// The classification's seller country is used; the market supplies the rate.
pub fn decide_vat_for(
    classification: &BuyerClassification,
    market: &MarketConfig,
) -> Result<VatDecision, PricingError> {
    decide_vat(
        &classification.buyer_country_code,
        &classification.seller_country_code,
        classification.is_b2b,
        classification.vat_number_validated,
        market.standard_vat_rate,
    )
}
