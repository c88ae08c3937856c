//! Order total: subtotal + shipping, plus VAT on both.

use rust_decimal::Decimal;

use crate::core::{PricingError, PricingResult, VatDecision, ensure_non_negative};

/// Compose subtotal, shipping and the VAT decision into the chargeable total.
///
/// ```text
/// vat_base   = subtotal_net + shipping_cost
/// vat_amount = applies_vat ? vat_base × effective_rate : 0
/// total      = vat_base + vat_amount
/// ```
///
/// Amounts are kept at full precision; round with [`PricingResult::rounded`]
/// when presenting.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] for a negative subtotal, shipping cost or
/// VAT rate, or when the total does not fit a `Decimal`.
pub fn compute_order_total(
    subtotal_net: Decimal,
    shipping_cost: Decimal,
    vat_decision: &VatDecision,
) -> Result<PricingResult, PricingError> {
    ensure_non_negative("subtotal_net", subtotal_net)?;
    ensure_non_negative("shipping_cost", shipping_cost)?;
    ensure_non_negative("vat_decision.effective_rate", vat_decision.effective_rate)?;

    let overflow = || PricingError::invalid("subtotal_net", "amount overflows");
    let vat_base = subtotal_net.checked_add(shipping_cost).ok_or_else(overflow)?;
    let vat_amount = if vat_decision.applies_vat {
        vat_base
            .checked_mul(vat_decision.effective_rate)
            .ok_or_else(overflow)?
    } else {
        Decimal::ZERO
    };
    let total = vat_base.checked_add(vat_amount).ok_or_else(overflow)?;

    tracing::debug!(
        subtotal = %subtotal_net,
        shipping = %shipping_cost,
        vat = %vat_amount,
        total = %total,
        "order total computed"
    );

    Ok(PricingResult {
        subtotal_net,
        shipping_cost,
        vat_rate: vat_decision.effective_rate,
        vat_amount,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VatTreatment;
    use rust_decimal_macros::dec;

    fn taxed(rate: Decimal) -> VatDecision {
        VatDecision {
            applies_vat: true,
            effective_rate: rate,
            treatment: VatTreatment::Consumer,
        }
    }

    fn reverse_charge() -> VatDecision {
        VatDecision {
            applies_vat: false,
            effective_rate: Decimal::ZERO,
            treatment: VatTreatment::ReverseCharge,
        }
    }

    #[test]
    fn taxed_total() {
        let r = compute_order_total(dec!(100), dec!(10), &taxed(dec!(0.22))).unwrap();
        assert_eq!(r.vat_amount, dec!(24.20));
        assert_eq!(r.total, dec!(134.20));
        assert_eq!(r.vat_rate, dec!(0.22));
    }

    #[test]
    fn reverse_charge_total() {
        let r = compute_order_total(dec!(100), dec!(10), &reverse_charge()).unwrap();
        assert_eq!(r.vat_amount, Decimal::ZERO);
        assert_eq!(r.total, dec!(110.00));
    }

    #[test]
    fn full_precision_kept() {
        let r = compute_order_total(dec!(0.05), dec!(0), &taxed(dec!(0.22))).unwrap();
        assert_eq!(r.vat_amount, dec!(0.011));
        assert_eq!(r.rounded().vat_amount, dec!(0.01));
        assert_eq!(r.total, dec!(0.061));
    }

    #[test]
    fn zero_everything() {
        let r = compute_order_total(dec!(0), dec!(0), &taxed(dec!(0.22))).unwrap();
        assert_eq!(r.total, Decimal::ZERO);
    }

    #[test]
    fn negative_inputs_rejected() {
        assert!(compute_order_total(dec!(-1), dec!(0), &taxed(dec!(0.22))).is_err());
        assert!(compute_order_total(dec!(1), dec!(-0.01), &taxed(dec!(0.22))).is_err());
        assert!(compute_order_total(dec!(1), dec!(0), &taxed(dec!(-0.22))).is_err());
    }

    #[test]
    fn overflow_is_an_error() {
        let err = compute_order_total(Decimal::MAX, dec!(1), &taxed(dec!(0.22))).unwrap_err();
        assert_eq!(err, PricingError::invalid("subtotal_net", "amount overflows"));
        assert!(compute_order_total(Decimal::MAX, dec!(0), &taxed(dec!(0.22))).is_err());
        assert!(compute_order_total(Decimal::MAX, dec!(0), &reverse_charge()).is_ok());
    }
}
