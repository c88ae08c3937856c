//! Carrier filtering and per-carrier deduplication.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::core::{
    PricingError, ShippingPolicy, ShippingRateRecord, ensure_non_negative, normalize_country_code,
};

impl ShippingPolicy {
    /// Whether `rate` may be offered for `country_code` (normalized).
    ///
    /// Pallet mode keeps only the freight carrier, plus self-collection when
    /// shipping to the pick-up country. Parcel mode drops the freight carrier.
    pub fn allows(&self, rate: &ShippingRateRecord, country_code: &str, pallet_mode: bool) -> bool {
        let is_freight = rate.carrier == self.freight_carrier;
        if pallet_mode {
            is_freight
                || (country_code.eq_ignore_ascii_case(self.pickup_country.trim())
                    && rate.carrier == self.pickup_carrier)
        } else {
            !is_freight
        }
    }

    /// Selectable shipping options for a destination, at most one per carrier.
    ///
    /// `candidates` are expected to be pre-filtered to the destination, the
    /// weight bracket and active records. Carriers keep their first-occurrence
    /// order; within a carrier the cheapest record wins and the earlier record
    /// wins a tie. An empty result means no shipping methods, not an error.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidInput`] for an empty or malformed country code or
    /// a negative weight.
    pub fn select(
        &self,
        country_code: &str,
        total_weight_kg: Decimal,
        pallet_mode: bool,
        candidates: &[ShippingRateRecord],
    ) -> Result<Vec<ShippingRateRecord>, PricingError> {
        let country_code = normalize_country_code("country_code", country_code)?;
        ensure_non_negative("total_weight_kg", total_weight_kg)?;

        let mut selected: Vec<ShippingRateRecord> = Vec::new();
        let mut by_carrier: HashMap<&str, usize> = HashMap::new();

        for rate in candidates
            .iter()
            .filter(|r| self.allows(r, &country_code, pallet_mode))
        {
            match by_carrier.get(rate.carrier.as_str()) {
                Some(&idx) => {
                    if rate.rate_amount < selected[idx].rate_amount {
                        selected[idx] = rate.clone();
                    }
                }
                None => {
                    by_carrier.insert(rate.carrier.as_str(), selected.len());
                    selected.push(rate.clone());
                }
            }
        }

        tracing::debug!(
            country = %country_code,
            weight_kg = %total_weight_kg,
            pallet_mode,
            candidates = candidates.len(),
            selected = selected.len(),
            "shipping options selected"
        );

        Ok(selected)
    }
}

/// [`ShippingPolicy::select`] with the default carrier policy.
///
/// ```
/// use tarif::core::*;
/// use tarif::shipping::select_shipping_options;
/// use rust_decimal_macros::dec;
///
/// let rates = vec![
///     ShippingRateBuilder::new("1", "SI", "GLS", dec!(6.50)).build().unwrap(),
///     ShippingRateBuilder::new("2", "SI", "GLS", dec!(5.90)).build().unwrap(),
///     ShippingRateBuilder::new("3", "SI", "InterEuropa", dec!(80)).build().unwrap(),
/// ];
/// let options = select_shipping_options("SI", dec!(12), false, &rates).unwrap();
/// assert_eq!(options.len(), 1);
/// assert_eq!(options[0].id, "2");
/// ```
pub fn select_shipping_options(
    country_code: &str,
    total_weight_kg: Decimal,
    is_pallet_mode: bool,
    candidate_rates: &[ShippingRateRecord],
) -> Result<Vec<ShippingRateRecord>, PricingError> {
    ShippingPolicy::default().select(country_code, total_weight_kg, is_pallet_mode, candidate_rates)
}
