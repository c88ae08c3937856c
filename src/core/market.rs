//! Per-storefront market configuration.
//!
//! Everything the pricing core needs from the deployment (seller country,
//! standard VAT rate, pallet thresholds, carrier policy) is passed in
//! explicitly through [`MarketConfig`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::countries::normalize_country_code;
use super::error::{PricingError, ensure_non_negative};

/// Subcategory tag counted towards the junction-box pallet threshold.
pub const SUBCATEGORY_GO_JUNCTION: &str = "GO Junction";

/// Subcategory tag counted towards the EV-charger pallet threshold.
pub const SUBCATEGORY_GO_EV_CHARGER: &str = "GO EV Charger";

/// Bulk freight carrier, the only carrier offered in pallet mode.
pub const CARRIER_INTEREUROPA: &str = "InterEuropa";

/// Self-collection "carrier".
pub const CARRIER_PERSONAL_PICKUP: &str = "Personal Pick-up";

/// Limits above which a cart ships on a pallet instead of as parcels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalletThresholds {
    /// Minimum "GO Junction" units that trigger pallet mode (positive).
    pub junction_units: u64,
    /// Minimum "GO EV Charger" units that trigger pallet mode (positive).
    pub ev_charger_units: u64,
    /// Cart weight strictly above this triggers pallet mode.
    pub max_parcel_weight_kg: Decimal,
}

impl Default for PalletThresholds {
    fn default() -> Self {
        Self {
            junction_units: 50,
            ev_charger_units: 25,
            max_parcel_weight_kg: dec!(100),
        }
    }
}

/// Carrier rules applied when filtering rate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingPolicy {
    /// Freight carrier: the only carrier in pallet mode, excluded otherwise.
    pub freight_carrier: String,
    /// Self-collection carrier still offered in pallet mode for `pickup_country`.
    pub pickup_carrier: String,
    /// Destination where self-collection survives pallet mode.
    pub pickup_country: String,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            freight_carrier: CARRIER_INTEREUROPA.into(),
            pickup_carrier: CARRIER_PERSONAL_PICKUP.into(),
            pickup_country: "SI".into(),
        }
    }
}

/// Market configuration for one storefront deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Seller's country (ISO alpha-2).
    pub seller_country_code: String,
    /// Standard VAT rate as a fraction (0.22 = 22%).
    pub standard_vat_rate: Decimal,
    /// ISO 4217 code of the reference currency; informational only.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub pallet: PalletThresholds,
    #[serde(default)]
    pub shipping: ShippingPolicy,
}

fn default_currency() -> String {
    "EUR".into()
}

impl MarketConfig {
    /// Validated config with default pallet thresholds and carrier policy.
    pub fn new(seller_country_code: &str, standard_vat_rate: Decimal) -> Result<Self, PricingError> {
        Self {
            seller_country_code: seller_country_code.into(),
            standard_vat_rate,
            currency: default_currency(),
            pallet: PalletThresholds::default(),
            shipping: ShippingPolicy::default(),
        }
        .validated()
    }

    /// Slovenian storefront: seller SI, 22% VAT, EUR.
    pub fn slovenia() -> Self {
        Self {
            seller_country_code: "SI".into(),
            standard_vat_rate: dec!(0.22),
            currency: default_currency(),
            pallet: PalletThresholds::default(),
            shipping: ShippingPolicy::default(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_pallet_thresholds(mut self, pallet: PalletThresholds) -> Self {
        self.pallet = pallet;
        self
    }

    pub fn with_shipping_policy(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }

    /// Normalize country codes and check every field; returns the cleaned config.
    pub fn validated(mut self) -> Result<Self, PricingError> {
        self.seller_country_code =
            normalize_country_code("market.seller_country_code", &self.seller_country_code)?;
        validate_vat_rate("market.standard_vat_rate", self.standard_vat_rate)?;

        let currency = self.currency.trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PricingError::invalid(
                "market.currency",
                format_args!("'{}' is not an ISO 4217 code", self.currency),
            ));
        }
        self.currency = currency;

        if self.pallet.junction_units == 0 {
            return Err(PricingError::invalid(
                "market.pallet.junction_units",
                "threshold must be positive",
            ));
        }
        if self.pallet.ev_charger_units == 0 {
            return Err(PricingError::invalid(
                "market.pallet.ev_charger_units",
                "threshold must be positive",
            ));
        }
        ensure_non_negative(
            "market.pallet.max_parcel_weight_kg",
            self.pallet.max_parcel_weight_kg,
        )?;

        if self.shipping.freight_carrier.trim().is_empty() {
            return Err(PricingError::invalid(
                "market.shipping.freight_carrier",
                "carrier is required",
            ));
        }
        if self.shipping.pickup_carrier.trim().is_empty() {
            return Err(PricingError::invalid(
                "market.shipping.pickup_carrier",
                "carrier is required",
            ));
        }
        self.shipping.pickup_country =
            normalize_country_code("market.shipping.pickup_country", &self.shipping.pickup_country)?;

        Ok(self)
    }

    /// Parse a JSON market config and validate it.
    ///
    /// ```
    /// let cfg = tarif::core::MarketConfig::from_json(
    ///     r#"{"seller_country_code": "si", "standard_vat_rate": "0.22"}"#,
    /// ).unwrap();
    /// assert_eq!(cfg.seller_country_code, "SI");
    /// assert_eq!(cfg.pallet.junction_units, 50);
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| PricingError::invalid("market", format_args!("malformed JSON: {e}")))?;
        cfg.validated()
    }
}

/// A VAT rate must be a fraction in `[0, 1)`.
pub(crate) fn validate_vat_rate(field: &str, rate: Decimal) -> Result<(), PricingError> {
    ensure_non_negative(field, rate)?;
    if rate >= Decimal::ONE {
        return Err(PricingError::invalid(
            field,
            format_args!("{rate} is not a fraction (expected e.g. 0.22 for 22%)"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slovenia_preset_is_valid() {
        let cfg = MarketConfig::slovenia().validated().unwrap();
        assert_eq!(cfg.seller_country_code, "SI");
        assert_eq!(cfg.standard_vat_rate, dec!(0.22));
        assert_eq!(cfg.currency, "EUR");
    }

    #[test]
    fn new_normalizes_country() {
        let cfg = MarketConfig::new(" hr ", dec!(0.25)).unwrap();
        assert_eq!(cfg.seller_country_code, "HR");
    }

    #[test]
    fn rate_must_be_a_fraction() {
        assert!(MarketConfig::new("SI", dec!(22)).is_err());
        assert!(MarketConfig::new("SI", dec!(1)).is_err());
        assert!(MarketConfig::new("SI", dec!(-0.01)).is_err());
        assert!(MarketConfig::new("SI", dec!(0)).is_ok());
    }

    #[test]
    fn currency_checked() {
        assert!(MarketConfig::slovenia().with_currency("EURO").validated().is_err());
        let cfg = MarketConfig::slovenia().with_currency("chf").validated().unwrap();
        assert_eq!(cfg.currency, "CHF");
    }

    #[test]
    fn empty_carrier_rejected() {
        let policy = ShippingPolicy {
            freight_carrier: String::new(),
            ..ShippingPolicy::default()
        };
        assert!(
            MarketConfig::slovenia()
                .with_shipping_policy(policy)
                .validated()
                .is_err()
        );
    }

    #[test]
    fn zero_unit_thresholds_rejected() {
        let junctions = PalletThresholds {
            junction_units: 0,
            ..PalletThresholds::default()
        };
        let err = MarketConfig::slovenia()
            .with_pallet_thresholds(junctions)
            .validated()
            .unwrap_err();
        assert!(err.to_string().contains("market.pallet.junction_units"));

        let chargers = PalletThresholds {
            ev_charger_units: 0,
            ..PalletThresholds::default()
        };
        assert!(
            MarketConfig::slovenia()
                .with_pallet_thresholds(chargers)
                .validated()
                .is_err()
        );
    }

    #[test]
    fn defaults_match_documented_thresholds() {
        let p = PalletThresholds::default();
        assert_eq!(p.junction_units, 50);
        assert_eq!(p.ev_charger_units, 25);
        assert_eq!(p.max_parcel_weight_kg, dec!(100));
        let s = ShippingPolicy::default();
        assert_eq!(s.freight_carrier, "InterEuropa");
        assert_eq!(s.pickup_carrier, "Personal Pick-up");
        assert_eq!(s.pickup_country, "SI");
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_partial_sections_take_defaults() {
        let cfg = MarketConfig::from_json(
            r#"{
                "seller_country_code": "SI",
                "standard_vat_rate": "0.22",
                "pallet": { "junction_units": 40 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.pallet.junction_units, 40);
        assert_eq!(cfg.pallet.ev_charger_units, 25);
        assert_eq!(cfg.shipping, ShippingPolicy::default());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_errors_are_invalid_input() {
        let err = MarketConfig::from_json("{").unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
        assert!(MarketConfig::from_json(r#"{"seller_country_code":"SI","standard_vat_rate":"2"}"#).is_err());
    }
}
