use rust_decimal::Decimal;

use super::countries::normalize_country_code;
use super::error::{PricingError, ensure_non_negative};
use super::types::*;

/// Builder for a validated [`CartItem`].
///
/// ```
/// use tarif::core::*;
/// use rust_decimal_macros::dec;
///
/// let item = CartItemBuilder::new("GOJ-4P", 60, dec!(8.90))
///     .weight_kg(dec!(0.35))
///     .subcategory("GO Junction")
///     .build()
///     .unwrap();
/// assert_eq!(item.line_net().unwrap(), dec!(534.00));
/// ```
#[derive(Debug, Clone)]
pub struct CartItemBuilder {
    sku: String,
    quantity: u32,
    unit_price: Decimal,
    weight_kg: Decimal,
    subcategory: Option<String>,
}

impl CartItemBuilder {
    pub fn new(sku: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price,
            weight_kg: Decimal::ZERO,
            subcategory: None,
        }
    }

    /// Weight of a single unit.
    pub fn weight_kg(mut self, weight: Decimal) -> Self {
        self.weight_kg = weight;
        self
    }

    pub fn subcategory(mut self, tag: impl Into<String>) -> Self {
        self.subcategory = Some(tag.into());
        self
    }

    pub fn build(self) -> Result<CartItem, PricingError> {
        let item = CartItem {
            sku: self.sku.trim().to_string(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            weight_kg: self.weight_kg,
            subcategory: self.subcategory.filter(|t| !t.trim().is_empty()),
        };
        item.check()?;
        Ok(item)
    }
}

/// Builder for a validated [`ShippingRateRecord`].
///
/// Defaults: standard service, weight range `0..=Decimal::MAX`, active.
#[derive(Debug, Clone)]
pub struct ShippingRateBuilder {
    id: String,
    country_code: String,
    carrier: String,
    service_type: ServiceType,
    min_weight_kg: Decimal,
    max_weight_kg: Decimal,
    rate_amount: Decimal,
    active: bool,
}

impl ShippingRateBuilder {
    pub fn new(
        id: impl Into<String>,
        country_code: impl Into<String>,
        carrier: impl Into<String>,
        rate_amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            country_code: country_code.into(),
            carrier: carrier.into(),
            service_type: ServiceType::Standard,
            min_weight_kg: Decimal::ZERO,
            max_weight_kg: Decimal::MAX,
            rate_amount,
            active: true,
        }
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = service_type;
        self
    }

    /// Inclusive weight bracket.
    pub fn weight_range(mut self, min_kg: Decimal, max_kg: Decimal) -> Self {
        self.min_weight_kg = min_kg;
        self.max_weight_kg = max_kg;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn build(self) -> Result<ShippingRateRecord, PricingError> {
        if self.id.trim().is_empty() {
            return Err(PricingError::invalid("shipping_rate.id", "id is required"));
        }
        if self.carrier.trim().is_empty() {
            return Err(PricingError::invalid(
                "shipping_rate.carrier",
                format_args!("carrier is required for rate '{}'", self.id),
            ));
        }
        let country_code = normalize_country_code("shipping_rate.country_code", &self.country_code)?;
        ensure_non_negative("shipping_rate.rate_amount", self.rate_amount)?;
        ensure_non_negative("shipping_rate.min_weight_kg", self.min_weight_kg)?;
        if self.min_weight_kg > self.max_weight_kg {
            return Err(PricingError::invalid(
                "shipping_rate.weight_range",
                format_args!(
                    "min {} exceeds max {} for rate '{}'",
                    self.min_weight_kg, self.max_weight_kg, self.id
                ),
            ));
        }

        Ok(ShippingRateRecord {
            id: self.id,
            country_code,
            carrier: self.carrier,
            service_type: self.service_type,
            min_weight_kg: self.min_weight_kg,
            max_weight_kg: self.max_weight_kg,
            rate_amount: self.rate_amount,
            active: self.active,
        })
    }
}
