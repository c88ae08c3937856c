//! In-memory rate table standing in for the rate-storage collaborator.

use rust_decimal::Decimal;

use crate::core::{PricingError, ShippingRateRecord, ensure_non_negative, normalize_country_code};

/// Immutable set of rate records with the storage-side candidate query.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    records: Vec<ShippingRateRecord>,
}

impl RateTable {
    /// Wrap records, rejecting duplicate ids.
    pub fn new(records: Vec<ShippingRateRecord>) -> Result<Self, PricingError> {
        for (i, r) in records.iter().enumerate() {
            if records[..i].iter().any(|other| other.id == r.id) {
                return Err(PricingError::invalid(
                    "rate_table",
                    format_args!("duplicate rate id '{}'", r.id),
                ));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ShippingRateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Active records for `country_code` whose weight bracket contains `weight_kg`,
    /// in table order.
    pub fn candidates(
        &self,
        country_code: &str,
        weight_kg: Decimal,
    ) -> Result<Vec<ShippingRateRecord>, PricingError> {
        let country_code = normalize_country_code("country_code", country_code)?;
        ensure_non_negative("weight_kg", weight_kg)?;

        Ok(self
            .records
            .iter()
            .filter(|r| r.active && r.country_code == country_code && r.covers_weight(weight_kg))
            .cloned()
            .collect())
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ShippingRateRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
