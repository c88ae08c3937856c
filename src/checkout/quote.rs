//! Full checkout quote: pallet detection, shipping options, VAT and total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::total::compute_order_total;
use crate::core::{
    BuyerClassification, Cart, MarketConfig, PricingError, PricingResult, ShippingRateRecord,
    VatDecision, normalize_country_code,
};
use crate::shipping::PalletTrigger;
use crate::vat::decide_vat_for;

/// Current checkout inputs from the cart, address and VAT-validation collaborators.
///
/// Deserializing runs the [`Cart`] and [`BuyerClassification`] constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub cart: Cart,
    pub destination_country_code: String,
    pub classification: BuyerClassification,
    /// Rate id the customer picked, if any.
    pub selected_rate_id: Option<String>,
}

/// Priced checkout, recomputed whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub pallet_mode: bool,
    pub pallet_trigger: Option<PalletTrigger>,
    /// Selectable shipping options, at most one per carrier.
    pub options: Vec<ShippingRateRecord>,
    pub selected: Option<ShippingRateRecord>,
    pub vat: VatDecision,
    pub pricing: PricingResult,
}

/// Why a quote cannot be submitted as an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutBlocked {
    #[error("no shipping methods available for this destination")]
    NoShippingMethods,
    #[error("select a shipping method before continuing")]
    ShippingNotSelected,
}

impl CheckoutQuote {
    /// Gate for order submission: an empty option list or a missing selection
    /// blocks checkout.
    pub fn ensure_submittable(&self) -> Result<(), CheckoutBlocked> {
        if self.options.is_empty() {
            return Err(CheckoutBlocked::NoShippingMethods);
        }
        if self.selected.is_none() {
            return Err(CheckoutBlocked::ShippingNotSelected);
        }
        Ok(())
    }
}

/// Price a checkout.
///
/// `candidates` are the rate-storage results for the destination and cart
/// weight (see [`RateTable::candidates`](crate::shipping::RateTable::candidates)).
/// Shipping cost is the selected option's rate, or 0 when nothing is selected.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] when an input is malformed, the
/// classification's seller is not the market's seller, or the selected rate
/// id is not among the offered options.
pub fn quote_checkout(
    request: &CheckoutRequest,
    market: &MarketConfig,
    candidates: &[ShippingRateRecord],
) -> Result<CheckoutQuote, PricingError> {
    let seller = normalize_country_code(
        "classification.seller_country_code",
        &request.classification.seller_country_code,
    )?;
    let market_seller =
        normalize_country_code("market.seller_country_code", &market.seller_country_code)?;
    if seller != market_seller {
        return Err(PricingError::invalid(
            "classification.seller_country_code",
            format_args!("'{seller}' does not match market seller '{market_seller}'"),
        ));
    }

    let cart = &request.cart;
    let weight = cart.total_weight_kg();
    let pallet_trigger = market.pallet.trigger(cart);
    let pallet_mode = pallet_trigger.is_some();

    let options = market.shipping.select(
        &request.destination_country_code,
        weight,
        pallet_mode,
        candidates,
    )?;
    if options.is_empty() {
        tracing::warn!(
            destination = %request.destination_country_code,
            weight_kg = %weight,
            pallet_mode,
            "no shipping methods available"
        );
    }

    let selected = match request.selected_rate_id.as_deref() {
        Some(id) => Some(
            options
                .iter()
                .find(|o| o.id == id)
                .cloned()
                .ok_or_else(|| {
                    PricingError::invalid(
                        "selected_rate_id",
                        format_args!("'{id}' is not an offered shipping option"),
                    )
                })?,
        ),
        None => None,
    };

    let vat = decide_vat_for(&request.classification, market)?;
    let shipping_cost = selected
        .as_ref()
        .map_or(rust_decimal::Decimal::ZERO, |s| s.rate_amount);
    let pricing = compute_order_total(cart.subtotal_net(), shipping_cost, &vat)?;

    Ok(CheckoutQuote {
        pallet_mode,
        pallet_trigger,
        options,
        selected,
        vat,
        pricing,
    })
}
