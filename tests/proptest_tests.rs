//! Property-based tests for shipping selection, VAT decisions and totals.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "checkout")]

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tarif::checkout::compute_order_total;
use tarif::core::*;
use tarif::shipping::{is_pallet_mode, select_shipping_options};
use tarif::vat::decide_vat;

// ── Proptest Strategies ─────────────────────────────────────────────────────

const CARRIERS: &[&str] = &[
    CARRIER_INTEREUROPA,
    CARRIER_PERSONAL_PICKUP,
    "GLS",
    "DPD",
    "Pošta Slovenije",
];

const COUNTRIES: &[&str] = &["SI", "HR", "AT", "DE", "IT"];

/// Money amount 0.00 to 999.99.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u32..100_000u32).prop_map(|cents| Decimal::new(i64::from(cents), 2))
}

fn arb_country() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COUNTRIES)
}

/// 0-12 rate records for one country, ids unique.
fn arb_rates(country: &'static str) -> impl Strategy<Value = Vec<ShippingRateRecord>> {
    prop::collection::vec((prop::sample::select(CARRIERS), arb_amount()), 0..12).prop_map(
        move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (carrier, amount))| {
                    ShippingRateBuilder::new(format!("r{i}"), country, carrier, amount)
                        .build()
                        .unwrap()
                })
                .collect()
        },
    )
}

fn arb_country_and_rates() -> impl Strategy<Value = (&'static str, Vec<ShippingRateRecord>)> {
    arb_country().prop_flat_map(|c| (Just(c), arb_rates(c)))
}

fn arb_rate_fraction() -> impl Strategy<Value = Decimal> {
    (0u32..100u32).prop_map(|pct| Decimal::new(i64::from(pct), 2))
}

// ── Shipping ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn parcel_mode_never_offers_freight((country, rates) in arb_country_and_rates()) {
        let out = select_shipping_options(country, dec!(10), false, &rates).unwrap();
        prop_assert!(out.iter().all(|r| r.carrier != CARRIER_INTEREUROPA));
    }

    #[test]
    fn pallet_mode_abroad_is_at_most_one_freight_record((country, rates) in arb_country_and_rates()) {
        prop_assume!(country != "SI");
        let out = select_shipping_options(country, dec!(150), true, &rates).unwrap();
        prop_assert!(out.len() <= 1);
        prop_assert!(out.iter().all(|r| r.carrier == CARRIER_INTEREUROPA));
    }

    #[test]
    fn pallet_mode_in_slovenia_only_freight_or_pickup(rates in arb_rates("SI")) {
        let out = select_shipping_options("SI", dec!(150), true, &rates).unwrap();
        prop_assert!(out.len() <= 2);
        let all_freight_or_pickup = out.iter().all(|r| {
            r.carrier == CARRIER_INTEREUROPA || r.carrier == CARRIER_PERSONAL_PICKUP
        });
        prop_assert!(all_freight_or_pickup);
    }

    #[test]
    fn one_cheapest_record_per_carrier(
        (country, rates) in arb_country_and_rates(),
        pallet in any::<bool>(),
    ) {
        let out = select_shipping_options(country, dec!(20), pallet, &rates).unwrap();

        let mut seen = HashMap::new();
        for r in &out {
            prop_assert!(seen.insert(r.carrier.clone(), r.rate_amount).is_none());
        }

        // Minimum over the same carrier in the input; every selected record
        // must come from the input and carry that minimum.
        for r in &out {
            let min = rates
                .iter()
                .filter(|c| c.carrier == r.carrier)
                .map(|c| c.rate_amount)
                .min()
                .unwrap();
            prop_assert_eq!(r.rate_amount, min);
            prop_assert!(rates.contains(r));
        }
    }

    #[test]
    fn selection_idempotent(
        (country, rates) in arb_country_and_rates(),
        pallet in any::<bool>(),
    ) {
        let a = select_shipping_options(country, dec!(5), pallet, &rates).unwrap();
        let b = select_shipping_options(country, dec!(5), pallet, &rates).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn junction_threshold(qty in 1u32..200u32) {
        let cart = Cart::new(vec![
            CartItemBuilder::new("GOJ", qty, dec!(1))
                .subcategory(SUBCATEGORY_GO_JUNCTION)
                .build()
                .unwrap(),
        ])
        .unwrap();
        prop_assert_eq!(is_pallet_mode(&cart), qty >= 50);
    }
}

// ── VAT ─────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn only_validated_cross_border_b2b_is_zero_rated(
        buyer in arb_country(),
        is_b2b in any::<bool>(),
        validated in any::<bool>(),
        rate in arb_rate_fraction(),
    ) {
        let d = decide_vat(buyer, "SI", is_b2b, validated, rate).unwrap();
        let reverse = is_b2b && validated && buyer != "SI";
        if reverse {
            prop_assert_eq!(d.effective_rate, Decimal::ZERO);
            prop_assert_eq!(d.treatment, VatTreatment::ReverseCharge);
        } else {
            prop_assert_eq!(d.effective_rate, rate);
        }
        prop_assert_eq!(d.applies_vat, d.effective_rate > Decimal::ZERO);
    }
}

// ── Totals ──────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn total_is_base_plus_vat(
        subtotal in arb_amount(),
        shipping in arb_amount(),
        rate in arb_rate_fraction(),
    ) {
        let decision = decide_vat("SI", "SI", false, false, rate).unwrap();
        let r = compute_order_total(subtotal, shipping, &decision).unwrap();
        prop_assert_eq!(r.vat_amount, (subtotal + shipping) * rate);
        prop_assert_eq!(r.total, subtotal + shipping + r.vat_amount);
        prop_assert!(r.total >= r.subtotal_net + r.shipping_cost);

        let shown = r.rounded();
        prop_assert!((shown.total - r.total).abs() <= dec!(0.005));
    }

    #[test]
    fn total_idempotent(subtotal in arb_amount(), shipping in arb_amount()) {
        let decision = decide_vat("DE", "SI", true, false, dec!(0.22)).unwrap();
        let a = compute_order_total(subtotal, shipping, &decision).unwrap();
        let b = compute_order_total(subtotal, shipping, &decision).unwrap();
        prop_assert_eq!(a, b);
    }
}
