use tarif::checkout::compute_order_total;
use tarif::core::*;
use tarif::vat::decide_vat_for;

const CONFIG: &str = r#"{
    "seller_country_code": "hr",
    "standard_vat_rate": "0.25",
    "currency": "EUR",
    "pallet": { "max_parcel_weight_kg": "80" }
}"#;

fn main() -> Result<(), PricingError> {
    let market = MarketConfig::from_json(CONFIG)?;
    println!("{market:#?}");

    let buyer = BuyerClassification::consumer("HR", &market.seller_country_code)?;
    let vat = decide_vat_for(&buyer, &market)?;
    let pricing = compute_order_total(rust_decimal_macros::dec!(100), rust_decimal_macros::dec!(10), &vat)?;
    println!("{pricing}");

    Ok(())
}
