use rust_decimal_macros::dec;
use tarif::checkout::{CheckoutRequest, quote_checkout};
use tarif::core::*;
use tarif::shipping::RateTable;
use tarif::vat::{VatValidation, classify_buyer};
use tracing_subscriber::EnvFilter;

fn rates() -> Result<RateTable, PricingError> {
    RateTable::new(vec![
        ShippingRateBuilder::new("gls-si", "SI", "GLS", dec!(5.90))
            .weight_range(dec!(0), dec!(40))
            .build()?,
        ShippingRateBuilder::new("pickup-si", "SI", CARRIER_PERSONAL_PICKUP, dec!(0))
            .service_type(ServiceType::Pickup)
            .build()?,
        ShippingRateBuilder::new("ie-si", "SI", CARRIER_INTEREUROPA, dec!(65))
            .weight_range(dec!(0), dec!(2000))
            .build()?,
        ShippingRateBuilder::new("gls-at", "AT", "GLS", dec!(11.90))
            .weight_range(dec!(0), dec!(40))
            .build()?,
        ShippingRateBuilder::new("ie-at", "AT", CARRIER_INTEREUROPA, dec!(140))
            .weight_range(dec!(0), dec!(2000))
            .build()?,
    ])
}

fn main() -> Result<(), PricingError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = MarketConfig::slovenia();
    let table = rates()?;

    let parcel = Cart::new(vec![
        CartItemBuilder::new("GO-EVC-11", 2, dec!(389))
            .weight_kg(dec!(4.2))
            .subcategory(SUBCATEGORY_GO_EV_CHARGER)
            .build()?,
    ])?;
    let pallet = Cart::new(vec![
        CartItemBuilder::new("GOJ-4P", 120, dec!(8.90))
            .weight_kg(dec!(0.35))
            .subcategory(SUBCATEGORY_GO_JUNCTION)
            .build()?,
    ])?;

    let austrian_business = classify_buyer(true, "AT", "SI", Some(&VatValidation::valid_in("AT")))?;

    let scenarios = [
        ("Consumer, Ljubljana, parcel", parcel.clone(), "SI", BuyerClassification::consumer("SI", "SI")?, Some("gls-si")),
        ("Consumer, Ljubljana, pallet", pallet.clone(), "SI", BuyerClassification::consumer("SI", "SI")?, Some("pickup-si")),
        ("Validated business, Graz, pallet", pallet, "AT", austrian_business.clone(), Some("ie-at")),
        ("Validated business, Graz, nothing selected", parcel, "AT", austrian_business, None),
    ];

    for (label, cart, destination, classification, selected) in scenarios {
        let request = CheckoutRequest {
            destination_country_code: destination.into(),
            classification,
            selected_rate_id: selected.map(Into::into),
            cart,
        };
        let candidates = table.candidates(destination, request.cart.total_weight_kg())?;
        let quote = quote_checkout(&request, &market, &candidates)?;

        println!("=== {label} ===");
        match quote.pallet_trigger {
            Some(t) => println!("  pallet mode ({t})"),
            None => println!("  parcel mode"),
        }
        for option in &quote.options {
            println!("  option {:<12} {:<18} {:.2}", option.id, option.carrier, option.rate_amount);
        }
        println!("  VAT: {:?}", quote.vat.treatment);
        println!("  {}", quote.pricing);
        match quote.ensure_submittable() {
            Ok(()) => println!("  ready to submit\n"),
            Err(blocked) => println!("  blocked: {blocked}\n"),
        }
    }

    Ok(())
}
