use rust_decimal_macros::dec;
use tarif::core::*;
use tarif::shipping::*;

fn main() -> Result<(), PricingError> {
    let rates = vec![
        ShippingRateBuilder::new("1", "SI", "GLS", dec!(6.50)).build()?,
        ShippingRateBuilder::new("2", "SI", "GLS", dec!(5.90)).build()?,
        ShippingRateBuilder::new("3", "SI", "DPD", dec!(6.10)).build()?,
        ShippingRateBuilder::new("4", "SI", CARRIER_INTEREUROPA, dec!(65)).build()?,
        ShippingRateBuilder::new("5", "SI", CARRIER_PERSONAL_PICKUP, dec!(0))
            .service_type(ServiceType::Pickup)
            .build()?,
    ];

    println!("=== Pallet mode ===\n");
    for (label, qty) in [("49 junction boxes", 49), ("50 junction boxes", 50)] {
        let cart = Cart::new(vec![
            CartItemBuilder::new("GOJ-4P", qty, dec!(8.90))
                .weight_kg(dec!(0.35))
                .subcategory(SUBCATEGORY_GO_JUNCTION)
                .build()?,
        ])?;
        println!("  {label}: pallet={}", is_pallet_mode(&cart));
    }

    for (country, pallet) in [("SI", false), ("SI", true), ("AT", true)] {
        println!("\n=== {country}, pallet={pallet} ===\n");
        let options = select_shipping_options(country, dec!(120), pallet, &rates)?;
        if options.is_empty() {
            println!("  no shipping methods");
        }
        for o in options {
            println!("  #{} {:<18} {:.2}", o.id, o.carrier, o.rate_amount);
        }
    }

    Ok(())
}
