use tarif::core::country_for_vat_prefix;
use tarif::vat::{VatValidation, check_vies, classify_buyer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let vat_number = std::env::args().nth(1).unwrap_or_else(|| "SI12345678".into());

    match check_vies(&vat_number).await {
        Ok(result) => {
            println!("{vat_number}: valid={}", result.valid);
            if let Some(name) = &result.name {
                println!("  name: {name}");
            }
            let validation = VatValidation::from(&result);
            let buyer_country = country_for_vat_prefix(&result.country_code);
            match classify_buyer(true, buyer_country, "SI", Some(&validation)) {
                Ok(c) => println!("  reverse charge eligible: {}", c.vat_number_validated && c.is_cross_border()),
                Err(e) => println!("  classification error: {e}"),
            }
        }
        Err(e) => println!("{vat_number}: lookup failed, buyer stays unverified ({e})"),
    }
}
