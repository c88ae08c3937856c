use rust_decimal_macros::dec;
use tarif::vat::*;

fn main() {
    println!("=== VAT Number Format ===\n");

    let numbers = [
        "SI12345678",
        "si 1234 5678",
        "ATU12345678",
        "EL094259216",
        "SI1234567",    // too short
        "XX999999999", // unknown prefix
    ];

    for n in &numbers {
        match parse_vat_number(n) {
            Ok(v) => println!("  {n} => valid ({v}, country={})", v.country_code()),
            Err(e) => println!("  {n} => INVALID: {e}"),
        }
    }

    println!("\n=== VAT Decision (seller SI, 22%) ===\n");

    let cases = [
        ("Consumer, DE", "DE", false, false),
        ("Business, SI", "SI", true, true),
        ("Business, DE, validated", "DE", true, true),
        ("Business, FR, not validated", "FR", true, false),
    ];

    for (label, buyer, b2b, validated) in cases {
        match decide_vat(buyer, "SI", b2b, validated, dec!(0.22)) {
            Ok(d) => println!(
                "  {label}: {:?}, rate={}, applies={}",
                d.treatment, d.effective_rate, d.applies_vat
            ),
            Err(e) => println!("  {label}: error: {e}"),
        }
    }
}
