#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(n) = tarif::vat::parse_vat_number(s) {
            assert_eq!(n.prefix().len(), 2);
            let _ = tarif::vat::parse_vat_number(&n.to_string()).unwrap();
        }
    }
});
