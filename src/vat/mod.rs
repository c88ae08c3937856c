//! VAT treatment: the consumer / domestic B2B / reverse-charge decision,
//! VAT-number format checks, buyer classification and the VIES client.
//!
//! # Example
//!
//! ```
//! use tarif::vat::*;
//! use rust_decimal_macros::dec;
//!
//! // Validated intra-community B2B sale: reverse charge.
//! let d = decide_vat("DE", "SI", true, true, dec!(0.22)).unwrap();
//! assert!(!d.applies_vat);
//!
//! // Same buyer without a validated VAT number is taxed.
//! let d = decide_vat("DE", "SI", true, false, dec!(0.22)).unwrap();
//! assert_eq!(d.effective_rate, dec!(0.22));
//! ```

mod classification;
mod decision;
mod format;
#[cfg(feature = "vies")]
mod vies;

pub use classification::{VatValidation, classify_buyer};
pub use decision::{decide_vat, decide_vat_for};
pub use format::{VatFormatError, VatNumber, parse_vat_number};
#[cfg(feature = "vies")]
pub use vies::{ViesError, ViesResult, check_vies};
