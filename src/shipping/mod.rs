//! Shipping-method eligibility: pallet-mode detection, carrier filtering,
//! and per-carrier deduplication.
//!
//! # Example
//!
//! ```
//! use tarif::core::*;
//! use tarif::shipping::*;
//! use rust_decimal_macros::dec;
//!
//! let cart = Cart::new(vec![
//!     CartItemBuilder::new("GOJ-4P", 50, dec!(8.90))
//!         .weight_kg(dec!(0.35))
//!         .subcategory(SUBCATEGORY_GO_JUNCTION)
//!         .build()
//!         .unwrap(),
//! ])
//! .unwrap();
//! assert!(is_pallet_mode(&cart));
//! ```

mod pallet;
mod rates;
mod select;

pub use pallet::{PalletTrigger, is_pallet_mode};
pub use rates::RateTable;
pub use select::select_shipping_options;
