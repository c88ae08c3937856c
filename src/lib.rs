//! # tarif
//!
//! Checkout pricing core for a multi-market storefront: shipping-method
//! eligibility (pallet mode, carrier filtering and deduplication), EU VAT
//! treatment (consumer, domestic B2B, intra-community reverse charge) and the
//! resulting order total.
//!
//! All operations are pure functions of their inputs. Monetary values use
//! [`rust_decimal::Decimal`], never floating point, and keep full precision
//! until [`PricingResult::rounded`] is called for presentation.
//!
//! ## Quick Start
//!
//! ```rust
//! use tarif::core::*;
//! use tarif::checkout::compute_order_total;
//! use tarif::shipping::{is_pallet_mode, select_shipping_options};
//! use tarif::vat::decide_vat;
//! use rust_decimal_macros::dec;
//!
//! let cart = Cart::new(vec![
//!     CartItemBuilder::new("GO-EVC-11", 2, dec!(50)).weight_kg(dec!(7)).build().unwrap(),
//! ]).unwrap();
//! let rates = vec![
//!     ShippingRateBuilder::new("gls-si", "SI", "GLS", dec!(10)).build().unwrap(),
//!     ShippingRateBuilder::new("ie-si", "SI", "InterEuropa", dec!(85)).build().unwrap(),
//! ];
//!
//! let pallet = is_pallet_mode(&cart);
//! let options = select_shipping_options("SI", cart.total_weight_kg(), pallet, &rates).unwrap();
//! let vat = decide_vat("SI", "SI", false, false, dec!(0.22)).unwrap();
//! let pricing = compute_order_total(cart.subtotal_net(), options[0].rate_amount, &vat).unwrap();
//!
//! assert_eq!(options.len(), 1);
//! assert_eq!(pricing.total, dec!(134.20));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Cart / rate / classification types, builders, market config |
//! | `shipping` (default) | Pallet mode, carrier filtering, rate table |
//! | `vat` (default) | VAT decision, VAT-number format, buyer classification |
//! | `checkout` (default) | Order total, checkout quote |
//! | `vies` | Async EU VIES lookup |
//! | `json` | `MarketConfig::from_json` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "shipping")]
pub mod shipping;

#[cfg(feature = "vat")]
pub mod vat;

#[cfg(feature = "checkout")]
pub mod checkout;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
