//! Core value types, validated constructors, and market configuration.
//!
//! The types here are plain snapshots handed over by the surrounding
//! checkout flow; the pricing operations never mutate them.

mod builder;
mod countries;
mod error;
mod market;
mod types;

pub use builder::*;
pub use countries::{country_for_vat_prefix, is_eu_member, normalize_country_code};
pub use error::*;
pub use market::*;
pub use types::*;
