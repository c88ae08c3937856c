//! Order totals and the composed checkout quote.

mod quote;
mod total;

pub use quote::{CheckoutBlocked, CheckoutQuote, CheckoutRequest, quote_checkout};
pub use total::compute_order_total;
