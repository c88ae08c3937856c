//! Pallet-mode detection.
//!
//! A cart ships on a pallet when any of these holds:
//! - "GO Junction" units ≥ `junction_units` (default 50)
//! - "GO EV Charger" units ≥ `ev_charger_units` (default 25)
//! - total weight > `max_parcel_weight_kg` (default 100 kg)

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Cart, PalletThresholds, SUBCATEGORY_GO_EV_CHARGER, SUBCATEGORY_GO_JUNCTION};

/// The rule that put a cart into pallet mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PalletTrigger {
    /// Too many "GO Junction" units.
    JunctionUnits(u64),
    /// Too many "GO EV Charger" units.
    EvChargerUnits(u64),
    /// Cart heavier than a parcel carrier accepts.
    Weight(Decimal),
}

impl fmt::Display for PalletTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JunctionUnits(n) => write!(f, "{n} {SUBCATEGORY_GO_JUNCTION} units"),
            Self::EvChargerUnits(n) => write!(f, "{n} {SUBCATEGORY_GO_EV_CHARGER} units"),
            Self::Weight(kg) => write!(f, "cart weight {kg} kg"),
        }
    }
}

impl PalletThresholds {
    /// First rule that puts `cart` into pallet mode, checked in the order
    /// junction units, EV-charger units, weight.
    pub fn trigger(&self, cart: &Cart) -> Option<PalletTrigger> {
        let junctions = cart.quantity_in_subcategory(SUBCATEGORY_GO_JUNCTION);
        if junctions >= self.junction_units {
            return Some(PalletTrigger::JunctionUnits(junctions));
        }

        let chargers = cart.quantity_in_subcategory(SUBCATEGORY_GO_EV_CHARGER);
        if chargers >= self.ev_charger_units {
            return Some(PalletTrigger::EvChargerUnits(chargers));
        }

        let weight = cart.total_weight_kg();
        if weight > self.max_parcel_weight_kg {
            return Some(PalletTrigger::Weight(weight));
        }

        None
    }

    /// Whether `cart` ships on a pallet under these thresholds.
    pub fn is_pallet_mode(&self, cart: &Cart) -> bool {
        let trigger = self.trigger(cart);
        if let Some(t) = trigger {
            tracing::debug!(trigger = %t, "pallet mode");
        }
        trigger.is_some()
    }
}

/// Pallet-mode check with the default thresholds.
pub fn is_pallet_mode(cart: &Cart) -> bool {
    PalletThresholds::default().is_pallet_mode(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CartItem, CartItemBuilder};
    use rust_decimal_macros::dec;

    fn tagged(sku: &str, qty: u32, tag: &str) -> CartItem {
        CartItemBuilder::new(sku, qty, dec!(10))
            .weight_kg(dec!(0.1))
            .subcategory(tag)
            .build()
            .unwrap()
    }

    fn cart(items: Vec<CartItem>) -> Cart {
        Cart::new(items).unwrap()
    }

    #[test]
    fn junction_boundary() {
        assert!(!is_pallet_mode(&cart(vec![tagged("J", 49, SUBCATEGORY_GO_JUNCTION)])));
        assert!(is_pallet_mode(&cart(vec![tagged("J", 50, SUBCATEGORY_GO_JUNCTION)])));
    }

    #[test]
    fn junction_units_summed_across_lines() {
        let c = cart(vec![
            tagged("J1", 30, SUBCATEGORY_GO_JUNCTION),
            tagged("J2", 20, SUBCATEGORY_GO_JUNCTION),
        ]);
        assert_eq!(
            PalletThresholds::default().trigger(&c),
            Some(PalletTrigger::JunctionUnits(50))
        );
    }

    #[test]
    fn ev_charger_boundary() {
        assert!(!is_pallet_mode(&cart(vec![tagged("C", 24, SUBCATEGORY_GO_EV_CHARGER)])));
        assert!(is_pallet_mode(&cart(vec![tagged("C", 25, SUBCATEGORY_GO_EV_CHARGER)])));
    }

    #[test]
    fn weight_is_strictly_greater() {
        let at_limit = CartItemBuilder::new("W", 4, dec!(1))
            .weight_kg(dec!(25))
            .build()
            .unwrap();
        assert!(!is_pallet_mode(&cart(vec![at_limit])));

        let over = CartItemBuilder::new("W", 1, dec!(1))
            .weight_kg(dec!(100.001))
            .build()
            .unwrap();
        assert_eq!(
            PalletThresholds::default().trigger(&cart(vec![over])),
            Some(PalletTrigger::Weight(dec!(100.001)))
        );
    }

    #[test]
    fn mixed_subcategories_do_not_combine() {
        let c = cart(vec![
            tagged("J", 49, SUBCATEGORY_GO_JUNCTION),
            tagged("C", 24, SUBCATEGORY_GO_EV_CHARGER),
        ]);
        assert!(!is_pallet_mode(&c));
    }

    #[test]
    fn empty_cart_is_parcel() {
        assert!(!is_pallet_mode(&Cart::default()));
    }

    #[test]
    fn custom_thresholds() {
        let t = PalletThresholds {
            junction_units: 10,
            ..PalletThresholds::default()
        };
        assert!(t.is_pallet_mode(&cart(vec![tagged("J", 10, SUBCATEGORY_GO_JUNCTION)])));
    }
}
