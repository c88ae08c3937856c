use std::collections::HashSet;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::builder::CartItemBuilder;
use super::countries::normalize_country_code;
use super::error::{PricingError, ensure_non_negative};

/// A single cart line as handed over by the cart collaborator.
///
/// Construct through [`CartItemBuilder`], which rejects zero quantities and
/// negative prices or weights. Deserialization runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartItemFields")]
pub struct CartItem {
    /// Stock keeping unit, unique within a cart.
    pub sku: String,
    /// Number of units (always positive).
    pub quantity: u32,
    /// Net price per unit.
    pub unit_price: Decimal,
    /// Weight per unit in kilograms.
    pub weight_kg: Decimal,
    /// Product subcategory tag (e.g. "GO Junction").
    pub subcategory: Option<String>,
}

#[derive(Deserialize)]
struct CartItemFields {
    sku: String,
    quantity: u32,
    unit_price: Decimal,
    #[serde(default)]
    weight_kg: Decimal,
    subcategory: Option<String>,
}

impl TryFrom<CartItemFields> for CartItem {
    type Error = PricingError;

    fn try_from(f: CartItemFields) -> Result<Self, Self::Error> {
        let mut builder = CartItemBuilder::new(f.sku, f.quantity, f.unit_price).weight_kg(f.weight_kg);
        if let Some(tag) = f.subcategory {
            builder = builder.subcategory(tag);
        }
        builder.build()
    }
}

impl CartItem {
    /// `quantity × unit_price`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidInput`] if the product overflows.
    pub fn line_net(&self) -> Result<Decimal, PricingError> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| self.overflow("line amount"))
    }

    /// `quantity × weight_kg`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidInput`] if the product overflows.
    pub fn line_weight_kg(&self) -> Result<Decimal, PricingError> {
        Decimal::from(self.quantity)
            .checked_mul(self.weight_kg)
            .ok_or_else(|| self.overflow("line weight"))
    }

    /// Whether the item carries exactly the given subcategory tag.
    pub fn is_in_subcategory(&self, tag: &str) -> bool {
        self.subcategory.as_deref() == Some(tag)
    }

    /// Line invariants: SKU present, positive quantity, non-negative price
    /// and weight, line products representable.
    pub(crate) fn check(&self) -> Result<(), PricingError> {
        if self.sku.trim().is_empty() {
            return Err(PricingError::invalid("cart_item.sku", "SKU is required"));
        }
        if self.quantity == 0 {
            return Err(PricingError::invalid(
                "cart_item.quantity",
                format_args!("quantity for '{}' must be positive", self.sku),
            ));
        }
        ensure_non_negative("cart_item.unit_price", self.unit_price)?;
        ensure_non_negative("cart_item.weight_kg", self.weight_kg)?;
        self.line_net()?;
        self.line_weight_kg()?;
        Ok(())
    }

    fn overflow(&self, what: &str) -> PricingError {
        PricingError::invalid("cart", format_args!("{what} for '{}' overflows", self.sku))
    }
}

/// Read-only snapshot of a cart, with SKUs unique across lines.
///
/// Subtotal and weight are computed once, when the snapshot is taken, so a
/// cart whose sums do not fit a `Decimal` is rejected up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartFields")]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(skip)]
    subtotal_net: Decimal,
    #[serde(skip)]
    total_weight_kg: Decimal,
}

#[derive(Deserialize)]
struct CartFields {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl TryFrom<CartFields> for Cart {
    type Error = PricingError;

    fn try_from(f: CartFields) -> Result<Self, Self::Error> {
        Self::new(f.items)
    }
}

impl Cart {
    /// Create a cart snapshot.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidInput`] for duplicate SKUs, a line that breaks
    /// the [`CartItem`] invariants, or a subtotal or weight that overflows.
    pub fn new(items: Vec<CartItem>) -> Result<Self, PricingError> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut subtotal_net = Decimal::ZERO;
        let mut total_weight_kg = Decimal::ZERO;

        for item in &items {
            if !seen.insert(item.sku.as_str()) {
                return Err(PricingError::invalid(
                    "cart.items",
                    format_args!("duplicate SKU '{}'", item.sku),
                ));
            }
            item.check()?;
            subtotal_net = subtotal_net
                .checked_add(item.line_net()?)
                .ok_or_else(|| PricingError::invalid("cart", "subtotal overflows"))?;
            total_weight_kg = total_weight_kg
                .checked_add(item.line_weight_kg()?)
                .ok_or_else(|| PricingError::invalid("cart", "total weight overflows"))?;
        }

        Ok(Self {
            items,
            subtotal_net,
            total_weight_kg,
        })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `quantity × unit_price` over all lines.
    pub fn subtotal_net(&self) -> Decimal {
        self.subtotal_net
    }

    /// Sum of `quantity × weight_kg` over all lines.
    pub fn total_weight_kg(&self) -> Decimal {
        self.total_weight_kg
    }

    /// Total units across lines tagged with `tag`.
    pub fn quantity_in_subcategory(&self, tag: &str) -> u64 {
        self.items
            .iter()
            .filter(|i| i.is_in_subcategory(tag))
            .map(|i| u64::from(i.quantity))
            .fold(0, u64::saturating_add)
    }
}

/// Kind of shipping service a rate record offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Parcel or freight delivery to the buyer's address.
    Standard,
    /// Buyer collects the goods.
    Pickup,
}

/// A carrier rate from the external rate table.
///
/// Construct through [`ShippingRateBuilder`](super::ShippingRateBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRateRecord {
    /// Unique record id.
    pub id: String,
    /// Destination country (normalized ISO alpha-2).
    pub country_code: String,
    /// Carrier name, compared verbatim.
    pub carrier: String,
    pub service_type: ServiceType,
    /// Inclusive lower weight bound.
    pub min_weight_kg: Decimal,
    /// Inclusive upper weight bound.
    pub max_weight_kg: Decimal,
    /// Price in the reference currency.
    pub rate_amount: Decimal,
    pub active: bool,
}

impl ShippingRateRecord {
    /// Whether `weight_kg` lies in `[min_weight_kg, max_weight_kg]`.
    pub fn covers_weight(&self, weight_kg: Decimal) -> bool {
        self.min_weight_kg <= weight_kg && weight_kg <= self.max_weight_kg
    }
}

/// How the buyer is treated for VAT purposes, derived once per checkout session.
///
/// Country codes are normalized on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClassificationFields")]
pub struct BuyerClassification {
    pub is_b2b: bool,
    /// True only if the buyer's VAT number passed external validation.
    pub vat_number_validated: bool,
    pub buyer_country_code: String,
    pub seller_country_code: String,
}

#[derive(Deserialize)]
struct ClassificationFields {
    is_b2b: bool,
    vat_number_validated: bool,
    buyer_country_code: String,
    seller_country_code: String,
}

impl TryFrom<ClassificationFields> for BuyerClassification {
    type Error = PricingError;

    fn try_from(f: ClassificationFields) -> Result<Self, Self::Error> {
        Self::new(
            f.is_b2b,
            f.vat_number_validated,
            &f.buyer_country_code,
            &f.seller_country_code,
        )
    }
}

impl BuyerClassification {
    /// Build a classification, normalizing both country codes.
    pub fn new(
        is_b2b: bool,
        vat_number_validated: bool,
        buyer_country_code: &str,
        seller_country_code: &str,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            is_b2b,
            vat_number_validated,
            buyer_country_code: normalize_country_code("buyer_country_code", buyer_country_code)?,
            seller_country_code: normalize_country_code(
                "seller_country_code",
                seller_country_code,
            )?,
        })
    }

    /// Consumer buyer.
    pub fn consumer(buyer_country_code: &str, seller_country_code: &str) -> Result<Self, PricingError> {
        Self::new(false, false, buyer_country_code, seller_country_code)
    }

    pub fn is_cross_border(&self) -> bool {
        self.buyer_country_code != self.seller_country_code
    }
}

/// Which row of the VAT decision table applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatTreatment {
    /// Sale to a consumer, taxed at the standard rate.
    Consumer,
    /// B2B sale within the seller's country, taxed at the standard rate.
    DomesticB2b,
    /// Validated intra-community B2B sale, 0% with the buyer liable.
    ReverseCharge,
    /// Cross-border B2B sale without a validated VAT number, taxed at the standard rate.
    UnverifiedCrossBorderB2b,
}

/// Outcome of the VAT decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatDecision {
    /// `effective_rate > 0`.
    pub applies_vat: bool,
    /// Rate as a fraction (0.22 = 22%).
    pub effective_rate: Decimal,
    pub treatment: VatTreatment,
}

/// Priced checkout. Amounts keep full precision; call [`PricingResult::rounded`]
/// for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal_net: Decimal,
    pub shipping_cost: Decimal,
    /// Effective VAT rate as a fraction, 0 when VAT does not apply.
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

impl PricingResult {
    /// Copy with every monetary field rounded half-up to 2 decimal places.
    ///
    /// The rate is left untouched.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal_net: round_money(self.subtotal_net),
            shipping_cost: round_money(self.shipping_cost),
            vat_rate: self.vat_rate,
            vat_amount: round_money(self.vat_amount),
            total: round_money(self.total),
        }
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rounded();
        write!(
            f,
            "subtotal {:.2} + shipping {:.2} + VAT {}% {:.2} = total {:.2}",
            r.subtotal_net,
            r.shipping_cost,
            (r.vat_rate * Decimal::ONE_HUNDRED).normalize(),
            r.vat_amount,
            r.total
        )
    }
}

/// Round a Decimal to 2 places using half-up (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
