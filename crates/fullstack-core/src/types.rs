//! # Domain Types
//!
//! Line item types shared by the cart, the catalog and the checkout flow.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewCartItem   │──►│    CartItem     │   │    ItemKind     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  validated      │   │  id (key)       │   │  Domain         │       │
//! │  │  input to       │   │  name, price    │   │  Hosting        │       │
//! │  │  add_item       │   │  quantity ≥ 1   │   │  Other          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  BillingCycle   │   │    TaxRate      │                              │
//! │  │  Monthly/Yearly │   │  bps (u32)      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A line item is keyed by a caller-supplied id: the domain name itself for
//! domains (`example.com`) and `hosting-<planId>` for hosting plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::validation::{validate_item_id, validate_item_name, validate_price, ValidationResult};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, e.g. `10.0` for 10%.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Item Kind
// =============================================================================

/// What a line item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A domain registration. Always quantity 1.
    Domain,
    /// A hosting plan subscription.
    Hosting,
    Other,
}

impl ItemKind {
    /// Whether the quantity of this kind of item is pinned at 1.
    #[inline]
    pub const fn has_fixed_quantity(&self) -> bool {
        matches!(self, ItemKind::Domain)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Domain => write!(f, "domain"),
            ItemKind::Hosting => write!(f, "hosting"),
            ItemKind::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// Billing Cycle
// =============================================================================

/// How often a hosting plan is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    /// The hosting page preselects yearly billing.
    #[default]
    Yearly,
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingCycle::Monthly => write!(f, "monthly"),
            BillingCycle::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BillingCycle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            _ => Err(CoreError::InvalidBillingCycle(s.to_string())),
        }
    }
}

// =============================================================================
// New Cart Item
// =============================================================================

/// A validated request to put something in the cart.
///
/// ## Why a separate input type?
/// The cart's mutators cannot fail. Everything that could be wrong with an
/// item (empty id, empty name, negative price) is rejected here, before the
/// item ever reaches [`crate::Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    id: String,
    name: String,
    price: Money,
    kind: ItemKind,
    quantity: Option<i64>,
    billing_cycle: Option<BillingCycle>,
}

impl NewCartItem {
    /// Validates and creates a new item with no explicit quantity.
    ///
    /// ```rust
    /// use fullstack_core::{ItemKind, Money, NewCartItem};
    ///
    /// assert!(NewCartItem::new("hosting-2", "Business Hosting", Money::from_cents(1999), ItemKind::Hosting).is_ok());
    /// assert!(NewCartItem::new("", "Nameless", Money::from_cents(100), ItemKind::Other).is_err());
    /// assert!(NewCartItem::new("refund", "Refund", Money::from_cents(-100), ItemKind::Other).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        kind: ItemKind,
    ) -> ValidationResult<Self> {
        let id = id.into().trim().to_string();
        let name = name.into().trim().to_string();

        validate_item_id(&id)?;
        validate_item_name(&name)?;
        validate_price(price)?;

        Ok(NewCartItem {
            id,
            name,
            price,
            kind,
            quantity: None,
            billing_cycle: None,
        })
    }

    /// Sets the quantity to add. Values below 1 fall back to the default of 1
    /// when the item is added.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_billing_cycle(mut self, cycle: BillingCycle) -> Self {
        self.billing_cycle = Some(cycle);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn billing_cycle(&self) -> Option<BillingCycle> {
        self.billing_cycle
    }

    /// The quantity this request contributes: the explicit quantity if it is
    /// at least 1, otherwise 1. Domains always contribute 1.
    pub fn effective_quantity(&self) -> i64 {
        if self.kind.has_fixed_quantity() {
            return 1;
        }
        self.quantity.filter(|q| *q >= 1).unwrap_or(1)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `quantity == 1` when `kind == Domain`
/// - `price` is never negative (guaranteed by [`NewCartItem::new`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price, frozen when the item was first added.
    pub price: Money,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub billing_cycle: Option<BillingCycle>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Materialises a validated request as a cart line.
    pub fn from_new(item: NewCartItem) -> Self {
        let quantity = item.effective_quantity();
        CartItem {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity,
            kind: item.kind,
            billing_cycle: item.billing_cycle,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
