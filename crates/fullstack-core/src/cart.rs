//! # Cart
//!
//! The cart value type: an ordered list of line items keyed by id, four
//! mutators and a derived total.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  Page Action              Cart Method              State Change         │
//! │  ───────────              ───────────              ────────────         │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ────────────► push or qty += n     │
//! │                                                                         │
//! │  +/- buttons ───────────► update_quantity() ─────► qty = n (n<1 → rm)  │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item() ─────────► retain(id != x)     │
//! │                                                                         │
//! │  "Clear Cart" ──────────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  Order summary ─────────► total() / summary() ───► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of the mutators can fail. Each reports whether it changed anything so
//! the store knows when observers need to hear about it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, NewCartItem, TaxRate};

// =============================================================================
// Add Outcome
// =============================================================================

/// What [`Cart::add_item`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Inserted,
    /// An existing line's quantity grew to `quantity`.
    Incremented { quantity: i64 },
    /// The id was already present with a pinned quantity (domains).
    #[default]
    Unchanged,
}

impl AddOutcome {
    #[inline]
    pub fn changed(&self) -> bool {
        !matches!(self, AddOutcome::Unchanged)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same id increases quantity)
/// - Every quantity is >= 1; setting a quantity below 1 removes the line
/// - Domain lines stay at quantity 1
/// - Insertion order is preserved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds an item, or grows the quantity of the line with the same id.
    ///
    /// ## Behavior
    /// - Unknown id: appended with its effective quantity (default 1)
    /// - Known id: quantity increases by the incoming effective quantity
    /// - Known domain id: stays at quantity 1
    ///
    /// The existing line keeps its original name and price. Quantities have
    /// no cap; a line that reaches `i64::MAX` stays there.
    ///
    /// Re-adding a line already at `i64::MAX` is reported as
    /// [`AddOutcome::Unchanged`].
    pub fn add_item(&mut self, item: NewCartItem) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id()) {
            if existing.kind.has_fixed_quantity() {
                return AddOutcome::Unchanged;
            }
            let quantity = existing.quantity.saturating_add(item.effective_quantity());
            if quantity == existing.quantity {
                return AddOutcome::Unchanged;
            }
            existing.quantity = quantity;
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(CartItem::from_new(item));
        AddOutcome::Inserted
    }

    /// Removes the line with `id`. Returns `false` if there was none.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of the line with `id`.
    ///
    /// ## Behavior
    /// - `quantity < 1`: same as [`Cart::remove_item`]
    /// - Domain lines ignore quantities >= 1 (they stay at 1)
    /// - Unknown id: no-op
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) if !item.kind.has_fixed_quantity() && item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart. Returns how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.items.len();
        self.items.clear();
        self.created_at = Utc::now();
        dropped
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ price × quantity, exact to the cent. Zero for an empty cart.
    /// Saturates at [`Money::MAX`] instead of overflowing.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order summary at the given tax rate.
    pub fn summary(&self, tax_rate: TaxRate) -> CartSummary {
        CartSummary::compute(self, tax_rate)
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// The "Order Summary" panel shown next to the cart and on checkout.
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Subtotal            $51.98   │
/// │ Discount            -$0.00   │
/// │ Tax                  $5.20   │
/// │ ──────────────────────────── │
/// │ Total               $57.18   │
/// └──────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    /// No discounts exist yet; always zero.
    pub discount: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl CartSummary {
    pub fn compute(cart: &Cart, tax_rate: TaxRate) -> Self {
        let subtotal = cart.total();
        let discount = Money::zero();
        let tax = (subtotal - discount).calculate_tax(tax_rate);

        CartSummary {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            discount,
            tax_rate,
            tax,
            total: subtotal - discount + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
