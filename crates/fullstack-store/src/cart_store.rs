//! # Cart Store
//!
//! The single shared cart every page view reads and writes through.
//!
//! ## Sharing Model
//! There is no global cart. The app creates one [`CartStore`] at startup and
//! hands clones of it to the views that need it; every clone is a handle to
//! the same cart.
//!
//! ## Change Notification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Notifications                             │
//! │                                                                         │
//! │  Hosting page ── add_item() ──┐                                         │
//! │                               ▼                                         │
//! │  Cart page ─ update_quantity()─► watch::Sender<Cart> ──┬──► Navbar badge│
//! │                               ▲   (send_if_modified)   │                │
//! │  Checkout ─── clear() ────────┘                        └──► Cart page   │
//! │                                                                         │
//! │  Observers are woken only when a mutation actually changed the cart:    │
//! │  removing an absent id or re-adding a domain wakes nobody.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;
use ts_rs::TS;

use fullstack_core::{AddOutcome, Cart, CartItem, CartSummary, Money, NewCartItem, TaxRate};

/// Cart contents plus the order summary, as sent to the client after every
/// operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}

impl CartView {
    pub fn new(cart: &Cart, tax_rate: TaxRate) -> Self {
        CartView {
            items: cart.items().to_vec(),
            summary: cart.summary(tax_rate),
        }
    }
}

/// Shared handle to the session's cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Arc<watch::Sender<Cart>>,
    tax_rate: TaxRate,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(TaxRate::default())
    }
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new(tax_rate: TaxRate) -> Self {
        let (tx, _) = watch::channel(Cart::new());
        CartStore {
            cart: Arc::new(tx),
            tax_rate,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Runs `f` with read access to the cart.
    ///
    /// `f` must not call back into the store: the cart stays locked while it
    /// runs.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&*self.cart.borrow())
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.borrow().clone()
    }

    /// Items in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.with_cart(|c| c.items().to_vec())
    }

    /// Σ price × quantity, full precision.
    pub fn total(&self) -> Money {
        self.with_cart(Cart::total)
    }

    pub fn summary(&self) -> CartSummary {
        self.with_cart(|c| c.summary(self.tax_rate))
    }

    pub fn view(&self) -> CartView {
        self.with_cart(|c| CartView::new(c, self.tax_rate))
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    pub fn item_count(&self) -> usize {
        self.with_cart(Cart::item_count)
    }

    /// Subscribes to cart changes. The receiver starts out holding the
    /// current cart, marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.cart.subscribe()
    }

    // =========================================================================
    // Writes
    // =========================================================================
    //
    // Each write returns the view of the cart exactly as that write left it,
    // captured under the same lock as the change itself.

    /// Adds an item, or grows the quantity of the line with the same id.
    pub fn add_item(&self, item: NewCartItem) -> CartView {
        let item_id = item.id().to_string();
        let (outcome, view) = self.mutate(|cart| {
            let outcome = cart.add_item(item);
            (outcome, outcome.changed())
        });

        match outcome {
            AddOutcome::Inserted => debug!(item_id = %item_id, "Item added to cart"),
            AddOutcome::Incremented { quantity } => {
                debug!(item_id = %item_id, quantity, "Cart item quantity increased")
            }
            AddOutcome::Unchanged => debug!(item_id = %item_id, "Item already in cart"),
        }

        view
    }

    /// Removes the line with `id`; no-op if absent.
    pub fn remove_item(&self, id: &str) -> CartView {
        let (removed, view) = self.mutate(|cart| {
            let removed = cart.remove_item(id);
            (removed, removed)
        });
        debug!(item_id = %id, removed, "remove_item");

        view
    }

    /// Sets the quantity of the line with `id`; below 1 removes it.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> CartView {
        let (changed, view) = self.mutate(|cart| {
            let changed = cart.update_quantity(id, quantity);
            (changed, changed)
        });
        debug!(item_id = %id, quantity, changed, "update_quantity");

        view
    }

    /// Empties the cart.
    pub fn clear(&self) -> CartView {
        let (dropped, view) = self.mutate(|cart| {
            let dropped = cart.clear();
            (dropped, dropped > 0)
        });
        debug!(dropped, "Cart cleared");

        view
    }

    /// Empties the cart only if `predicate` accepts its current contents.
    /// Returns whether the cart was cleared.
    ///
    /// The check and the clear happen under one lock, so no other handle can
    /// change the cart in between. `predicate` must not call back into the
    /// store.
    pub fn clear_if<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&Cart) -> bool,
    {
        let ((cleared, dropped), _) = self.mutate(|cart| {
            if !predicate(cart) {
                return ((false, 0), false);
            }
            let dropped = cart.clear();
            ((true, dropped), dropped > 0)
        });
        debug!(cleared, dropped, "clear_if");

        cleared
    }

    /// Applies `f` and wakes subscribers only if it reports a change.
    ///
    /// Returns `f`'s value together with the view of the resulting cart.
    fn mutate<F, R>(&self, f: F) -> (R, CartView)
    where
        F: FnOnce(&mut Cart) -> (R, bool),
        R: Default,
    {
        let tax_rate = self.tax_rate;
        let mut outcome = (R::default(), CartView::default());
        self.cart.send_if_modified(|cart| {
            let (value, changed) = f(cart);
            outcome = (value, CartView::new(cart, tax_rate));
            changed
        });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullstack_core::{BillingCycle, HostingPlan, ItemKind};

    fn domain(name: &str, cents: i64) -> NewCartItem {
        NewCartItem::new(name, name, Money::from_cents(cents), ItemKind::Domain).unwrap()
    }

    fn business_plan(quantity: i64) -> NewCartItem {
        NewCartItem::new("hosting-2", "Business Hosting", Money::from_cents(1999), ItemKind::Hosting)
            .unwrap()
            .with_quantity(quantity)
    }

    #[test]
    fn test_scenario_through_store() {
        let store = CartStore::default();

        store.add_item(domain("example.com", 1200));
        assert_eq!(store.total().to_string(), "$12.00");

        let view = store.add_item(business_plan(2));
        assert_eq!(view.summary.subtotal.to_string(), "$51.98");

        store.update_quantity("hosting-2", 1);
        assert_eq!(store.total().to_string(), "$31.99");

        store.remove_item("example.com");
        assert_eq!(store.total().to_string(), "$19.99");

        let view = store.clear();
        assert!(view.items.is_empty());
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_clones_share_one_cart() {
        let store = CartStore::default();
        let cart_page = store.clone();

        store.add_item(domain("example.com", 1200));
        assert_eq!(cart_page.item_count(), 1);

        cart_page.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_view_matches_cart() {
        let store = CartStore::new(TaxRate::from_bps(1000));
        let plan = HostingPlan::find(1).unwrap();
        let view = store.add_item(plan.to_cart_item(BillingCycle::Yearly).unwrap());

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, "hosting-1");
        assert_eq!(view.summary.subtotal.cents(), 9999);
        assert_eq!(view.summary.tax.cents(), 1000);
        assert_eq!(view.summary.total.cents(), 10999);
        assert_eq!(view, store.view());
    }

    #[test]
    fn test_observers_see_changes() {
        let store = CartStore::default();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_item(domain("example.com", 1200));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count(), 1);

        store.update_quantity("example.com", 0);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_noops_do_not_notify() {
        let store = CartStore::default();
        store.add_item(domain("example.com", 1200));

        let mut rx = store.subscribe();
        store.remove_item("missing.com");
        store.remove_item("missing.com");
        store.add_item(domain("example.com", 1200));
        store.update_quantity("missing.com", 4);

        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count(), 1);
    }

    #[test]
    fn test_clearing_empty_cart_does_not_notify() {
        let store = CartStore::default();
        let rx = store.subscribe();

        let view = store.clear();
        assert!(view.items.is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_if() {
        let store = CartStore::default();
        store.add_item(domain("example.com", 1200));
        let rx = store.subscribe();

        assert!(!store.clear_if(|cart| cart.item_count() == 2));
        assert_eq!(store.item_count(), 1);
        assert!(!rx.has_changed().unwrap());

        assert!(store.clear_if(|cart| cart.contains("example.com")));
        assert!(store.is_empty());
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_large_quantity_through_store() {
        let store = CartStore::default();
        store.add_item(business_plan(i64::MAX));
        let view = store.add_item(business_plan(i64::MAX));

        assert_eq!(view.items[0].quantity, i64::MAX);
        assert_eq!(view.summary.subtotal, Money::MAX);
        assert_eq!(view.summary.total, Money::MAX);
    }

    /// Each returned view is the state its own write produced, even while
    /// another handle is writing concurrently.
    #[test]
    fn test_returned_view_is_the_writes_own_state() {
        let store = CartStore::default();
        let other = store.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..200 {
                other.add_item(domain(&format!("other-{}.com", i), 1200));
            }
        });

        for expected in 1..=200 {
            let view = store.add_item(business_plan(1));
            let line = view.items.iter().find(|i| i.id == "hosting-2").unwrap();
            assert_eq!(line.quantity, expected);
            assert_eq!(view.summary.item_count, view.items.len());
            assert_eq!(
                view.summary.subtotal,
                view.items.iter().map(CartItem::line_total).sum::<Money>()
            );
        }

        handle.join().unwrap();
        assert_eq!(store.item_count(), 201);
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_add() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        let writer = store.clone();
        let handle = tokio::spawn(async move {
            writer.add_item(business_plan(3));
        });

        tokio::time::timeout(std::time::Duration::from_secs(1), rx.changed())
            .await
            .expect("no notification")
            .unwrap();
        handle.await.unwrap();

        assert_eq!(rx.borrow().total().cents(), 5997);
    }
}
