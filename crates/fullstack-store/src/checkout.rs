//! # Checkout Handoff
//!
//! Moves the cart into an order. Payment itself happens elsewhere; this
//! module only gates entry to checkout and clears the cart once the order is
//! placed.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  prepare_checkout  ┌──────────────┐  confirm_order  ┌─────┐│
//! │  │   Cart   │───────────────────►│ CheckoutDraft│────────────────►│Order││
//! │  │ (items)  │                    │  (snapshot)  │                 │     ││
//! │  └──────────┘                    └──────────────┘                 └─────┘│
//! │       ▲          │                       │                          │   │
//! │       │    NotSignedIn /           cart untouched             cart cleared│
//! │       │     EmptyCart                                                   │
//! │       └──────────┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

use fullstack_core::{CartItem, CartSummary};

use crate::cart_store::CartStore;
use crate::error::{StoreError, StoreResult};
use crate::session::SessionProvider;

/// What the checkout page shows before payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub id: String,
    pub customer_id: String,
    /// Prefills the billing email field.
    pub customer_email: String,
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
}

/// A placed order, listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub checkout_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

/// Opens checkout for the current cart.
///
/// ## Errors
/// - [`StoreError::NotSignedIn`] if nobody is signed in
/// - [`StoreError::EmptyCart`] if the cart has no items
///
/// The sign-in check runs first, matching the cart page: an anonymous
/// visitor is sent to log in even with an empty cart.
pub fn prepare_checkout<S>(cart: &CartStore, session: &S) -> StoreResult<CheckoutDraft>
where
    S: SessionProvider + ?Sized,
{
    let customer = session.current_customer().ok_or_else(|| {
        warn!("Checkout attempted without a signed-in customer");
        StoreError::NotSignedIn
    })?;

    let view = cart.view();
    if view.items.is_empty() {
        warn!(customer_id = %customer.id, "Checkout attempted with an empty cart");
        return Err(StoreError::EmptyCart);
    }

    let draft = CheckoutDraft {
        id: Uuid::new_v4().to_string(),
        customer_id: customer.id,
        customer_email: customer.email,
        items: view.items,
        summary: view.summary,
        created_at: Utc::now(),
    };

    info!(
        checkout_id = %draft.id,
        items = draft.summary.item_count,
        total = %draft.summary.total,
        "Checkout prepared"
    );
    Ok(draft)
}

/// Places the order for a prepared checkout and empties the cart.
///
/// The cart is compared with the draft and cleared in one step: an item
/// another view adds concurrently either makes the draft stale or stays in
/// the cart, but is never dropped.
///
/// ## Errors
/// - [`StoreError::StaleCheckout`] if the cart no longer holds exactly the
///   items the draft was prepared from
pub fn confirm_order(cart: &CartStore, draft: CheckoutDraft) -> StoreResult<Order> {
    let cleared = cart.clear_if(|c| c.items() == draft.items.as_slice());
    if !cleared {
        warn!(checkout_id = %draft.id, "Cart changed after checkout was prepared");
        return Err(StoreError::StaleCheckout { draft_id: draft.id });
    }

    let order = Order {
        id: Uuid::new_v4().to_string(),
        checkout_id: draft.id,
        customer_id: draft.customer_id,
        status: OrderStatus::Placed,
        items: draft.items,
        summary: draft.summary,
        placed_at: Utc::now(),
    };

    info!(order_id = %order.id, total = %order.summary.total, "Order placed");
    Ok(order)
}
