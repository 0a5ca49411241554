//! # fullstack-store: Shared Storefront State
//!
//! The stateful half of the storefront. Everything here wraps the pure types
//! from `fullstack-core` in handles that page views can share.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    fullstack-store                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   CartStore     │   │  SessionState   │   │  StorefrontConfig   │   │
//! │  │ (watch channel) │   │ (RwLock<Option>)│   │  (TOML + env)       │   │
//! │  └────────┬────────┘   └────────┬────────┘   └──────────┬──────────┘   │
//! │           │                     │                       │              │
//! │           └──────────┬──────────┘                       │              │
//! │                      ▼                                  │              │
//! │            ┌──────────────────┐                         │              │
//! │            │     checkout     │◄────────────────────────┘              │
//! │            │ prepare / confirm│       (tax rate, formatting)           │
//! │            └──────────────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use fullstack_store::{prepare_checkout, CartStore, SessionState};
//! use fullstack_core::{BillingCycle, HostingPlan};
//!
//! let cart = CartStore::default();
//! let plan = HostingPlan::find(2).unwrap();
//! cart.add_item(plan.to_cart_item(BillingCycle::Monthly).unwrap());
//!
//! let session = SessionState::new();
//! session.register("Jane", "jane@fullstack.rw", "secret1", "secret1").unwrap();
//!
//! let draft = prepare_checkout(&cart, &session).unwrap();
//! assert_eq!(draft.summary.subtotal.to_string(), "$19.99");
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart_store::{CartStore, CartView};
pub use checkout::{confirm_order, prepare_checkout, CheckoutDraft, Order, OrderStatus};
pub use config::StorefrontConfig;
pub use error::{ApiError, ErrorCode, StoreError, StoreResult};
pub use session::{Customer, SessionProvider, SessionState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fullstack_store=trace` - Trace this crate only
/// - Default: `info`, with `debug` for the storefront crates
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fullstack_store=debug,fullstack_core=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
