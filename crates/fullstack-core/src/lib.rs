//! # fullstack-core: Pure Storefront Logic
//!
//! This crate holds the storefront's business rules as pure functions and
//! value types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fullstack Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web client (page views)                      │   │
//! │  │   Domain Search ──► Hosting Plans ──► Cart ──► Checkout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 fullstack-store (CartStore handle)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fullstack-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ catalog │ │ domains │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line item types (CartItem, ItemKind, BillingCycle, TaxRate)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart value type and its order summary
//! - [`catalog`] - Hosting plan catalog
//! - [`domains`] - Domain quotes and the availability provider seam
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use fullstack_core::{Cart, ItemKind, Money, NewCartItem};
//!
//! let mut cart = Cart::new();
//! let domain = NewCartItem::new("example.com", "example.com", Money::from_cents(1200), ItemKind::Domain)
//!     .unwrap();
//! cart.add_item(domain);
//!
//! assert_eq!(cart.total().to_string(), "$12.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod domains;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartSummary};
pub use catalog::{HostingPlan, HOSTING_PLANS};
pub use domains::{search_domains, Availability, AvailabilityProvider, DomainQuote, StaticAvailability};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied on the order summary, in basis points (10%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Top-level domains offered by the domain search page, in display order.
pub const SUPPORTED_TLDS: &[&str] = &[".com", ".net", ".org", ".io", ".dev", ".app", ".co", ".ai"];

/// Maximum length of a single DNS label.
pub const MAX_DOMAIN_LABEL_LEN: usize = 63;
