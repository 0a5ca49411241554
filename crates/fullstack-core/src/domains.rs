//! # Domain Quotes
//!
//! Domain search turns a single label into one quote per supported TLD.
//! Whether a name is available, and what it costs, comes from an
//! [`AvailabilityProvider`]: a registrar client in production, or the
//! deterministic [`StaticAvailability`] table for demos and tests.
//!
//! ## Search Flow
//! ```text
//! "MyBrand"
//!     │
//!     ▼
//! validate_search_query ──► "mybrand"
//!     │
//!     ▼
//! for tld in SUPPORTED_TLDS ──► provider.check("mybrand.com") ──► DomainQuote
//!     │
//!     ▼
//! quote.to_cart_item() ──► NewCartItem { id: "mybrand.com", kind: Domain }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemKind, NewCartItem};
use crate::validation::{validate_search_query, ValidationResult};
use crate::SUPPORTED_TLDS;

// =============================================================================
// Availability Provider
// =============================================================================

/// Answer from an availability provider for one fully-qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Free to register at this yearly price.
    Available { price: Money, premium: bool },
    Taken,
}

/// Source of truth for domain availability.
pub trait AvailabilityProvider {
    /// Checks a fully-qualified, lowercase name such as `mybrand.com`.
    fn check(&self, domain: &str) -> Availability;
}

// =============================================================================
// Domain Quote
// =============================================================================

/// One row of the domain search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuote {
    pub name: String,
    pub available: bool,
    /// Only present when the domain is available.
    pub price: Option<Money>,
    pub premium: bool,
}

impl DomainQuote {
    pub fn from_availability(name: impl Into<String>, availability: Availability) -> Self {
        let name = name.into();
        match availability {
            Availability::Available { price, premium } => DomainQuote {
                name,
                available: true,
                price: Some(price),
                premium,
            },
            Availability::Taken => DomainQuote {
                name,
                available: false,
                price: None,
                premium: false,
            },
        }
    }

    /// Builds the cart line for this domain.
    ///
    /// ## Errors
    /// - [`CoreError::DomainUnavailable`] if the domain is taken
    pub fn to_cart_item(&self) -> CoreResult<NewCartItem> {
        match (self.available, self.price) {
            (true, Some(price)) => Ok(NewCartItem::new(&self.name, &self.name, price, ItemKind::Domain)?),
            _ => Err(CoreError::DomainUnavailable(self.name.clone())),
        }
    }
}

/// Quotes `query` against every supported TLD, in display order.
///
/// ```rust
/// use fullstack_core::{search_domains, StaticAvailability};
///
/// let provider = StaticAvailability::default();
/// let quotes = search_domains(&provider, "MyBrand").unwrap();
/// assert_eq!(quotes[0].name, "mybrand.com");
/// assert_eq!(quotes.len(), 8);
/// ```
pub fn search_domains<P>(provider: &P, query: &str) -> ValidationResult<Vec<DomainQuote>>
where
    P: AvailabilityProvider + ?Sized,
{
    let label = validate_search_query(query)?;

    Ok(SUPPORTED_TLDS
        .iter()
        .map(|tld| {
            let name = format!("{}{}", label, tld);
            let availability = provider.check(&name);
            DomainQuote::from_availability(name, availability)
        })
        .collect())
}

// =============================================================================
// Static Availability
// =============================================================================

/// A fixed, in-memory availability table.
///
/// - Names in `registered` are taken
/// - Everything else is available at its TLD's yearly price
/// - Names in `premium` are available at [`StaticAvailability::PREMIUM_MULTIPLIER`]× the price
/// - TLDs without a price are reported as taken
#[derive(Debug, Clone)]
pub struct StaticAvailability {
    registered: HashSet<String>,
    premium: HashSet<String>,
    prices: HashMap<String, Money>,
}

impl StaticAvailability {
    pub const PREMIUM_MULTIPLIER: i64 = 10;

    /// Empty table: nothing registered, no TLDs priced.
    pub fn empty() -> Self {
        StaticAvailability {
            registered: HashSet::new(),
            premium: HashSet::new(),
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, tld: &str, price: Money) -> Self {
        self.prices.insert(tld.to_lowercase(), price);
        self
    }

    pub fn with_registered(mut self, domain: &str) -> Self {
        self.registered.insert(domain.to_lowercase());
        self
    }

    pub fn with_premium(mut self, domain: &str) -> Self {
        self.premium.insert(domain.to_lowercase());
        self
    }

    fn tld_of(domain: &str) -> Option<&str> {
        domain.rfind('.').map(|idx| &domain[idx..])
    }
}

/// The table the demo storefront ships with: every supported TLD priced,
/// a few well-known names already registered.
impl Default for StaticAvailability {
    fn default() -> Self {
        StaticAvailability::empty()
            .with_price(".com", Money::from_cents(1200))
            .with_price(".net", Money::from_cents(1400))
            .with_price(".org", Money::from_cents(1300))
            .with_price(".io", Money::from_cents(3200))
            .with_price(".dev", Money::from_cents(1500))
            .with_price(".app", Money::from_cents(1800))
            .with_price(".co", Money::from_cents(2500))
            .with_price(".ai", Money::from_cents(3200))
            .with_registered("yourbrand.com")
            .with_registered("tech.com")
            .with_registered("tech.io")
            .with_registered("google.com")
            .with_premium("startup.ai")
            .with_premium("digital.io")
    }
}

impl AvailabilityProvider for StaticAvailability {
    fn check(&self, domain: &str) -> Availability {
        let domain = domain.to_lowercase();

        if self.registered.contains(&domain) {
            return Availability::Taken;
        }

        let Some(base) = Self::tld_of(&domain).and_then(|tld| self.prices.get(tld)) else {
            return Availability::Taken;
        };

        if self.premium.contains(&domain) {
            Availability::Available {
                price: base.multiply_quantity(Self::PREMIUM_MULTIPLIER),
                premium: true,
            }
        } else {
            Availability::Available {
                price: *base,
                premium: false,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
