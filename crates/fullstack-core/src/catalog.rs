//! # Hosting Plan Catalog
//!
//! The fixed set of hosting plans offered on the hosting page, and the
//! conversion from a chosen plan + billing cycle into a cart line.
//!
//! ```text
//! ┌──────────────┬──────────┬──────────┬──────────────────────────────┐
//! │ Plan         │ Monthly  │ Yearly   │ Cart line id                 │
//! ├──────────────┼──────────┼──────────┼──────────────────────────────┤
//! │ Starter      │   $9.99  │  $99.99  │ hosting-1                    │
//! │ Business ★   │  $19.99  │ $199.99  │ hosting-2                    │
//! │ Enterprise   │  $49.99  │ $499.99  │ hosting-3                    │
//! └──────────────┴──────────┴──────────┴──────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BillingCycle, ItemKind, NewCartItem};

/// A hosting plan as listed on the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingPlan {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub monthly: Money,
    pub yearly: Money,
    pub features: &'static [&'static str],
    /// Highlighted as "Most Popular".
    pub popular: bool,
}

/// Every plan on offer, in display order.
pub const HOSTING_PLANS: &[HostingPlan] = &[
    HostingPlan {
        id: 1,
        name: "Starter",
        description: "Perfect for personal websites and blogs",
        monthly: Money::from_cents(999),
        yearly: Money::from_cents(9999),
        features: &[
            "1 Website",
            "10 GB SSD Storage",
            "Unmetered Bandwidth",
            "Free SSL Certificate",
            "cPanel Control Panel",
            "WordPress Optimized",
        ],
        popular: false,
    },
    HostingPlan {
        id: 2,
        name: "Business",
        description: "Ideal for growing businesses and e-commerce",
        monthly: Money::from_cents(1999),
        yearly: Money::from_cents(19999),
        features: &[
            "10 Websites",
            "50 GB NVMe Storage",
            "Unmetered Bandwidth",
            "Free SSL Certificate",
            "Free Domain",
            "24/7 Priority Support",
            "Daily Backups",
            "WordPress Pre-installed",
        ],
        popular: true,
    },
    HostingPlan {
        id: 3,
        name: "Enterprise",
        description: "Maximum power for high-traffic websites",
        monthly: Money::from_cents(4999),
        yearly: Money::from_cents(49999),
        features: &[
            "Unlimited Websites",
            "200 GB NVMe Storage",
            "Unmetered Bandwidth",
            "Free SSL Certificate",
            "Free Domain",
            "24/7 Premium Support",
            "Daily Backups",
            "Advanced Security Suite",
            "Dedicated IP",
            "CDN Included",
        ],
        popular: false,
    },
];

impl HostingPlan {
    /// Looks a plan up by its catalog id.
    pub fn find(id: u32) -> CoreResult<&'static HostingPlan> {
        HOSTING_PLANS
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::PlanNotFound(id))
    }

    /// Price charged per billing period.
    pub fn price(&self, cycle: BillingCycle) -> Money {
        match cycle {
            BillingCycle::Monthly => self.monthly,
            BillingCycle::Yearly => self.yearly,
        }
    }

    /// How much yearly billing saves over twelve monthly payments.
    pub fn yearly_savings(&self) -> Money {
        self.monthly.multiply_quantity(12) - self.yearly
    }

    /// Cart line id for this plan, e.g. `hosting-2`.
    pub fn cart_item_id(&self) -> String {
        format!("hosting-{}", self.id)
    }

    /// Builds the cart line for this plan at the chosen billing cycle.
    pub fn to_cart_item(&self, cycle: BillingCycle) -> CoreResult<NewCartItem> {
        let item = NewCartItem::new(
            self.cart_item_id(),
            format!("{} Hosting", self.name),
            self.price(cycle),
            ItemKind::Hosting,
        )?;
        Ok(item.with_billing_cycle(cycle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_plan() {
        let plan = HostingPlan::find(2).unwrap();
        assert_eq!(plan.name, "Business");
        assert!(plan.popular);

        assert!(matches!(HostingPlan::find(42), Err(CoreError::PlanNotFound(42))));
    }

    #[test]
    fn test_prices_and_savings() {
        let starter = HostingPlan::find(1).unwrap();
        assert_eq!(starter.price(BillingCycle::Monthly).to_string(), "$9.99");
        assert_eq!(starter.price(BillingCycle::Yearly).to_string(), "$99.99");
        // 9.99 × 12 = 119.88; 119.88 - 99.99 = 19.89
        assert_eq!(starter.yearly_savings().to_string(), "$19.89");
    }

    #[test]
    fn test_plan_to_cart_item() {
        let item = HostingPlan::find(3)
            .unwrap()
            .to_cart_item(BillingCycle::Monthly)
            .unwrap();

        assert_eq!(item.id(), "hosting-3");
        assert_eq!(item.name(), "Enterprise Hosting");
        assert_eq!(item.price().cents(), 4999);
        assert_eq!(item.kind(), ItemKind::Hosting);
        assert_eq!(item.billing_cycle(), Some(BillingCycle::Monthly));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<u32> = HOSTING_PLANS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), HOSTING_PLANS.len());

        let line_ids: HashSet<String> = HOSTING_PLANS.iter().map(HostingPlan::cart_item_id).collect();
        assert_eq!(line_ids.len(), HOSTING_PLANS.len());
    }
}
