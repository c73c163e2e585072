//! Customer tier report.

use std::collections::HashMap;

use tally_core::money::Money;
use tally_core::types::{Customer, Sale};
use tracing::debug;

use crate::config::SegmentThresholds;
use crate::metrics::segment::tier_for_spend;
use crate::types::{CustomerSegment, CustomerSegmentReport, CustomerTier, SegmentDistribution};

/// Completed-sale totals per customer id.
pub fn spend_by_customer(sales: &[Sale]) -> HashMap<&str, Money> {
    let mut spend: HashMap<&str, Money> = HashMap::new();
    for sale in sales.iter().filter(|s| s.is_completed()) {
        if let Some(customer_id) = sale.customer_id.as_deref() {
            *spend.entry(customer_id).or_default() += sale.total();
        }
    }
    spend
}

/// Tiers every customer. A stored lifetime spend wins; otherwise spend is
/// summed from `sales`.
///
/// Segments are ordered by spend, highest first; customers with equal spend
/// keep their input order.
pub fn customer_segments(
    customers: &[Customer],
    sales: &[Sale],
    thresholds: &SegmentThresholds,
) -> CustomerSegmentReport {
    let derived = spend_by_customer(sales);
    let mut distribution = SegmentDistribution::default();

    let mut segments: Vec<CustomerSegment> = customers
        .iter()
        .map(|c| {
            let total_spent = c
                .total_spent_cents
                .map(Money::from_cents)
                .or_else(|| derived.get(c.id.as_str()).copied())
                .unwrap_or_default();
            let tier = tier_for_spend(total_spent, thresholds);

            match tier {
                CustomerTier::Gold => distribution.gold += 1,
                CustomerTier::Silver => distribution.silver += 1,
                CustomerTier::Bronze => distribution.bronze += 1,
            }

            CustomerSegment {
                customer_id: c.id.clone(),
                name: c.name.clone(),
                total_spent,
                loyalty_points: c.loyalty_points,
                tier,
            }
        })
        .collect();

    segments.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));

    debug!(
        customers = segments.len(),
        gold = distribution.gold,
        silver = distribution.silver,
        bronze = distribution.bronze,
        "Customer segments computed"
    );

    CustomerSegmentReport {
        segments,
        distribution,
    }
}
