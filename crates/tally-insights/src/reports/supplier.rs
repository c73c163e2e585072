//! Supplier scorecard.

use std::collections::HashMap;

use tally_core::money::Money;
use tally_core::types::{PurchaseOrder, Supplier};
use tracing::{debug, warn};

use crate::types::SupplierPerformance;

#[derive(Default)]
struct Tally {
    orders: usize,
    with_dates: usize,
    on_time: usize,
    spend: Money,
}

/// One line per supplier, in supplier order. Draft and cancelled orders are
/// ignored, matching what the income statement books as COGS.
pub fn supplier_performance(suppliers: &[Supplier], orders: &[PurchaseOrder]) -> Vec<SupplierPerformance> {
    let mut tallies: HashMap<&str, Tally> = suppliers
        .iter()
        .map(|s| (s.id.as_str(), Tally::default()))
        .collect();

    for order in orders
        .iter()
        .filter(|o| o.status.is_committed())
    {
        let Some(tally) = tallies.get_mut(order.supplier_id.as_str()) else {
            warn!(
                order_id = %order.id,
                supplier_id = %order.supplier_id,
                "Skipping purchase order for unknown supplier"
            );
            continue;
        };

        tally.orders += 1;
        tally.spend += order.total();
        if let Some(on_time) = order.delivered_on_time() {
            tally.with_dates += 1;
            if on_time {
                tally.on_time += 1;
            }
        }
    }

    let lines: Vec<SupplierPerformance> = suppliers
        .iter()
        .map(|s| {
            let tally = tallies.get(s.id.as_str());
            let (orders, with_dates, on_time, spend) = tally
                .map(|t| (t.orders, t.with_dates, t.on_time, t.spend))
                .unwrap_or_default();

            SupplierPerformance {
                supplier_id: s.id.clone(),
                name: s.name.clone(),
                order_count: orders,
                delivered_with_dates: with_dates,
                on_time_delivery_rate: on_time_rate(on_time, with_dates),
                average_order_value: Money::average(spend, orders),
                total_spend: spend,
            }
        })
        .collect();

    debug!(suppliers = lines.len(), orders = orders.len(), "Supplier performance computed");
    lines
}

fn on_time_rate(on_time: usize, with_dates: usize) -> f64 {
    if with_dates == 0 {
        return 0.0;
    }
    on_time as f64 / with_dates as f64 * 100.0
}
