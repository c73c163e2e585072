//! Period-over-period revenue by category and by product.
//!
//! ```text
//!   previous period        period
//! ├──────────────────┼──────────────────┤
//! start − len       start              end
//!
//! growth = (revenue − previous) / previous × 100    (0 when previous = 0)
//! ```

use std::collections::HashMap;

use tally_core::money::Money;
use tally_core::types::{Product, Sale, SaleItem};
use tracing::debug;

use crate::types::{PerformanceLine, PerformanceReport, ReportPeriod};

/// Label for line items with no category anywhere.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Revenue per category. A line item's frozen category wins over the
/// product's current one.
pub fn category_performance(sales: &[Sale], products: &[Product], period: ReportPeriod) -> PerformanceReport {
    let categories: HashMap<&str, &str> = products
        .iter()
        .filter_map(|p| p.category.as_deref().map(|c| (p.id.as_str(), c)))
        .collect();

    let report = grouped(sales, period, |item| {
        let category = item
            .category_snapshot
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| categories.get(item.product_id.as_str()).copied())
            .unwrap_or(UNCATEGORIZED);
        (category.to_string(), category.to_string())
    });

    debug!(categories = report.lines.len(), "Category performance computed");
    report
}

/// Revenue per product.
pub fn product_performance(sales: &[Sale], period: ReportPeriod) -> PerformanceReport {
    let report = grouped(sales, period, |item| {
        (item.product_id.clone(), item.name_snapshot.clone())
    });

    debug!(products = report.lines.len(), "Product performance computed");
    report
}

/// Growth in percent, 0 when there is nothing to compare against.
pub fn growth_percent(current: Money, previous: Money) -> f64 {
    (current - previous).percent_of(previous)
}

fn grouped<F>(sales: &[Sale], period: ReportPeriod, key_of: F) -> PerformanceReport
where
    F: Fn(&SaleItem) -> (String, String),
{
    let previous_period = period.previous();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut lines: Vec<PerformanceLine> = Vec::new();

    for sale in sales.iter().filter(|s| s.is_completed()) {
        let current = period.contains(sale.created_at);
        if !current && !previous_period.contains(sale.created_at) {
            continue;
        }

        for item in &sale.items {
            let (key, name) = key_of(item);
            let slot = match slots.get(&key) {
                Some(&slot) => slot,
                None => {
                    lines.push(PerformanceLine {
                        key: key.clone(),
                        name,
                        revenue: Money::zero(),
                        quantity: 0,
                        previous_revenue: Money::zero(),
                        growth_percent: 0.0,
                        is_new: false,
                    });
                    slots.insert(key, lines.len() - 1);
                    lines.len() - 1
                }
            };

            let line = &mut lines[slot];
            if current {
                line.revenue += item.line_total();
                line.quantity = line.quantity.saturating_add(item.quantity);
            } else {
                line.previous_revenue += item.line_total();
            }
        }
    }

    for line in &mut lines {
        line.growth_percent = growth_percent(line.revenue, line.previous_revenue);
        line.is_new = line.previous_revenue.is_zero() && line.revenue.is_positive();
    }

    lines.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    PerformanceReport {
        period,
        previous_period,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{as_of, days_ago, item, product, sale};
    use tally_core::types::SaleStatus;

    fn last_week() -> ReportPeriod {
        ReportPeriod::trailing_days(as_of(), 7)
    }

    fn categorized(product_id: &str, category: &str, qty: i64, total: i64) -> SaleItem {
        let mut line = item(product_id, qty, total);
        line.category_snapshot = Some(category.to_string());
        line
    }

    #[test]
    fn test_growth_percent() {
        assert_eq!(growth_percent(Money::from_cents(150), Money::from_cents(100)), 50.0);
        assert_eq!(growth_percent(Money::from_cents(50), Money::from_cents(100)), -50.0);
        assert_eq!(growth_percent(Money::from_cents(500), Money::zero()), 0.0);
    }

    #[test]
    fn test_category_growth_and_ordering() {
        let sales = vec![
            sale("p1", days_ago(10), 1000, vec![categorized("a", "Drinks", 10, 1000)]),
            sale("c1", days_ago(2), 1500, vec![categorized("a", "Drinks", 15, 1500)]),
            sale("c2", days_ago(1), 4000, vec![categorized("b", "Snacks", 4, 4000)]),
        ];

        let report = category_performance(&sales, &[], last_week());
        assert_eq!(report.lines.len(), 2);

        let snacks = &report.lines[0];
        assert_eq!(snacks.key, "Snacks");
        assert_eq!(snacks.revenue.cents(), 4000);
        assert_eq!(snacks.growth_percent, 0.0);
        assert!(snacks.is_new);

        let drinks = &report.lines[1];
        assert_eq!(drinks.revenue.cents(), 1500);
        assert_eq!(drinks.previous_revenue.cents(), 1000);
        assert!((drinks.growth_percent - 50.0).abs() < 1e-9);
        assert!(!drinks.is_new);
        assert_eq!(drinks.quantity, 15);
    }

    #[test]
    fn test_category_falls_back_to_product_then_default() {
        let mut stocked = product("a", 10);
        stocked.category = Some("Bakery".to_string());

        let sales = vec![sale(
            "s1",
            days_ago(1),
            300,
            vec![item("a", 1, 200), item("z", 1, 100)],
        )];

        let report = category_performance(&sales, &[stocked], last_week());
        let keys: Vec<&str> = report.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["Bakery", UNCATEGORIZED]);
    }

    #[test]
    fn test_products_that_stopped_selling() {
        let sales = vec![sale("p1", days_ago(9), 800, vec![item("gone", 8, 800)])];

        let report = product_performance(&sales, last_week());
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].revenue, Money::zero());
        assert!((report.lines[0].growth_percent + 100.0).abs() < 1e-9);
        assert!(!report.lines[0].is_new);
    }

    #[test]
    fn test_ignores_voided_and_older_sales() {
        let mut voided = sale("v", days_ago(1), 900, vec![item("a", 9, 900)]);
        voided.status = SaleStatus::Voided;
        let ancient = sale("x", days_ago(30), 900, vec![item("a", 9, 900)]);

        let report = product_performance(&[voided, ancient], last_week());
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_equal_revenue_keeps_first_appearance() {
        let sales = vec![sale(
            "s1",
            days_ago(1),
            200,
            vec![item("b", 1, 100), item("a", 1, 100)],
        )];

        let report = product_performance(&sales, last_week());
        let keys: Vec<&str> = report.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
