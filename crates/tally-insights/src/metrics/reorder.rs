//! Reorder-quantity suggestion.
//!
//! ```text
//! avg_daily = units sold in the lookback window / lookback_days
//! target    = max(ceil(avg_daily × coverage_days), threshold × min_stock_multiplier)
//! quantity  = max(0, target − current_stock)
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tally_core::types::{Product, Sale};

use crate::config::ReorderSettings;
use crate::metrics::stock::{effective_threshold, is_low_stock};
use crate::types::{ReorderSuggestion, ReportPeriod};

/// Units sold per product across completed sales inside `period`.
pub fn units_sold_by_product<'a>(sales: &'a [Sale], period: &ReportPeriod) -> HashMap<&'a str, i64> {
    let mut units: HashMap<&str, i64> = HashMap::new();

    for sale in sales
        .iter()
        .filter(|s| s.is_completed() && period.contains(s.created_at))
    {
        for item in &sale.items {
            let sold = units.entry(item.product_id.as_str()).or_default();
            *sold = sold.saturating_add(item.quantity);
        }
    }

    units
}

/// Average units per day. Zero for an empty window.
pub fn average_daily_demand(units_sold: i64, lookback_days: u32) -> f64 {
    if lookback_days == 0 {
        return 0.0;
    }
    units_sold.max(0) as f64 / f64::from(lookback_days)
}

/// Suggested order quantity. Never negative.
pub fn reorder_quantity(
    current_stock: i64,
    average_daily_demand: f64,
    threshold: i64,
    settings: &ReorderSettings,
) -> i64 {
    let demand_target = if average_daily_demand.is_finite() && average_daily_demand > 0.0 {
        (average_daily_demand * f64::from(settings.coverage_days)).ceil() as i64
    } else {
        0
    };
    let floor_target = threshold.max(0).saturating_mul(settings.min_stock_multiplier);
    let target = demand_target.max(floor_target);

    target.saturating_sub(current_stock).max(0)
}

/// One suggestion per active low-stock product that needs a non-zero order.
pub fn reorder_suggestions(
    products: &[Product],
    sales: &[Sale],
    default_threshold: i64,
    settings: &ReorderSettings,
    as_of: DateTime<Utc>,
) -> Vec<ReorderSuggestion> {
    let window = ReportPeriod::trailing_days(as_of, settings.lookback_days);
    let units = units_sold_by_product(sales, &window);

    products
        .iter()
        .filter(|p| p.is_active)
        .filter_map(|p| {
            let threshold = effective_threshold(p, default_threshold);
            if !is_low_stock(p, threshold) {
                return None;
            }

            let sold = units.get(p.id.as_str()).copied().unwrap_or(0);
            let demand = average_daily_demand(sold, settings.lookback_days);
            let quantity = reorder_quantity(p.current_stock, demand, threshold, settings);

            (quantity > 0).then(|| ReorderSuggestion {
                product_id: p.id.clone(),
                name: p.name.clone(),
                current_stock: p.current_stock,
                average_daily_demand: demand,
                suggested_quantity: quantity,
                estimated_cost: p.cost().multiply_quantity(quantity),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{as_of, days_ago, item, product, sale};
    use tally_core::types::SaleStatus;

    fn settings() -> ReorderSettings {
        ReorderSettings {
            lookback_days: 30,
            coverage_days: 14,
            min_stock_multiplier: 2,
        }
    }

    #[test]
    fn test_quantity_covers_demand() {
        // 2 units/day × 14 days = 28 target, 3 on hand
        assert_eq!(reorder_quantity(3, 2.0, 5, &settings()), 25);
    }

    #[test]
    fn test_quantity_respects_floor_without_demand() {
        // no sales: target is threshold × 2 = 10
        assert_eq!(reorder_quantity(3, 0.0, 5, &settings()), 7);
    }

    #[test]
    fn test_quantity_never_negative() {
        for stock in [-50, -1, 0, 1, 10, 1_000, i64::MAX] {
            for demand in [0.0, 0.1, 3.5, 1e6, f64::NAN, f64::INFINITY, -4.0] {
                for threshold in [-5, 0, 5, 100] {
                    let qty = reorder_quantity(stock, demand, threshold, &settings());
                    assert!(qty >= 0, "stock {stock} demand {demand} threshold {threshold}");
                }
            }
        }
    }

    #[test]
    fn test_negative_stock_is_refilled() {
        assert_eq!(reorder_quantity(-4, 0.0, 5, &settings()), 14);
    }

    #[test]
    fn test_average_daily_demand() {
        assert_eq!(average_daily_demand(60, 30), 2.0);
        assert_eq!(average_daily_demand(60, 0), 0.0);
        assert_eq!(average_daily_demand(0, 30), 0.0);
    }

    #[test]
    fn test_units_sold_skips_voided_and_old_sales() {
        let mut voided = sale("v", days_ago(1), 500, vec![item("a", 5, 500)]);
        voided.status = SaleStatus::Voided;
        let sales = vec![
            sale("s1", days_ago(1), 200, vec![item("a", 2, 200)]),
            sale("s2", days_ago(40), 900, vec![item("a", 9, 900)]),
            voided,
        ];

        let window = ReportPeriod::trailing_days(as_of(), 30);
        let units = units_sold_by_product(&sales, &window);
        assert_eq!(units.get("a"), Some(&2));
    }

    #[test]
    fn test_suggestions_only_for_low_stock() {
        let products = vec![product("low", 2), product("ok", 50)];
        let sales = vec![sale(
            "s1",
            days_ago(3),
            3000,
            vec![item("low", 30, 3000), item("ok", 30, 3000)],
        )];

        let suggestions = reorder_suggestions(&products, &sales, 5, &settings(), as_of());
        assert_eq!(suggestions.len(), 1);

        let s = &suggestions[0];
        assert_eq!(s.product_id, "low");
        assert!((s.average_daily_demand - 1.0).abs() < 1e-9);
        // ceil(1.0 × 14) = 14 target, 2 on hand
        assert_eq!(s.suggested_quantity, 12);
        assert_eq!(s.estimated_cost.cents(), 12 * 600);
    }
}
