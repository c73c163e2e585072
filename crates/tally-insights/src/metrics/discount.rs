//! Markdown suggestions for overstocked or stale products.
//!
//! ```text
//! ratio = stock / max(threshold, 1)
//!
//!   ratio >= 10  → 30%
//!   ratio >=  5  → 20%
//!   ratio >=  3  → 10%
//!   otherwise    →  0%
//!
//! + 10% when the stock has not moved for `stale_after_days`
//! clamped to [0, max_percent]
//! ```

use chrono::{DateTime, Utc};
use tally_core::types::Product;

use crate::config::DiscountSettings;
use crate::metrics::stock::effective_threshold;
use crate::types::DiscountSuggestion;

const STALE_BONUS_PERCENT: u8 = 10;

/// Stock on hand as a multiple of the threshold.
pub fn overstock_ratio(current_stock: i64, threshold: i64) -> f64 {
    current_stock.max(0) as f64 / threshold.max(1) as f64
}

/// Whole days since the product record last changed. Never negative.
pub fn stock_age_days(product: &Product, as_of: DateTime<Utc>) -> i64 {
    (as_of - product.updated_at).num_days().max(0)
}

/// Suggested discount, 0 to `settings.max_percent` inclusive.
pub fn discount_percentage(
    product: &Product,
    threshold: i64,
    settings: &DiscountSettings,
    as_of: DateTime<Utc>,
) -> u8 {
    if product.current_stock <= 0 {
        return 0;
    }

    let ratio = overstock_ratio(product.current_stock, threshold);
    let mut percent: u8 = if ratio >= 10.0 {
        30
    } else if ratio >= 5.0 {
        20
    } else if ratio >= 3.0 {
        10
    } else {
        0
    };

    if stock_age_days(product, as_of) >= i64::from(settings.stale_after_days) {
        percent = percent.saturating_add(STALE_BONUS_PERCENT);
    }

    percent.min(settings.max_percent).min(100)
}

/// One suggestion per active product with a non-zero discount.
pub fn discount_suggestions(
    products: &[Product],
    default_threshold: i64,
    settings: &DiscountSettings,
    as_of: DateTime<Utc>,
) -> Vec<DiscountSuggestion> {
    products
        .iter()
        .filter(|p| p.is_active)
        .filter_map(|p| {
            let threshold = effective_threshold(p, default_threshold);
            let percent = discount_percentage(p, threshold, settings, as_of);

            (percent > 0).then(|| DiscountSuggestion {
                product_id: p.id.clone(),
                name: p.name.clone(),
                current_stock: p.current_stock,
                overstock_ratio: overstock_ratio(p.current_stock, threshold),
                stock_age_days: stock_age_days(p, as_of),
                discount_percent: percent,
                discounted_price: p.price().apply_percentage_discount(u32::from(percent) * 100),
            })
        })
        .collect()
}
