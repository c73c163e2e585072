//! Low-stock detection.

use tally_core::types::Product;

use crate::types::LowStockAlert;

/// The product's own reorder level, or the configured default.
#[inline]
pub fn effective_threshold(product: &Product, default_threshold: i64) -> i64 {
    product.reorder_level.unwrap_or(default_threshold)
}

/// True iff stock is at or below `threshold`. Negative stock is low.
#[inline]
pub fn is_low_stock(product: &Product, threshold: i64) -> bool {
    product.current_stock <= threshold
}

/// Alerts for every active product at or below its threshold, in input
/// order.
pub fn low_stock_alerts(products: &[Product], default_threshold: i64) -> Vec<LowStockAlert> {
    products
        .iter()
        .filter(|p| p.is_active)
        .filter_map(|p| {
            let threshold = effective_threshold(p, default_threshold);
            is_low_stock(p, threshold).then(|| LowStockAlert {
                product_id: p.id.clone(),
                name: p.name.clone(),
                current_stock: p.current_stock,
                threshold,
            })
        })
        .collect()
}
