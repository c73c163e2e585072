//! Sales summary over a trailing window.

use std::collections::HashMap;

use tally_core::money::Money;
use tally_core::types::{PaymentMethod, Sale};
use tracing::debug;

use crate::types::{DailyReport, PaymentBreakdown, ReportPeriod, TopProduct};

/// Summarizes completed sales inside `period`.
///
/// Products are ranked by quantity sold; ties keep the order in which the
/// products first appear in `sales`. Payment methods are ranked by amount
/// the same way.
pub fn daily_report(sales: &[Sale], period: ReportPeriod, top_n: usize) -> DailyReport {
    let completed: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.is_completed() && period.contains(s.created_at))
        .collect();

    let total_sales: Money = completed.iter().map(|s| s.total()).sum();
    let total_transactions = completed.len();

    let mut top_products = rank_products(&completed);
    top_products.truncate(top_n);

    let payment_breakdown = payment_breakdown(&completed);

    debug!(
        transactions = total_transactions,
        total_cents = total_sales.cents(),
        top = top_products.len(),
        "Daily report computed"
    );

    DailyReport {
        period,
        total_sales,
        total_transactions,
        average_transaction: Money::average(total_sales, total_transactions),
        top_products,
        payment_breakdown,
    }
}

fn rank_products(sales: &[&Sale]) -> Vec<TopProduct> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut products: Vec<TopProduct> = Vec::new();

    for item in sales.iter().flat_map(|s| s.items.iter()) {
        let slot = *slots.entry(item.product_id.as_str()).or_insert_with(|| {
            products.push(TopProduct {
                product_id: item.product_id.clone(),
                name: item.name_snapshot.clone(),
                quantity_sold: 0,
                revenue: Money::zero(),
            });
            products.len() - 1
        });

        let entry = &mut products[slot];
        entry.quantity_sold = entry.quantity_sold.saturating_add(item.quantity);
        entry.revenue += item.line_total();
    }

    // stable: ties stay in first-appearance order
    products.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    products
}

fn payment_breakdown(sales: &[&Sale]) -> Vec<PaymentBreakdown> {
    let mut slots: HashMap<PaymentMethod, usize> = HashMap::new();
    let mut rows: Vec<PaymentBreakdown> = Vec::new();

    for sale in sales {
        let slot = *slots.entry(sale.payment_method).or_insert_with(|| {
            rows.push(PaymentBreakdown {
                method: sale.payment_method,
                amount: Money::zero(),
                count: 0,
            });
            rows.len() - 1
        });

        rows[slot].amount += sale.total();
        rows[slot].count += 1;
    }

    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}
