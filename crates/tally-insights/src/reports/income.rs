//! Income statement with VAT split and progressive tax.
//!
//! ```text
//! revenue           = Σ completed sales − Σ approved/refunded returns
//! cost of goods     = Σ ordered/received purchase orders
//! gross profit      = revenue − cost of goods
//! operating profit  = gross profit − Σ expenses
//! taxable income    = operating profit + other income
//! tax               = progressive(taxable income)
//! net profit        = operating profit + other income − tax
//! ```
//!
//! All lines are computed on VAT-inclusive amounts and then split at the
//! configured rate, so `vat + exclusive == inclusive` on every line.

use chrono::{DateTime, NaiveDate, Utc};
use tally_core::money::{Money, VatSplit};
use tally_core::types::{Expense, PurchaseOrder, Sale, SaleReturn, TaxRate};
use tracing::debug;

use crate::config::TaxBracket;
use crate::metrics::tax::progressive_tax_breakdown;
use crate::types::{IncomeStatement, ReportPeriod};

/// Everything an income statement is built from.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeInputs<'a> {
    pub sales: &'a [Sale],
    pub returns: &'a [SaleReturn],
    pub purchase_orders: &'a [PurchaseOrder],
    pub expenses: &'a [Expense],
    pub other_income: Money,
    /// When set, only records dated inside the period count.
    pub period: Option<ReportPeriod>,
}

pub fn income_statement(inputs: &IncomeInputs<'_>, vat_rate: TaxRate, brackets: &[TaxBracket]) -> IncomeStatement {
    let period = inputs.period;
    let in_period = |at: DateTime<Utc>| period.map_or(true, |p| p.contains(at));
    let date_in_period = |date: NaiveDate| period.map_or(true, |p| p.contains_date(date));

    let sales_total: Money = inputs
        .sales
        .iter()
        .filter(|s| s.is_completed() && in_period(s.created_at))
        .map(|s| s.total())
        .sum();
    let returns_total: Money = inputs
        .returns
        .iter()
        .filter(|r| r.status.reduces_revenue() && in_period(r.created_at))
        .map(|r| r.total())
        .sum();
    let cost_of_goods_sold: Money = inputs
        .purchase_orders
        .iter()
        .filter(|o| o.status.is_committed() && date_in_period(o.order_date))
        .map(|o| o.total())
        .sum();
    let operating_expenses: Money = inputs
        .expenses
        .iter()
        .filter(|e| date_in_period(e.date))
        .map(|e| e.amount())
        .sum();

    let revenue = sales_total - returns_total;
    let gross_profit = revenue - cost_of_goods_sold;
    let operating_profit = gross_profit - operating_expenses;
    let taxable_income = operating_profit + inputs.other_income;

    let tax_breakdown = progressive_tax_breakdown(taxable_income, brackets);
    let tax: Money = tax_breakdown.iter().map(|line| line.tax).sum();
    let net_profit = operating_profit + inputs.other_income - tax;

    debug!(
        revenue_cents = revenue.cents(),
        cogs_cents = cost_of_goods_sold.cents(),
        opex_cents = operating_expenses.cents(),
        tax_cents = tax.cents(),
        net_cents = net_profit.cents(),
        "Income statement computed"
    );

    let split = |amount: Money| -> VatSplit { amount.split_vat(vat_rate) };

    IncomeStatement {
        period,
        vat_rate_bps: vat_rate.bps(),
        revenue: split(revenue),
        cost_of_goods_sold: split(cost_of_goods_sold),
        gross_profit: split(gross_profit),
        operating_expenses: split(operating_expenses),
        operating_profit: split(operating_profit),
        other_income: split(inputs.other_income),
        taxable_income: split(taxable_income),
        tax: split(tax),
        net_profit: split(net_profit),
        tax_breakdown,
    }
}
