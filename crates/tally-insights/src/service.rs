//! # Insight Service
//!
//! The single entry point the presentation layer calls. Every method takes
//! caller-owned records (plus `as_of` where time matters), checks them, and
//! returns a fresh view model.
//!
//! ## Flow
//! ```text
//! ┌────────────┐   validate_all    ┌────────────┐   metrics/reports   ┌────────────┐
//! │  records   │──────────────────►│  checked   │────────────────────►│ view model │
//! └────────────┘  fail fast on the └────────────┘                     └────────────┘
//!                 first bad record
//! ```
//!
//! The service holds only its configuration and never mutates it, so one
//! instance can be shared across threads.

use chrono::{DateTime, Utc};
use tally_core::money::Money;
use tally_core::types::{Customer, Expense, Product, PurchaseOrder, Sale, Supplier};
use tally_core::validation::{
    validate_all, validate_customer, validate_expense, validate_product, validate_purchase_order,
    validate_return, validate_sale, validate_supplier,
};
use tracing::{debug, info};

use crate::config::InsightConfig;
use crate::error::InsightResult;
use crate::metrics::{self, reorder::units_sold_by_product};
use crate::reports::{self, IncomeInputs};
use crate::source::DataSource;
use crate::types::{
    CustomerSegmentReport, CustomerTier, DailyReport, Dashboard, DiscountSuggestion, ExpenseReport,
    IncomeStatement, LowStockAlert, PerformanceReport, ReorderSuggestion, ReportPeriod,
    SupplierPerformance,
};

/// Length of the performance window on the dashboard.
pub const DASHBOARD_PERFORMANCE_DAYS: u32 = 30;

/// Computes every derived metric from a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct InsightService {
    config: InsightConfig,
}

impl InsightService {
    /// Creates a service after checking the configuration.
    pub fn new(config: InsightConfig) -> InsightResult<Self> {
        config.validate()?;
        Ok(InsightService { config })
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// True when the product is at or below its effective threshold.
    pub fn is_low_stock(&self, product: &Product) -> bool {
        let threshold = metrics::effective_threshold(product, self.config.low_stock_threshold);
        metrics::is_low_stock(product, threshold)
    }

    /// One alert per active product at or below its threshold.
    pub fn low_stock_alerts(&self, products: &[Product]) -> InsightResult<Vec<LowStockAlert>> {
        validate_all(products, validate_product)?;

        let alerts = metrics::low_stock_alerts(products, self.config.low_stock_threshold);
        debug!(products = products.len(), alerts = alerts.len(), "Low-stock check");
        Ok(alerts)
    }

    /// Suggested order quantity for one product given its recent sales.
    pub fn reorder_quantity(&self, product: &Product, recent_sales: &[Sale], as_of: DateTime<Utc>) -> InsightResult<i64> {
        validate_product(product)?;
        validate_all(recent_sales, validate_sale)?;

        let settings = &self.config.reorder;
        let window = ReportPeriod::trailing_days(as_of, settings.lookback_days);
        let sold = units_sold_by_product(recent_sales, &window)
            .get(product.id.as_str())
            .copied()
            .unwrap_or(0);
        let threshold = metrics::effective_threshold(product, self.config.low_stock_threshold);

        Ok(metrics::reorder_quantity(
            product.current_stock,
            metrics::average_daily_demand(sold, settings.lookback_days),
            threshold,
            settings,
        ))
    }

    /// Reorder suggestions for every low-stock product that needs an order.
    pub fn reorder_suggestions(
        &self,
        products: &[Product],
        sales: &[Sale],
        as_of: DateTime<Utc>,
    ) -> InsightResult<Vec<ReorderSuggestion>> {
        validate_all(products, validate_product)?;
        validate_all(sales, validate_sale)?;

        let suggestions = metrics::reorder_suggestions(
            products,
            sales,
            self.config.low_stock_threshold,
            &self.config.reorder,
            as_of,
        );
        debug!(suggestions = suggestions.len(), "Reorder suggestions computed");
        Ok(suggestions)
    }

    /// Suggested discount for one product, 0 to the configured maximum.
    pub fn discount_percentage(&self, product: &Product, as_of: DateTime<Utc>) -> InsightResult<u8> {
        validate_product(product)?;

        let threshold = metrics::effective_threshold(product, self.config.low_stock_threshold);
        Ok(metrics::discount_percentage(product, threshold, &self.config.discount, as_of))
    }

    /// Markdown suggestions for overstocked or stale products.
    pub fn discount_suggestions(&self, products: &[Product], as_of: DateTime<Utc>) -> InsightResult<Vec<DiscountSuggestion>> {
        validate_all(products, validate_product)?;

        let suggestions = metrics::discount_suggestions(
            products,
            self.config.low_stock_threshold,
            &self.config.discount,
            as_of,
        );
        debug!(suggestions = suggestions.len(), "Discount suggestions computed");
        Ok(suggestions)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sales over the configured trailing window ending at `as_of`.
    pub fn daily_report(&self, sales: &[Sale], as_of: DateTime<Utc>) -> InsightResult<DailyReport> {
        validate_all(sales, validate_sale)?;

        let period = ReportPeriod::trailing_days(as_of, self.config.report.daily_window_days);
        Ok(reports::daily_report(sales, period, self.config.report.top_products))
    }

    /// Revenue by category against the preceding period of equal length.
    pub fn category_performance(
        &self,
        sales: &[Sale],
        products: &[Product],
        period: ReportPeriod,
    ) -> InsightResult<PerformanceReport> {
        validate_all(sales, validate_sale)?;
        validate_all(products, validate_product)?;

        Ok(reports::category_performance(sales, products, period))
    }

    /// Revenue by product against the preceding period of equal length.
    pub fn product_performance(&self, sales: &[Sale], period: ReportPeriod) -> InsightResult<PerformanceReport> {
        validate_all(sales, validate_sale)?;

        Ok(reports::product_performance(sales, period))
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Tier for a given cumulative spend.
    pub fn customer_tier(&self, total_spent: Money) -> CustomerTier {
        metrics::tier_for_spend(total_spent, &self.config.segment_thresholds)
    }

    /// Tier per customer plus the tier distribution.
    pub fn customer_segments(&self, customers: &[Customer], sales: &[Sale]) -> InsightResult<CustomerSegmentReport> {
        validate_all(customers, validate_customer)?;
        validate_all(sales, validate_sale)?;

        Ok(reports::customer_segments(
            customers,
            sales,
            &self.config.segment_thresholds,
        ))
    }

    // =========================================================================
    // Expenses & Suppliers
    // =========================================================================

    /// The category label for one expense.
    pub fn expense_category(&self, expense: &Expense) -> String {
        metrics::categorize(expense, &self.config.category_keywords).0
    }

    /// Category per expense plus per-category totals.
    pub fn categorize_expenses(&self, expenses: &[Expense]) -> InsightResult<ExpenseReport> {
        validate_all(expenses, validate_expense)?;

        Ok(reports::expense_report(expenses, &self.config.category_keywords))
    }

    /// Scorecard per supplier over its committed orders.
    pub fn supplier_performance(
        &self,
        suppliers: &[Supplier],
        orders: &[PurchaseOrder],
    ) -> InsightResult<Vec<SupplierPerformance>> {
        validate_all(suppliers, validate_supplier)?;
        validate_all(orders, validate_purchase_order)?;

        Ok(reports::supplier_performance(suppliers, orders))
    }

    // =========================================================================
    // Financials
    // =========================================================================

    /// Progressive tax owed on `taxable_income`.
    pub fn progressive_tax(&self, taxable_income: Money) -> Money {
        metrics::progressive_tax(taxable_income, &self.config.tax_brackets)
    }

    /// Income statement over the given inputs, each line split for VAT.
    pub fn income_statement(&self, inputs: &IncomeInputs<'_>) -> InsightResult<IncomeStatement> {
        validate_all(inputs.sales, validate_sale)?;
        validate_all(inputs.returns, validate_return)?;
        validate_all(inputs.purchase_orders, validate_purchase_order)?;
        validate_all(inputs.expenses, validate_expense)?;

        Ok(reports::income_statement(
            inputs,
            self.config.vat_rate,
            &self.config.tax_brackets,
        ))
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Runs every report against one data source.
    ///
    /// The performance report covers the last [`DASHBOARD_PERFORMANCE_DAYS`]
    /// days; the income statement covers the whole source.
    pub fn dashboard(&self, source: &dyn DataSource, as_of: DateTime<Utc>) -> InsightResult<Dashboard> {
        let products = source.products()?;
        let sales = source.sales()?;
        let customers = source.customers()?;
        let expenses = source.expenses()?;
        let suppliers = source.suppliers()?;
        let orders = source.purchase_orders()?;
        let returns = source.returns()?;
        let other_income = source.other_income()?;

        info!(
            products = products.len(),
            sales = sales.len(),
            customers = customers.len(),
            %as_of,
            "Building dashboard"
        );

        let performance_period = ReportPeriod::trailing_days(as_of, DASHBOARD_PERFORMANCE_DAYS);

        Ok(Dashboard {
            as_of,
            low_stock: self.low_stock_alerts(&products)?,
            reorder: self.reorder_suggestions(&products, &sales, as_of)?,
            discounts: self.discount_suggestions(&products, as_of)?,
            daily: self.daily_report(&sales, as_of)?,
            customers: self.customer_segments(&customers, &sales)?,
            expenses: self.categorize_expenses(&expenses)?,
            suppliers: self.supplier_performance(&suppliers, &orders)?,
            categories: self.category_performance(&sales, &products, performance_period)?,
            income_statement: self.income_statement(&IncomeInputs {
                sales: &sales,
                returns: &returns,
                purchase_orders: &orders,
                expenses: &expenses,
                other_income,
                period: None,
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;
    use crate::fixtures::{as_of, customer, expense, hours_ago, item, product, sale};
    use tally_core::CoreError;

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = InsightConfig::default();
        config.segment_thresholds.gold_cents = 0;
        assert!(matches!(
            InsightService::new(config),
            Err(InsightError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_blank_id_fails_fast() {
        let service = InsightService::default();
        let err = service.low_stock_alerts(&[product("ok", 1), product("  ", 1)]).unwrap_err();
        assert!(matches!(
            err,
            InsightError::Core(CoreError::InvalidRecord { entity: "product", .. })
        ));
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        let service = InsightService::default();
        let sales = vec![sale("s1", hours_ago(1), 0, vec![item("a", 0, 0)])];
        assert!(service.daily_report(&sales, as_of()).is_err());
    }

    #[test]
    fn test_negative_expense_rejected() {
        let service = InsightService::default();
        let err = service.categorize_expenses(&[expense("e1", "rent", -1)]).unwrap_err();
        assert!(err.to_string().contains("expense"));
    }

    #[test]
    fn test_single_record_helpers() {
        let service = InsightService::default();

        assert!(service.is_low_stock(&product("a", 5)));
        assert!(!service.is_low_stock(&product("a", 6)));
        assert_eq!(service.customer_tier(Money::from_cents(250_000)), CustomerTier::Gold);
        assert_eq!(service.expense_category(&expense("e", "Fuel for van", 10)), "Transport");
        assert_eq!(service.progressive_tax(Money::from_cents(-1)), Money::zero());
        assert_eq!(service.discount_percentage(&product("a", 50), as_of()).unwrap(), 30);
    }

    #[test]
    fn test_reorder_quantity_for_one_product() {
        let service = InsightService::default();
        let sales = vec![sale("s1", hours_ago(5), 6000, vec![item("a", 60, 6000)])];

        // 60 units over 30 days = 2/day, 14 days cover = 28, 3 on hand
        let qty = service.reorder_quantity(&product("a", 3), &sales, as_of()).unwrap();
        assert_eq!(qty, 25);
    }

    #[test]
    fn test_empty_inputs_never_error() {
        let service = InsightService::default();

        assert!(service.low_stock_alerts(&[]).unwrap().is_empty());
        assert!(service.reorder_suggestions(&[], &[], as_of()).unwrap().is_empty());
        assert!(service.discount_suggestions(&[], as_of()).unwrap().is_empty());
        assert_eq!(service.daily_report(&[], as_of()).unwrap().total_transactions, 0);
        assert!(service.customer_segments(&[], &[]).unwrap().segments.is_empty());
        assert!(service.categorize_expenses(&[]).unwrap().totals.is_empty());
        assert!(service.supplier_performance(&[], &[]).unwrap().is_empty());
        assert!(service
            .income_statement(&IncomeInputs::default())
            .unwrap()
            .tax_breakdown
            .is_empty());
    }

    #[test]
    fn test_customer_without_sales_is_bronze() {
        let service = InsightService::default();
        let report = service.customer_segments(&[customer("c1", None)], &[]).unwrap();
        assert_eq!(report.segments[0].tier, CustomerTier::Bronze);
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InsightService>();
    }
}
