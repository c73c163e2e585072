//! # Derived View Models
//!
//! Everything the engine returns. These are computed per call and never
//! stored; each one is a plain struct the presentation layer renders.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tally_core::money::{Money, VatSplit};
use tally_core::types::PaymentMethod;

// =============================================================================
// Report Period
// =============================================================================

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportPeriod {
    #[ts(as = "String")]
    pub start: DateTime<Utc>,
    #[ts(as = "String")]
    pub end: DateTime<Utc>,
}

impl ReportPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        ReportPeriod { start, end }
    }

    /// The `days` days leading up to `as_of`. The start is clamped to the
    /// earliest representable instant.
    pub fn trailing_days(as_of: DateTime<Utc>, days: u32) -> Self {
        let start = as_of
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        ReportPeriod { start, end: as_of }
    }

    /// Whole calendar days `[first, last]`, UTC.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        let start = first.and_time(NaiveTime::MIN).and_utc();
        let end = last
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        ReportPeriod { start, end }
    }

    /// The period of equal length immediately before this one.
    pub fn previous(&self) -> Self {
        let length = self.end - self.start;
        ReportPeriod {
            start: self
                .start
                .checked_sub_signed(length)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: self.start,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// A calendar date is inside when its midnight is.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN).and_utc())
    }
}

// =============================================================================
// Stock Insights
// =============================================================================

/// A product at or below its low-stock threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LowStockAlert {
    pub product_id: String,
    pub name: String,
    pub current_stock: i64,
    pub threshold: i64,
}

/// A recommended purchase quantity for a low-stock product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReorderSuggestion {
    pub product_id: String,
    pub name: String,
    pub current_stock: i64,
    /// Units sold per day over the lookback window.
    pub average_daily_demand: f64,
    pub suggested_quantity: i64,
    /// Suggested quantity at the product's unit cost.
    pub estimated_cost: Money,
}

/// A suggested markdown for overstocked or stale stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSuggestion {
    pub product_id: String,
    pub name: String,
    pub current_stock: i64,
    /// Stock on hand as a multiple of the low-stock threshold.
    pub overstock_ratio: f64,
    /// Days since the last stock movement.
    pub stock_age_days: i64,
    pub discount_percent: u8,
    pub discounted_price: Money,
}

// =============================================================================
// Daily Report
// =============================================================================

/// A product ranked by quantity sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: Money,
}

/// Takings per payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentBreakdown {
    pub method: PaymentMethod,
    pub amount: Money,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    pub period: ReportPeriod,
    pub total_sales: Money,
    pub total_transactions: usize,
    /// Zero when there are no transactions.
    pub average_transaction: Money,
    pub top_products: Vec<TopProduct>,
    pub payment_breakdown: Vec<PaymentBreakdown>,
}

// =============================================================================
// Customer Segments
// =============================================================================

/// Customer tier. Ordering follows value: `Bronze < Silver < Gold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    Bronze,
    Silver,
    Gold,
}

impl CustomerTier {
    pub fn label(&self) -> &'static str {
        match self {
            CustomerTier::Bronze => "Bronze",
            CustomerTier::Silver => "Silver",
            CustomerTier::Gold => "Gold",
        }
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSegment {
    pub customer_id: String,
    pub name: String,
    pub total_spent: Money,
    pub loyalty_points: i64,
    pub tier: CustomerTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SegmentDistribution {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSegmentReport {
    pub segments: Vec<CustomerSegment>,
    pub distribution: SegmentDistribution,
}

// =============================================================================
// Expenses
// =============================================================================

/// Where an expense's category label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    /// Matched a keyword rule.
    Keyword,
    /// No rule matched; the category typed in by the user.
    Recorded,
    /// Nothing to go on.
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorizedExpense {
    pub expense_id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub source: CategorySource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseCategoryTotal {
    pub category: String,
    pub amount: Money,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseReport {
    pub expenses: Vec<CategorizedExpense>,
    /// Sorted by amount, largest first.
    pub totals: Vec<ExpenseCategoryTotal>,
    pub total: Money,
}

// =============================================================================
// Suppliers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierPerformance {
    pub supplier_id: String,
    pub name: String,
    /// Orders excluding cancelled ones.
    pub order_count: usize,
    /// Orders with both expected and actual delivery dates.
    pub delivered_with_dates: usize,
    /// Percentage 0–100; zero when no order has both dates.
    pub on_time_delivery_rate: f64,
    pub average_order_value: Money,
    pub total_spend: Money,
}

// =============================================================================
// Category / Product Performance
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerformanceLine {
    /// Category label or product id.
    pub key: String,
    pub name: String,
    pub revenue: Money,
    pub quantity: i64,
    pub previous_revenue: Money,
    /// Period-over-period revenue growth in percent.
    pub growth_percent: f64,
    /// No prior-period revenue but sales this period.
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerformanceReport {
    pub period: ReportPeriod,
    pub previous_period: ReportPeriod,
    /// Sorted by revenue, largest first.
    pub lines: Vec<PerformanceLine>,
}

// =============================================================================
// Income Statement
// =============================================================================

/// Tax levied within one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BracketTax {
    pub from: Money,
    pub up_to: Option<Money>,
    pub rate_bps: u32,
    pub taxable: Money,
    pub tax: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncomeStatement {
    pub period: Option<ReportPeriod>,
    pub vat_rate_bps: u32,
    pub revenue: VatSplit,
    pub cost_of_goods_sold: VatSplit,
    pub gross_profit: VatSplit,
    pub operating_expenses: VatSplit,
    pub operating_profit: VatSplit,
    pub other_income: VatSplit,
    pub taxable_income: VatSplit,
    pub tax: VatSplit,
    pub net_profit: VatSplit,
    pub tax_breakdown: Vec<BracketTax>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Every report computed from one data snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dashboard {
    #[ts(as = "String")]
    pub as_of: DateTime<Utc>,
    pub low_stock: Vec<LowStockAlert>,
    pub reorder: Vec<ReorderSuggestion>,
    pub discounts: Vec<DiscountSuggestion>,
    pub daily: DailyReport,
    pub customers: CustomerSegmentReport,
    pub expenses: ExpenseReport,
    pub suppliers: Vec<SupplierPerformance>,
    pub categories: PerformanceReport,
    pub income_statement: IncomeStatement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let period = ReportPeriod::new(start, end);

        assert!(period.contains(start));
        assert!(!period.contains(end));
        assert!(period.contains(end - Duration::seconds(1)));
    }

    #[test]
    fn test_previous_period_has_equal_length() {
        let period = ReportPeriod::from_dates(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let previous = period.previous();
        assert_eq!(previous.end, period.start);
        assert_eq!(previous.end - previous.start, period.end - period.start);
        assert_eq!(previous.start.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    }

    #[test]
    fn test_periods_clamp_at_calendar_limits() {
        let early = DateTime::<Utc>::MIN_UTC + Duration::days(3);
        let trailing = ReportPeriod::trailing_days(early, u32::MAX);
        assert_eq!(trailing.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(trailing.end, early);

        assert_eq!(trailing.previous().start, DateTime::<Utc>::MIN_UTC);

        let last = ReportPeriod::from_dates(NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(last.end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_contains_date() {
        let period = ReportPeriod::from_dates(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(CustomerTier::Gold > CustomerTier::Silver);
        assert!(CustomerTier::Silver > CustomerTier::Bronze);
    }
}
