//! # Domain Types
//!
//! Records the analytics engine reads. They are owned by the external data
//! layer; nothing in Tally mutates them.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Input Records                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  current_stock  │◄──│  items[]        │──►│  loyalty_points │       │
//! │  │  reorder_level  │   │  status         │   │  total_spent    │       │
//! │  │  category       │   │  total_cents    │   └─────────────────┘       │
//! │  └─────────────────┘   └────────┬────────┘                              │
//! │                                 │                                       │
//! │  ┌─────────────────┐   ┌────────▼────────┐   ┌─────────────────┐       │
//! │  │    Supplier     │◄──│ PurchaseOrder   │   │   SaleReturn    │       │
//! │  │  status         │   │  expected vs    │   │  status         │       │
//! │  └─────────────────┘   │  delivered date │   │  total_cents    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐                                                    │
//! │  │    Expense      │   Status enums are read by reports, never         │
//! │  │  description    │   transitioned: that belongs to the CRUD layer.   │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard VAT rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product carried in inventory.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    #[serde(default)]
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Category label used by category performance.
    #[serde(default)]
    pub category: Option<String>,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Unit cost in cents (what a reorder costs).
    #[serde(default)]
    pub cost_cents: Option<i64>,

    /// Current stock level. May be negative when overselling is allowed.
    pub current_stock: i64,

    /// Per-product low-stock cutoff. Falls back to the configured
    /// threshold when absent.
    #[serde(default)]
    pub reorder_level: Option<i64>,

    /// Whether product is active (soft delete).
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Last stock movement; the age of the stock on hand.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the unit cost, or zero when unknown.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents.unwrap_or(0))
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale is in progress (items being added).
    #[default]
    Draft,
    /// Sale has been paid and finalized.
    Completed,
    /// Sale was cancelled.
    Voided,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Mobile wallet transfer.
    MobileMoney,
    /// Direct bank transfer.
    BankTransfer,
    /// Sold on account; settled later as customer debt.
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Credit => "credit",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction with its line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub receipt_number: String,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub total_cents: i64,
    #[serde(default)]
    pub items: Vec<SaleItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Only completed sales count towards revenue and demand.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    #[serde(default)]
    pub name_snapshot: String,
    /// Product category at time of sale (frozen).
    #[serde(default)]
    pub category_snapshot: Option<String>,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Line total (unit_price × quantity, after line discounts).
    pub line_total_cents: i64,
}

impl SaleItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Cumulative loyalty points.
    #[serde(default)]
    pub loyalty_points: i64,
    /// Stored cumulative spend. When absent, spend is derived from sales.
    #[serde(default)]
    pub total_spent_cents: Option<i64>,
}

// =============================================================================
// Expense
// =============================================================================

/// An operating expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Category typed in by the user, if any.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    pub amount_cents: i64,
}

impl Expense {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

/// A supplier the store buys stock from.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: SupplierStatus,
}

// =============================================================================
// Purchase Order
// =============================================================================

/// The status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    /// Draft and cancelled orders were never committed to the supplier.
    pub fn is_committed(&self) -> bool {
        matches!(self, PurchaseOrderStatus::Ordered | PurchaseOrderStatus::Received)
    }
}

/// An order placed with a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseOrder {
    pub id: String,
    pub supplier_id: String,
    pub status: PurchaseOrderStatus,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub delivered_on: Option<NaiveDate>,
}

impl PurchaseOrder {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// `Some(true)` when delivered on or before the expected date,
    /// `None` when either date is unknown.
    pub fn delivered_on_time(&self) -> Option<bool> {
        match (self.expected_delivery, self.delivered_on) {
            (Some(expected), Some(actual)) => Some(actual <= expected),
            _ => None,
        }
    }
}

// =============================================================================
// Sale Return
// =============================================================================

/// The status of a customer return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Refunded,
}

impl ReturnStatus {
    /// Approved and refunded returns reduce revenue.
    pub fn reduces_revenue(&self) -> bool {
        matches!(self, ReturnStatus::Approved | ReturnStatus::Refunded)
    }
}

/// Goods returned against an earlier sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleReturn {
    pub id: String,
    pub sale_id: String,
    pub status: ReturnStatus,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleReturn {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(SaleStatus::default(), SaleStatus::Draft);
        assert_eq!(PurchaseOrderStatus::default(), PurchaseOrderStatus::Draft);
        assert_eq!(ReturnStatus::default(), ReturnStatus::Pending);
    }

    #[test]
    fn test_purchase_order_on_time() {
        let date = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let mut order = PurchaseOrder {
            id: "po-1".into(),
            supplier_id: "sup-1".into(),
            status: PurchaseOrderStatus::Received,
            total_cents: 10000,
            order_date: date(1),
            expected_delivery: Some(date(10)),
            delivered_on: Some(date(10)),
        };
        assert_eq!(order.delivered_on_time(), Some(true));

        order.delivered_on = Some(date(11));
        assert_eq!(order.delivered_on_time(), Some(false));

        order.expected_delivery = None;
        assert_eq!(order.delivered_on_time(), None);
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{
            "id": "p1",
            "name": "Sugar 1kg",
            "price_cents": 350,
            "current_stock": 12,
            "updated_at": "2024-03-01T08:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_active);
        assert_eq!(product.reorder_level, None);
        assert_eq!(product.cost(), Money::zero());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&PaymentMethod::MobileMoney).unwrap();
        assert_eq!(json, "\"mobile_money\"");
        let status: ReturnStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert!(status.reduces_revenue());
    }
}
