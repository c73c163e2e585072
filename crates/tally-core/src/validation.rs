//! # Validation Module
//!
//! Input checks run before any report touches a collection.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Counts As Malformed                           │
//! │                                                                         │
//! │  Rejected (fail fast)                 Accepted (reported as-is)         │
//! │  ──────────────────────────────       ────────────────────────────      │
//! │  • blank record id                    • empty collections               │
//! │  • sale line quantity <= 0            • negative stock (oversold)       │
//! │  • negative sale / expense /          • zero-value sales                │
//! │    order / return amount              • unknown categories              │
//! │  • rate above 100%                    • missing delivery dates          │
//! │  • amount beyond MAX_AMOUNT_CENTS                                       │
//! │  • stock or quantity beyond MAX_UNITS                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_quantity, validate_rate_bps};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_rate_bps("vat_rate", 1800).is_ok());
//! assert!(validate_rate_bps("vat_rate", 12000).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Customer, Expense, Product, PurchaseOrder, Sale, SaleReturn, Supplier};
use crate::{BPS_SCALE, MAX_AMOUNT_CENTS, MAX_ID_LENGTH, MAX_UNITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a record identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LENGTH,
        });
    }

    Ok(())
}

/// Validates a sold quantity. Must be positive and at most [`MAX_UNITS`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_UNITS {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_UNITS,
        });
    }

    Ok(())
}

/// Validates a monetary amount in cents. Zero is allowed.
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }

    Ok(())
}

/// Validates that a signed value lies within `[-limit, limit]`.
///
/// Used for stock levels (which go negative when oversold) and for prices
/// and stored spend, whose sign is not checked.
pub fn validate_magnitude(field: &str, value: i64, limit: i64) -> ValidationResult<()> {
    if value < -limit || value > limit {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -limit,
            max: limit,
        });
    }

    Ok(())
}

/// Validates a rate in basis points (0% to 100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_SCALE as i64,
        });
    }

    Ok(())
}

/// Validates a whole percentage (0 to 100).
pub fn validate_percent(field: &str, pct: u8) -> ValidationResult<()> {
    if pct > 100 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates that a sequence of boundaries is strictly increasing.
pub fn validate_strictly_increasing(field: &str, values: &[i64]) -> ValidationResult<()> {
    if values.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ValidationError::NotIncreasing {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product's id and the magnitude of its stock and prices.
pub fn validate_product(product: &Product) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("product", &product.id, e);

    validate_id(&product.id).map_err(invalid)?;
    validate_magnitude("price", product.price_cents, MAX_AMOUNT_CENTS).map_err(invalid)?;
    if let Some(cost) = product.cost_cents {
        validate_magnitude("cost", cost, MAX_AMOUNT_CENTS).map_err(invalid)?;
    }
    validate_magnitude("current_stock", product.current_stock, MAX_UNITS).map_err(invalid)?;
    if let Some(level) = product.reorder_level {
        validate_magnitude("reorder_level", level, MAX_UNITS).map_err(invalid)?;
    }

    Ok(())
}

pub fn validate_customer(customer: &Customer) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("customer", &customer.id, e);

    validate_id(&customer.id).map_err(invalid)?;
    if let Some(spent) = customer.total_spent_cents {
        validate_magnitude("total_spent", spent, MAX_AMOUNT_CENTS).map_err(invalid)?;
    }

    Ok(())
}

pub fn validate_supplier(supplier: &Supplier) -> CoreResult<()> {
    validate_id(&supplier.id).map_err(|e| CoreError::invalid_record("supplier", &supplier.id, e))
}

/// Validates a sale and each of its line items.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use tally_core::types::{PaymentMethod, Sale, SaleItem, SaleStatus};
/// use tally_core::validation::validate_sale;
///
/// let mut sale = Sale {
///     id: "S-1".into(),
///     receipt_number: "R-1".into(),
///     status: SaleStatus::Completed,
///     payment_method: PaymentMethod::Cash,
///     customer_id: None,
///     total_cents: 500,
///     items: vec![SaleItem {
///         product_id: "p1".into(),
///         name_snapshot: "Bread".into(),
///         category_snapshot: None,
///         unit_price_cents: 250,
///         quantity: 2,
///         line_total_cents: 500,
///     }],
///     created_at: Utc::now(),
/// };
/// assert!(validate_sale(&sale).is_ok());
///
/// sale.items[0].quantity = 0;
/// assert!(validate_sale(&sale).is_err());
/// ```
pub fn validate_sale(sale: &Sale) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("sale", &sale.id, e);

    validate_id(&sale.id).map_err(invalid)?;
    validate_amount_cents("total", sale.total_cents).map_err(invalid)?;

    for item in &sale.items {
        validate_id(&item.product_id).map_err(invalid)?;
        validate_quantity(item.quantity).map_err(invalid)?;
        validate_magnitude("unit_price", item.unit_price_cents, MAX_AMOUNT_CENTS).map_err(invalid)?;
        validate_amount_cents("line_total", item.line_total_cents).map_err(invalid)?;
    }

    Ok(())
}

pub fn validate_expense(expense: &Expense) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("expense", &expense.id, e);

    validate_id(&expense.id).map_err(invalid)?;
    validate_amount_cents("amount", expense.amount_cents).map_err(invalid)
}

pub fn validate_purchase_order(order: &PurchaseOrder) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("purchase order", &order.id, e);

    validate_id(&order.id).map_err(invalid)?;
    validate_id(&order.supplier_id).map_err(invalid)?;
    validate_amount_cents("total", order.total_cents).map_err(invalid)
}

pub fn validate_return(ret: &SaleReturn) -> CoreResult<()> {
    let invalid = |e| CoreError::invalid_record("return", &ret.id, e);

    validate_id(&ret.id).map_err(invalid)?;
    validate_amount_cents("total", ret.total_cents).map_err(invalid)
}

/// Validates every record in a collection, stopping at the first failure.
pub fn validate_all<T>(records: &[T], check: fn(&T) -> CoreResult<()>) -> CoreResult<()> {
    records.iter().try_for_each(check)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::types::{PaymentMethod, PurchaseOrderStatus, SaleStatus};

    #[test]
    fn test_validate_id() {
        assert!(validate_id("P-1001").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("   ").is_err());
        assert!(validate_id(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10_000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents("total", 0).is_ok());
        assert!(validate_amount_cents("total", 1099).is_ok());
        assert!(validate_amount_cents("total", MAX_AMOUNT_CENTS).is_ok());
        assert!(validate_amount_cents("total", -1).is_err());
        assert!(validate_amount_cents("total", MAX_AMOUNT_CENTS + 1).is_err());
        assert!(validate_amount_cents("total", i64::MAX).is_err());
    }

    #[test]
    fn test_validate_quantity_upper_bound() {
        assert!(validate_quantity(MAX_UNITS).is_ok());
        assert!(validate_quantity(MAX_UNITS + 1).is_err());
    }

    #[test]
    fn test_validate_magnitude() {
        assert!(validate_magnitude("current_stock", -MAX_UNITS, MAX_UNITS).is_ok());
        assert!(validate_magnitude("current_stock", MAX_UNITS, MAX_UNITS).is_ok());
        assert!(validate_magnitude("current_stock", i64::MIN, MAX_UNITS).is_err());
        assert!(validate_magnitude("current_stock", i64::MAX, MAX_UNITS).is_err());
    }

    #[test]
    fn test_validate_product_rejects_extreme_stock() {
        let mut product = Product {
            id: "P-1".into(),
            sku: String::new(),
            name: "Rice".into(),
            category: None,
            price_cents: 1000,
            cost_cents: Some(600),
            current_stock: -9_223_372_036_854_775_000,
            reorder_level: None,
            is_active: true,
            updated_at: Utc::now(),
        };
        let err = validate_product(&product).unwrap_err();
        assert!(err.to_string().contains("current_stock"));

        product.current_stock = -12;
        assert!(validate_product(&product).is_ok());

        product.cost_cents = Some(i64::MAX);
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_validate_sale_rejects_extreme_total() {
        let sale = Sale {
            id: "S-1".into(),
            receipt_number: "R-1".into(),
            status: SaleStatus::Completed,
            payment_method: PaymentMethod::Cash,
            customer_id: None,
            total_cents: 5_000_000_000_000_000_000,
            items: vec![],
            created_at: Utc::now(),
        };
        assert!(validate_sale(&sale).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("rate", 0).is_ok());
        assert!(validate_rate_bps("rate", 1800).is_ok());
        assert!(validate_rate_bps("rate", 10000).is_ok());
        assert!(validate_rate_bps("rate", 10001).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent("max_percent", 100).is_ok());
        assert!(validate_percent("max_percent", 101).is_err());
    }

    #[test]
    fn test_validate_strictly_increasing() {
        assert!(validate_strictly_increasing("b", &[]).is_ok());
        assert!(validate_strictly_increasing("b", &[1]).is_ok());
        assert!(validate_strictly_increasing("b", &[1, 2, 10]).is_ok());
        assert!(validate_strictly_increasing("b", &[1, 1]).is_err());
        assert!(validate_strictly_increasing("b", &[5, 3]).is_err());
    }

    #[test]
    fn test_validate_purchase_order_names_record() {
        let order = PurchaseOrder {
            id: "PO-9".into(),
            supplier_id: "SUP-1".into(),
            status: PurchaseOrderStatus::Ordered,
            total_cents: -100,
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expected_delivery: None,
            delivered_on: None,
        };
        let err = validate_purchase_order(&order).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid purchase order 'PO-9': total must not be negative"
        );
    }
}
