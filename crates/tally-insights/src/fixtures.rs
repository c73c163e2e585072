//! Record builders shared by unit tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use tally_core::types::{
    Customer, Expense, PaymentMethod, Product, PurchaseOrder, PurchaseOrderStatus, ReturnStatus,
    Sale, SaleItem, SaleReturn, SaleStatus, Supplier, SupplierStatus,
};

/// Fixed "now" for every test: 2024-03-15 18:00 UTC.
pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    as_of() - Duration::hours(hours)
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    as_of() - Duration::days(days)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn product(id: &str, stock: i64) -> Product {
    Product {
        id: id.to_string(),
        sku: format!("SKU-{id}"),
        name: format!("Product {id}"),
        category: None,
        price_cents: 1000,
        cost_cents: Some(600),
        current_stock: stock,
        reorder_level: None,
        is_active: true,
        updated_at: days_ago(1),
    }
}

pub fn item(product_id: &str, quantity: i64, line_total_cents: i64) -> SaleItem {
    SaleItem {
        product_id: product_id.to_string(),
        name_snapshot: format!("Product {product_id}"),
        category_snapshot: None,
        unit_price_cents: line_total_cents / quantity.max(1),
        quantity,
        line_total_cents,
    }
}

pub fn sale(id: &str, at: DateTime<Utc>, total_cents: i64, items: Vec<SaleItem>) -> Sale {
    Sale {
        id: id.to_string(),
        receipt_number: format!("R-{id}"),
        status: SaleStatus::Completed,
        payment_method: PaymentMethod::Cash,
        customer_id: None,
        total_cents,
        items,
        created_at: at,
    }
}

pub fn customer(id: &str, spent_cents: Option<i64>) -> Customer {
    Customer {
        id: id.to_string(),
        name: format!("Customer {id}"),
        phone: None,
        email: None,
        loyalty_points: 0,
        total_spent_cents: spent_cents,
    }
}

pub fn expense(id: &str, description: &str, amount_cents: i64) -> Expense {
    Expense {
        id: id.to_string(),
        date: date(2024, 3, 10),
        category: None,
        description: description.to_string(),
        amount_cents,
    }
}

pub fn supplier(id: &str) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: format!("Supplier {id}"),
        contact_person: None,
        phone: None,
        email: None,
        status: SupplierStatus::Active,
    }
}

pub fn order(id: &str, supplier_id: &str, total_cents: i64) -> PurchaseOrder {
    PurchaseOrder {
        id: id.to_string(),
        supplier_id: supplier_id.to_string(),
        status: PurchaseOrderStatus::Received,
        total_cents,
        order_date: date(2024, 3, 1),
        expected_delivery: None,
        delivered_on: None,
    }
}

pub fn sale_return(id: &str, total_cents: i64, status: ReturnStatus) -> SaleReturn {
    SaleReturn {
        id: id.to_string(),
        sale_id: "S-1".to_string(),
        status,
        total_cents,
        created_at: days_ago(2),
    }
}
