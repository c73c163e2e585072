//! # Data Sources
//!
//! The engine never reaches for records itself. Callers hand it a
//! [`DataSource`], typically backed by whatever the back office already
//! loaded from its data service.
//!
//! ```text
//! ┌────────────────────┐        ┌──────────────────────┐
//! │  REST client,      │        │                      │
//! │  database, or      │──impl─►│  DataSource          │──► InsightService::dashboard
//! │  JsonSnapshot      │        │  (one fn/collection) │
//! └────────────────────┘        └──────────────────────┘
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_core::money::Money;
use tally_core::types::{Customer, Expense, Product, PurchaseOrder, Sale, SaleReturn, Supplier};
use tracing::info;

use crate::error::{InsightError, InsightResult};

/// Repository abstraction over the back-office collections.
pub trait DataSource: Send + Sync {
    fn products(&self) -> InsightResult<Vec<Product>>;

    fn sales(&self) -> InsightResult<Vec<Sale>>;

    fn customers(&self) -> InsightResult<Vec<Customer>>;

    fn expenses(&self) -> InsightResult<Vec<Expense>>;

    fn suppliers(&self) -> InsightResult<Vec<Supplier>>;

    fn purchase_orders(&self) -> InsightResult<Vec<PurchaseOrder>>;

    fn returns(&self) -> InsightResult<Vec<SaleReturn>>;

    /// Income outside of sales (interest, rebates). Zero unless the source
    /// tracks it.
    fn other_income(&self) -> InsightResult<Money> {
        Ok(Money::zero())
    }
}

/// Every collection in one JSON document. Missing collections are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonSnapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub returns: Vec<SaleReturn>,
    #[serde(default)]
    pub other_income_cents: i64,
}

impl JsonSnapshot {
    pub fn from_json_str(json: &str) -> InsightResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a snapshot file.
    pub fn from_path(path: &Path) -> InsightResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InsightError::Source(format!("cannot read {}: {}", path.display(), e))
        })?;
        let snapshot = Self::from_json_str(&contents)?;

        info!(
            path = %path.display(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            customers = snapshot.customers.len(),
            expenses = snapshot.expenses.len(),
            "Loaded data snapshot"
        );
        Ok(snapshot)
    }
}

impl DataSource for JsonSnapshot {
    fn products(&self) -> InsightResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn sales(&self) -> InsightResult<Vec<Sale>> {
        Ok(self.sales.clone())
    }

    fn customers(&self) -> InsightResult<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    fn expenses(&self) -> InsightResult<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn suppliers(&self) -> InsightResult<Vec<Supplier>> {
        Ok(self.suppliers.clone())
    }

    fn purchase_orders(&self) -> InsightResult<Vec<PurchaseOrder>> {
        Ok(self.purchase_orders.clone())
    }

    fn returns(&self) -> InsightResult<Vec<SaleReturn>> {
        Ok(self.returns.clone())
    }

    fn other_income(&self) -> InsightResult<Money> {
        Ok(Money::from_cents(self.other_income_cents))
    }
}
