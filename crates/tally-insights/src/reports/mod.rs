//! # Aggregate Reports
//!
//! Each report folds a whole collection into one view model using the
//! primitives in [`crate::metrics`]. Reports assume their input has already
//! been validated by [`crate::service::InsightService`].

pub mod daily;
pub mod expenses;
pub mod income;
pub mod performance;
pub mod segments;
pub mod supplier;

pub use daily::daily_report;
pub use expenses::expense_report;
pub use income::{income_statement, IncomeInputs};
pub use performance::{category_performance, product_performance};
pub use segments::customer_segments;
pub use supplier::supplier_performance;
