//! # Metric Primitives
//!
//! Pure functions that derive one value from one record or one collection.
//! Reports in [`crate::reports`] combine them.
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────────────┐
//! │ stock            │ stock <= threshold                               │
//! │ reorder          │ max(0, target − stock)                           │
//! │ discount         │ overstock / age tiers, clamped 0–max             │
//! │ expense_category │ first keyword match, else recorded, else "Other" │
//! │ segment          │ spend ladder Gold > Silver > Bronze              │
//! │ tax              │ progressive marginal brackets                    │
//! └──────────────────┴──────────────────────────────────────────────────┘
//! ```

pub mod discount;
pub mod expense_category;
pub mod reorder;
pub mod segment;
pub mod stock;
pub mod tax;

pub use discount::{discount_percentage, discount_suggestions};
pub use expense_category::{categorize, infer_category, DEFAULT_CATEGORY};
pub use reorder::{average_daily_demand, reorder_quantity, reorder_suggestions};
pub use segment::tier_for_spend;
pub use stock::{effective_threshold, is_low_stock, low_stock_alerts};
pub use tax::{progressive_tax, progressive_tax_breakdown};
