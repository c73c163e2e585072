//! # tally-insights: Business Analytics Engine
//!
//! Derives the numbers a shop owner looks at from raw back-office records:
//! what to restock, what to mark down, how today went, who the best
//! customers are, where the money went, and what the business earned.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         tally-insights                                  │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ service   InsightService: validate input, run a report            │ │
//! │  └──────────────────────────────┬────────────────────────────────────┘ │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼────────────────────────────────────┐ │
//! │  │ reports   daily · supplier · performance · segments · expenses ·  │ │
//! │  │           income statement                                         │ │
//! │  └──────────────────────────────┬────────────────────────────────────┘ │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼────────────────────────────────────┐ │
//! │  │ metrics   stock · reorder · discount · expense category ·         │ │
//! │  │           segment · tax                                            │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  config (TOML + env)          source (DataSource, JsonSnapshot)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and side-effect free. The clock is never read:
//! time-sensitive reports take an explicit `as_of`.
//!
//! ## Example
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tally_insights::{InsightService, JsonSnapshot};
//!
//! let snapshot = JsonSnapshot::from_json_str(r#"{
//!     "products": [
//!         {"id": "P1", "name": "Soap", "price_cents": 250, "current_stock": 3,
//!          "updated_at": "2024-03-01T00:00:00Z"}
//!     ]
//! }"#).unwrap();
//!
//! let service = InsightService::default();
//! let as_of = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
//! let dashboard = service.dashboard(&snapshot, as_of).unwrap();
//!
//! assert_eq!(dashboard.low_stock.len(), 1);
//! assert_eq!(dashboard.daily.total_transactions, 0);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod reports;
pub mod service;
pub mod source;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use config::InsightConfig;
pub use error::{InsightError, InsightResult};
pub use reports::IncomeInputs;
pub use service::InsightService;
pub use source::{DataSource, JsonSnapshot};
pub use types::*;
