//! # tally-core: Domain Types for the Tally Analytics Engine
//!
//! This crate holds the records the back office loads from its data service
//! (products, sales, customers, expenses, suppliers, purchase orders,
//! returns) and the integer money arithmetic every derived metric is built
//! on. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Back-office pages / tally-cli (presentation)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots in, view models out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tally-insights (InsightService)                  │   │
//! │  │        metrics ──► reports ──► facade                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │  record   │  │   │
//! │  │   │   Sale    │  │ VatSplit  │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input records (Product, Sale, Expense, PurchaseOrder, etc.)
//! - [`money`] - Money type with integer arithmetic and VAT split
//! - [`error`] - Domain error types
//! - [`validation`] - Record and rate validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::types::TaxRate;
//!
//! // 118.00 VAT-inclusive at 18%
//! let split = Money::from_cents(11800).split_vat(TaxRate::from_bps(1800));
//!
//! assert_eq!(split.vat.cents(), 1800);
//! assert_eq!(split.exclusive.cents(), 10000);
//! assert_eq!(split.vat + split.exclusive, split.inclusive);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, VatSplit};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Basis points in 100%.
pub const BPS_SCALE: u32 = 10_000;

/// Maximum length accepted for record identifiers.
pub const MAX_ID_LENGTH: usize = 64;

/// Largest magnitude accepted for any recorded amount, in cents.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000_000;

/// Largest magnitude accepted for a stock level or sold quantity.
pub const MAX_UNITS: i64 = 1_000_000_000;
