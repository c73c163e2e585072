//! # Insight Configuration
//!
//! Thresholds, rates and keyword tables the reports are evaluated against.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_LOW_STOCK_THRESHOLD=10                                       │
//! │     TALLY_VAT_RATE_BPS=1800                                            │
//! │     TALLY_TOP_PRODUCTS=5                                               │
//! │     TALLY_DAILY_WINDOW_DAYS=1                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/insights/insights.toml (Linux)                           │
//! │     ~/Library/Application Support/com.tally.insights/insights.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! low_stock_threshold = 5
//! vat_rate = 1800
//!
//! [segment_thresholds]
//! gold_cents = 200000
//! silver_cents = 50000
//!
//! [[tax_brackets]]
//! up_to_cents = 10000000
//! rate = 500
//!
//! [[tax_brackets]]
//! rate = 3000
//!
//! [[category_keywords]]
//! keyword = "rent"
//! category = "Rent"
//!
//! [reorder]
//! lookback_days = 30
//! coverage_days = 14
//! min_stock_multiplier = 2
//!
//! [discount]
//! max_percent = 50
//! stale_after_days = 90
//!
//! [report]
//! daily_window_days = 1
//! top_products = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use tally_core::types::TaxRate;
use tally_core::validation::{
    validate_percent, validate_rate_bps, validate_strictly_increasing,
};

use crate::error::{InsightError, InsightResult};

/// Longest accepted window for any day-count setting (about a century).
pub const MAX_WINDOW_DAYS: u32 = 36_500;

// =============================================================================
// Segment Thresholds
// =============================================================================

/// Spend cutoffs for the customer tier ladder.
///
/// A customer whose spend is strictly greater than `gold_cents` is Gold,
/// strictly greater than `silver_cents` is Silver, anyone else is Bronze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentThresholds {
    #[serde(default = "default_gold_cents")]
    pub gold_cents: i64,
    #[serde(default = "default_silver_cents")]
    pub silver_cents: i64,
}

fn default_gold_cents() -> i64 {
    200_000
}

fn default_silver_cents() -> i64 {
    50_000
}

impl Default for SegmentThresholds {
    fn default() -> Self {
        SegmentThresholds {
            gold_cents: default_gold_cents(),
            silver_cents: default_silver_cents(),
        }
    }
}

// =============================================================================
// Tax Brackets
// =============================================================================

/// One band of the progressive income tax schedule.
///
/// The band covers income above the previous band's `up_to_cents` and up to
/// its own. `None` marks the final, unbounded band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to_cents: Option<i64>,
    pub rate: TaxRate,
}

impl TaxBracket {
    pub const fn bounded(up_to_cents: i64, rate_bps: u32) -> Self {
        TaxBracket {
            up_to_cents: Some(up_to_cents),
            rate: TaxRate::from_bps(rate_bps),
        }
    }

    pub const fn unbounded(rate_bps: u32) -> Self {
        TaxBracket {
            up_to_cents: None,
            rate: TaxRate::from_bps(rate_bps),
        }
    }
}

/// Default schedule: a flat low rate on the first 100,000.00, then rising
/// marginal rates.
fn default_tax_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::bounded(10_000_000, 500),
        TaxBracket::bounded(50_000_000, 1500),
        TaxBracket::bounded(100_000_000, 2500),
        TaxBracket::unbounded(3000),
    ]
}

// =============================================================================
// Expense Category Keywords
// =============================================================================

/// Maps a description keyword to a category label. Rules are tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(keyword: &str, category: &str) -> Self {
        CategoryRule {
            keyword: keyword.to_string(),
            category: category.to_string(),
        }
    }
}

fn default_category_keywords() -> Vec<CategoryRule> {
    [
        ("rent", "Rent"),
        ("lease", "Rent"),
        ("electric", "Utilities"),
        ("power", "Utilities"),
        ("water", "Utilities"),
        ("utility", "Utilities"),
        ("salary", "Salaries"),
        ("salaries", "Salaries"),
        ("wage", "Salaries"),
        ("payroll", "Salaries"),
        ("fuel", "Transport"),
        ("taxi", "Transport"),
        ("transport", "Transport"),
        ("delivery", "Transport"),
        ("internet", "Communication"),
        ("airtime", "Communication"),
        ("phone", "Communication"),
        ("repair", "Maintenance"),
        ("maintenance", "Maintenance"),
        ("advert", "Marketing"),
        ("marketing", "Marketing"),
        ("promotion", "Marketing"),
        ("license", "Taxes & Licenses"),
        ("permit", "Taxes & Licenses"),
        ("tax", "Taxes & Licenses"),
        ("stationery", "Supplies"),
        ("cleaning", "Supplies"),
        ("packaging", "Supplies"),
        ("bank", "Bank Charges"),
        ("insurance", "Insurance"),
    ]
    .iter()
    .map(|(keyword, category)| CategoryRule::new(keyword, category))
    .collect()
}

// =============================================================================
// Reorder Settings
// =============================================================================

/// Inputs to the reorder-quantity heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderSettings {
    /// Days of sales history used to measure demand.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Days of demand a reorder should cover.
    #[serde(default = "default_coverage_days")]
    pub coverage_days: u32,

    /// Minimum target stock as a multiple of the low-stock threshold.
    #[serde(default = "default_min_stock_multiplier")]
    pub min_stock_multiplier: i64,
}

fn default_lookback_days() -> u32 {
    30
}

fn default_coverage_days() -> u32 {
    14
}

fn default_min_stock_multiplier() -> i64 {
    2
}

impl Default for ReorderSettings {
    fn default() -> Self {
        ReorderSettings {
            lookback_days: default_lookback_days(),
            coverage_days: default_coverage_days(),
            min_stock_multiplier: default_min_stock_multiplier(),
        }
    }
}

// =============================================================================
// Discount Settings
// =============================================================================

/// Bounds on the discount-percentage heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSettings {
    /// Upper bound on any suggested discount.
    #[serde(default = "default_max_percent")]
    pub max_percent: u8,

    /// Stock untouched for this many days earns an extra markdown.
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,
}

fn default_max_percent() -> u8 {
    50
}

fn default_stale_after_days() -> u32 {
    90
}

impl Default for DiscountSettings {
    fn default() -> Self {
        DiscountSettings {
            max_percent: default_max_percent(),
            stale_after_days: default_stale_after_days(),
        }
    }
}

// =============================================================================
// Report Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Length of the daily report window.
    #[serde(default = "default_daily_window_days")]
    pub daily_window_days: u32,

    /// Number of ranked products in the daily report.
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_daily_window_days() -> u32 {
    1
}

fn default_top_products() -> usize {
    5
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            daily_window_days: default_daily_window_days(),
            top_products: default_top_products(),
        }
    }
}

// =============================================================================
// Main Insight Configuration
// =============================================================================

/// Complete analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Low-stock cutoff for products without their own reorder level.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    /// VAT rate embedded in recorded amounts.
    #[serde(default = "default_vat_rate")]
    pub vat_rate: TaxRate,

    #[serde(default)]
    pub segment_thresholds: SegmentThresholds,

    #[serde(default = "default_tax_brackets")]
    pub tax_brackets: Vec<TaxBracket>,

    #[serde(default = "default_category_keywords")]
    pub category_keywords: Vec<CategoryRule>,

    #[serde(default)]
    pub reorder: ReorderSettings,

    #[serde(default)]
    pub discount: DiscountSettings,

    #[serde(default)]
    pub report: ReportSettings,
}

fn default_low_stock_threshold() -> i64 {
    5
}

fn default_vat_rate() -> TaxRate {
    TaxRate::from_bps(1800)
}

impl Default for InsightConfig {
    fn default() -> Self {
        InsightConfig {
            low_stock_threshold: default_low_stock_threshold(),
            vat_rate: default_vat_rate(),
            segment_thresholds: SegmentThresholds::default(),
            tax_brackets: default_tax_brackets(),
            category_keywords: default_category_keywords(),
            reorder: ReorderSettings::default(),
            discount: DiscountSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

impl InsightConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (insights.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> InsightResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading insights config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load insights config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> InsightResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> InsightResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| InsightError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Insights config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> InsightResult<()> {
        if self.low_stock_threshold < 0 {
            return Err(InsightError::InvalidConfig(
                "low_stock_threshold must not be negative".into(),
            ));
        }

        validate_rate_bps("vat_rate", self.vat_rate.bps())?;

        let segments = &self.segment_thresholds;
        if segments.silver_cents < 0 || segments.gold_cents <= segments.silver_cents {
            return Err(InsightError::InvalidConfig(format!(
                "segment thresholds must satisfy 0 <= silver < gold, got silver={} gold={}",
                segments.silver_cents, segments.gold_cents
            )));
        }

        self.validate_tax_brackets()?;

        if let Some(rule) = self
            .category_keywords
            .iter()
            .find(|r| r.keyword.trim().is_empty() || r.category.trim().is_empty())
        {
            return Err(InsightError::InvalidConfig(format!(
                "category keyword rules need a keyword and a category, got {:?}",
                rule
            )));
        }

        if self.reorder.lookback_days == 0 || self.reorder.coverage_days == 0 {
            return Err(InsightError::InvalidConfig(
                "reorder lookback_days and coverage_days must be greater than 0".into(),
            ));
        }

        if self.reorder.min_stock_multiplier < 0 {
            return Err(InsightError::InvalidConfig(
                "reorder min_stock_multiplier must not be negative".into(),
            ));
        }

        validate_percent("discount.max_percent", self.discount.max_percent)?;

        if self.report.daily_window_days == 0 || self.report.top_products == 0 {
            return Err(InsightError::InvalidConfig(
                "report daily_window_days and top_products must be greater than 0".into(),
            ));
        }

        for (name, days) in [
            ("reorder.lookback_days", self.reorder.lookback_days),
            ("reorder.coverage_days", self.reorder.coverage_days),
            ("discount.stale_after_days", self.discount.stale_after_days),
            ("report.daily_window_days", self.report.daily_window_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(InsightError::InvalidConfig(format!(
                    "{name} must be at most {MAX_WINDOW_DAYS}, got {days}"
                )));
            }
        }

        Ok(())
    }

    fn validate_tax_brackets(&self) -> InsightResult<()> {
        let Some((last, bounded)) = self.tax_brackets.split_last() else {
            return Err(InsightError::InvalidConfig(
                "at least one tax bracket is required".into(),
            ));
        };

        if last.up_to_cents.is_some() {
            return Err(InsightError::InvalidConfig(
                "the last tax bracket must be unbounded".into(),
            ));
        }

        let mut bounds = Vec::with_capacity(bounded.len());
        for bracket in bounded {
            match bracket.up_to_cents {
                Some(up_to) if up_to > 0 => bounds.push(up_to),
                _ => {
                    return Err(InsightError::InvalidConfig(
                        "only the last tax bracket may be unbounded and bounds must be positive"
                            .into(),
                    ))
                }
            }
        }
        validate_strictly_increasing("tax_brackets", &bounds)?;

        for bracket in &self.tax_brackets {
            validate_rate_bps("tax_brackets.rate", bracket.rate.bps())?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TALLY_LOW_STOCK_THRESHOLD") {
            match value.parse::<i64>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding low-stock threshold from environment");
                    self.low_stock_threshold = threshold;
                }
                Err(_) => warn!(value = %value, "Ignoring malformed TALLY_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(value) = lookup("TALLY_VAT_RATE_BPS") {
            match value.parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding VAT rate from environment");
                    self.vat_rate = TaxRate::from_bps(bps);
                }
                Err(_) => warn!(value = %value, "Ignoring malformed TALLY_VAT_RATE_BPS"),
            }
        }

        if let Some(value) = lookup("TALLY_TOP_PRODUCTS") {
            match value.parse::<usize>() {
                Ok(n) => self.report.top_products = n,
                Err(_) => warn!(value = %value, "Ignoring malformed TALLY_TOP_PRODUCTS"),
            }
        }

        if let Some(value) = lookup("TALLY_DAILY_WINDOW_DAYS") {
            match value.parse::<u32>() {
                Ok(days) => self.report.daily_window_days = days,
                Err(_) => warn!(value = %value, "Ignoring malformed TALLY_DAILY_WINDOW_DAYS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "insights")
            .map(|dirs| dirs.config_dir().join("insights.toml"))
    }
}
