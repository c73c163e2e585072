//! Command implementations.
//!
//! Every command produces a `serde_json::Value`; `main` prints it.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use tally_core::money::Money;
use tally_insights::{
    DataSource, IncomeInputs, InsightConfig, InsightService, JsonSnapshot, ReportPeriod,
};

use crate::cli::{Commands, ConfigAction};

// =============================================================================
// Setup
// =============================================================================

/// Loads the layered configuration and builds the service.
pub fn load_service(config_path: Option<PathBuf>) -> Result<InsightService> {
    let config = InsightConfig::load(config_path).context("Failed to load insights config")?;
    Ok(InsightService::new(config)?)
}

pub fn load_snapshot(path: &Path) -> Result<JsonSnapshot> {
    JsonSnapshot::from_path(path)
        .with_context(|| format!("Failed to load data snapshot from {}", path.display()))
}

/// End of the given UTC day, or now.
pub fn resolve_as_of(date: Option<NaiveDate>) -> DateTime<Utc> {
    match date {
        Some(day) => day
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
        None => Utc::now(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Reports
// =============================================================================

/// Runs one report against the snapshot.
pub fn cmd_report(
    service: &InsightService,
    snapshot: &JsonSnapshot,
    command: &Commands,
    as_of: DateTime<Utc>,
) -> Result<Value> {
    debug!(?command, %as_of, "Running report");

    let value = match command {
        Commands::Dashboard => serde_json::to_value(service.dashboard(snapshot, as_of)?)?,
        Commands::LowStock => serde_json::to_value(service.low_stock_alerts(&snapshot.products()?)?)?,
        Commands::Reorder => serde_json::to_value(service.reorder_suggestions(
            &snapshot.products()?,
            &snapshot.sales()?,
            as_of,
        )?)?,
        Commands::Discounts => {
            serde_json::to_value(service.discount_suggestions(&snapshot.products()?, as_of)?)?
        }
        Commands::Daily => serde_json::to_value(service.daily_report(&snapshot.sales()?, as_of)?)?,
        Commands::Customers => serde_json::to_value(
            service.customer_segments(&snapshot.customers()?, &snapshot.sales()?)?,
        )?,
        Commands::Expenses => {
            serde_json::to_value(service.categorize_expenses(&snapshot.expenses()?)?)?
        }
        Commands::Suppliers => serde_json::to_value(
            service.supplier_performance(&snapshot.suppliers()?, &snapshot.purchase_orders()?)?,
        )?,
        Commands::Categories { days } => {
            let period = trailing_period(as_of, *days)?;
            serde_json::to_value(service.category_performance(
                &snapshot.sales()?,
                &snapshot.products()?,
                period,
            )?)?
        }
        Commands::Products { days } => {
            let period = trailing_period(as_of, *days)?;
            serde_json::to_value(service.product_performance(&snapshot.sales()?, period)?)?
        }
        Commands::Income {
            from,
            to,
            other_income_cents,
        } => {
            let period = match (from, to) {
                (Some(first), Some(last)) => Some(calendar_period(*first, *last)?),
                _ => None,
            };
            let other_income = match other_income_cents {
                Some(cents) => Money::from_cents(*cents),
                None => snapshot.other_income()?,
            };

            let sales = snapshot.sales()?;
            let returns = snapshot.returns()?;
            let orders = snapshot.purchase_orders()?;
            let expenses = snapshot.expenses()?;

            serde_json::to_value(service.income_statement(&IncomeInputs {
                sales: &sales,
                returns: &returns,
                purchase_orders: &orders,
                expenses: &expenses,
                other_income,
                period,
            })?)?
        }
        Commands::Config { .. } => bail!("config is not a report"),
    };

    Ok(value)
}

fn trailing_period(as_of: DateTime<Utc>, days: u32) -> Result<ReportPeriod> {
    if days == 0 {
        bail!("--days must be greater than 0");
    }
    Ok(ReportPeriod::trailing_days(as_of, days))
}

fn calendar_period(first: NaiveDate, last: NaiveDate) -> Result<ReportPeriod> {
    if last < first {
        bail!("--to ({last}) is before --from ({first})");
    }
    Ok(ReportPeriod::from_dates(first, last))
}

// =============================================================================
// Config
// =============================================================================

pub fn cmd_config(config_path: Option<PathBuf>, action: &ConfigAction) -> Result<Value> {
    match action {
        ConfigAction::Show => {
            let config = InsightConfig::load(config_path).context("Failed to load insights config")?;
            Ok(serde_json::to_value(config)?)
        }
        ConfigAction::Path => {
            let path = config_path.or_else(InsightConfig::default_config_path);
            Ok(json!({ "path": path }))
        }
        ConfigAction::Init { force } => {
            let path = config_path
                .or_else(InsightConfig::default_config_path)
                .context("No config directory available on this platform")?;

            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            let written = InsightConfig::default().save(Some(path))?;
            info!(path = %written.display(), "Wrote default config");
            Ok(json!({ "path": written }))
        }
    }
}
