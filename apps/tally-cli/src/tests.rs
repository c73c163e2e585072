//! CLI command tests

use chrono::{NaiveDate, TimeZone, Utc};
use clap::Parser;
use tally_insights::{InsightService, JsonSnapshot};

use crate::cli::{Cli, Commands, ConfigAction};
use crate::commands;

const SNAPSHOT: &str = r#"{
    "products": [
        {"id": "P1", "name": "Rice 5kg", "price_cents": 9000, "cost_cents": 7000,
         "current_stock": 1, "updated_at": "2024-06-29T08:00:00Z"}
    ],
    "sales": [
        {"id": "S1", "status": "completed", "payment_method": "card", "total_cents": 9000,
         "created_at": "2024-06-30T09:00:00Z",
         "items": [{"product_id": "P1", "unit_price_cents": 9000, "quantity": 1,
                    "line_total_cents": 9000}]}
    ],
    "expenses": [
        {"id": "E1", "date": "2024-06-02", "description": "Electricity", "amount_cents": 1500}
    ],
    "other_income_cents": 500
}"#;

fn snapshot() -> JsonSnapshot {
    JsonSnapshot::from_json_str(SNAPSHOT).unwrap()
}

fn as_of() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
}

// ========== Argument Parsing ==========

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "tally", "daily", "--data", "shop.json", "--as-of", "2024-06-30", "-v",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Daily));
    assert_eq!(cli.data.to_str(), Some("shop.json"));
    assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 6, 30));
    assert!(cli.verbose);
}

#[test]
fn test_income_period_needs_both_ends() {
    assert!(Cli::try_parse_from(["tally", "income", "--from", "2024-06-01"]).is_err());
    assert!(Cli::try_parse_from([
        "tally", "income", "--from", "2024-06-01", "--to", "2024-06-30"
    ])
    .is_ok());
}

#[test]
fn test_bad_date_rejected() {
    assert!(Cli::try_parse_from(["tally", "daily", "--as-of", "30/06/2024"]).is_err());
}

#[test]
fn test_resolve_as_of_is_end_of_day() {
    let resolved = commands::resolve_as_of(NaiveDate::from_ymd_opt(2024, 6, 30));
    assert_eq!(resolved, as_of());
}

#[test]
fn test_resolve_as_of_on_last_calendar_day() {
    let resolved = commands::resolve_as_of(Some(NaiveDate::MAX));
    assert_eq!(resolved, chrono::DateTime::<Utc>::MAX_UTC);
}

#[test]
fn test_huge_day_count_is_clamped() {
    let command = Commands::Products { days: u32::MAX };
    let value = commands::cmd_report(&InsightService::default(), &snapshot(), &command, as_of()).unwrap();
    assert_eq!(value["lines"][0]["key"], "P1");
}

// ========== Reports ==========

#[test]
fn test_daily_report_command() {
    let value = commands::cmd_report(&InsightService::default(), &snapshot(), &Commands::Daily, as_of()).unwrap();

    assert_eq!(value["total_transactions"], 1);
    assert_eq!(value["payment_breakdown"][0]["method"], "card");
}

#[test]
fn test_low_stock_command() {
    let value =
        commands::cmd_report(&InsightService::default(), &snapshot(), &Commands::LowStock, as_of()).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["product_id"], "P1");
}

#[test]
fn test_income_command_uses_snapshot_other_income() {
    let command = Commands::Income {
        from: None,
        to: None,
        other_income_cents: None,
    };
    let value = commands::cmd_report(&InsightService::default(), &snapshot(), &command, as_of()).unwrap();

    // 9000 − 1500 + 500
    assert_eq!(value["taxable_income"]["inclusive"], 8000);
}

#[test]
fn test_income_command_rejects_reversed_period() {
    let command = Commands::Income {
        from: NaiveDate::from_ymd_opt(2024, 6, 30),
        to: NaiveDate::from_ymd_opt(2024, 6, 1),
        other_income_cents: None,
    };
    assert!(commands::cmd_report(&InsightService::default(), &snapshot(), &command, as_of()).is_err());
}

#[test]
fn test_zero_day_period_rejected() {
    let command = Commands::Categories { days: 0 };
    assert!(commands::cmd_report(&InsightService::default(), &snapshot(), &command, as_of()).is_err());
}

#[test]
fn test_dashboard_command() {
    let value =
        commands::cmd_report(&InsightService::default(), &snapshot(), &Commands::Dashboard, as_of()).unwrap();

    assert_eq!(value["expenses"]["totals"][0]["category"], "Utilities");
    assert_eq!(value["reorder"][0]["product_id"], "P1");
}

// ========== Config ==========

#[test]
fn test_config_init_then_show() {
    let path = std::env::temp_dir()
        .join(format!("tally-cli-test-{}", std::process::id()))
        .join("insights.toml");
    let _ = std::fs::remove_file(&path);

    let written = commands::cmd_config(Some(path.clone()), &ConfigAction::Init { force: false }).unwrap();
    assert_eq!(written["path"], path.to_str().unwrap());

    // second init without --force refuses to clobber
    assert!(commands::cmd_config(Some(path.clone()), &ConfigAction::Init { force: false }).is_err());
    assert!(commands::cmd_config(Some(path.clone()), &ConfigAction::Init { force: true }).is_ok());

    let shown = commands::cmd_config(Some(path.clone()), &ConfigAction::Show).unwrap();
    assert!(shown["low_stock_threshold"].is_i64());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_missing_snapshot_file() {
    let err = commands::load_snapshot(std::path::Path::new("/nonexistent/snapshot.json")).unwrap_err();
    assert!(err.to_string().contains("snapshot"));
}
