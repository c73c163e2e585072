//! Keyword-based expense categorization.

use tally_core::types::Expense;

use crate::config::CategoryRule;
use crate::types::CategorySource;

/// Label used when neither a rule nor the record supplies one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// First rule whose keyword occurs in `description`, case-insensitive.
pub fn infer_category<'a>(description: &str, rules: &'a [CategoryRule]) -> Option<&'a str> {
    let haystack = description.to_lowercase();

    rules
        .iter()
        .filter(|rule| !rule.keyword.trim().is_empty())
        .find(|rule| haystack.contains(&rule.keyword.to_lowercase()))
        .map(|rule| rule.category.as_str())
}

/// Resolves an expense's category and records where it came from.
pub fn categorize(expense: &Expense, rules: &[CategoryRule]) -> (String, CategorySource) {
    if let Some(category) = infer_category(&expense.description, rules) {
        return (category.to_string(), CategorySource::Keyword);
    }

    match expense.category.as_deref().map(str::trim) {
        Some(recorded) if !recorded.is_empty() => (recorded.to_string(), CategorySource::Recorded),
        _ => (DEFAULT_CATEGORY.to_string(), CategorySource::Default),
    }
}
