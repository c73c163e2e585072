//! Expense categorization report.

use std::collections::HashMap;

use tally_core::money::Money;
use tally_core::types::Expense;
use tracing::debug;

use crate::config::CategoryRule;
use crate::metrics::expense_category::categorize;
use crate::types::{CategorizedExpense, ExpenseCategoryTotal, ExpenseReport};

/// Labels every expense and totals each label, largest first.
pub fn expense_report(expenses: &[Expense], rules: &[CategoryRule]) -> ExpenseReport {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<ExpenseCategoryTotal> = Vec::new();

    let categorized: Vec<CategorizedExpense> = expenses
        .iter()
        .map(|e| {
            let (category, source) = categorize(e, rules);

            let slot = match slots.get(&category) {
                Some(&slot) => slot,
                None => {
                    totals.push(ExpenseCategoryTotal {
                        category: category.clone(),
                        amount: Money::zero(),
                        count: 0,
                    });
                    slots.insert(category.clone(), totals.len() - 1);
                    totals.len() - 1
                }
            };
            totals[slot].amount += e.amount();
            totals[slot].count += 1;

            CategorizedExpense {
                expense_id: e.id.clone(),
                date: e.date,
                description: e.description.clone(),
                amount: e.amount(),
                category,
                source,
            }
        })
        .collect();

    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    let total: Money = categorized.iter().map(|e| e.amount).sum();

    debug!(
        expenses = categorized.len(),
        categories = totals.len(),
        total_cents = total.cents(),
        "Expense report computed"
    );

    ExpenseReport {
        expenses: categorized,
        totals,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;
    use crate::fixtures::expense;
    use crate::types::CategorySource;

    #[test]
    fn test_totals_sorted_by_amount() {
        let expenses = vec![
            expense("1", "Electricity for March", 8_000),
            expense("2", "Shop rent", 50_000),
            expense("3", "Water bill", 2_000),
            expense("4", "Something odd", 500),
        ];

        let report = expense_report(&expenses, &InsightConfig::default().category_keywords);

        assert_eq!(report.total.cents(), 60_500);
        let labels: Vec<(&str, i64, usize)> = report
            .totals
            .iter()
            .map(|t| (t.category.as_str(), t.amount.cents(), t.count))
            .collect();
        assert_eq!(
            labels,
            vec![("Rent", 50_000, 1), ("Utilities", 10_000, 2), ("Other", 500, 1)]
        );
        assert_eq!(report.expenses[3].source, CategorySource::Default);
    }

    #[test]
    fn test_totals_add_up() {
        let expenses = vec![
            expense("1", "fuel", 1_234),
            expense("2", "airtime", 999),
            expense("3", "bank fee", 45),
        ];
        let report = expense_report(&expenses, &InsightConfig::default().category_keywords);
        let by_category: Money = report.totals.iter().map(|t| t.amount).sum();
        assert_eq!(by_category, report.total);
    }

    #[test]
    fn test_no_expenses() {
        let report = expense_report(&[], &[]);
        assert!(report.expenses.is_empty());
        assert!(report.totals.is_empty());
        assert_eq!(report.total, Money::zero());
    }
}
