//! Progressive income tax.
//!
//! Each bracket taxes only the slice of income between the previous
//! bracket's ceiling and its own:
//!
//! ```text
//! income 200,000.00 with the default brackets
//!
//!   0 … 100,000.00          @  5%  =  5,000.00
//!   100,000.00 … 200,000.00 @ 15%  = 15,000.00
//!                                   ─────────
//!                                   20,000.00
//! ```
//!
//! Brackets must have strictly increasing ceilings; only the last may be
//! unbounded. [`crate::config::InsightConfig::validate`] enforces that.

use tally_core::money::Money;

use crate::config::TaxBracket;
use crate::types::BracketTax;

/// Per-bracket tax on `taxable_income`. Empty for zero or negative income.
pub fn progressive_tax_breakdown(taxable_income: Money, brackets: &[TaxBracket]) -> Vec<BracketTax> {
    let mut lines = Vec::new();
    let mut lower = Money::zero();

    for bracket in brackets {
        if taxable_income <= lower {
            break;
        }

        let upper = bracket.up_to_cents.map(Money::from_cents);
        let ceiling = match upper {
            Some(upper) if upper < taxable_income => upper,
            _ => taxable_income,
        };
        let taxable = ceiling - lower;

        lines.push(BracketTax {
            from: lower,
            up_to: upper,
            rate_bps: bracket.rate.bps(),
            taxable,
            tax: taxable.calculate_tax(bracket.rate),
        });

        match upper {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    lines
}

/// Total progressive tax on `taxable_income`. Zero for zero or negative
/// income.
pub fn progressive_tax(taxable_income: Money, brackets: &[TaxBracket]) -> Money {
    progressive_tax_breakdown(taxable_income, brackets)
        .iter()
        .map(|line| line.tax)
        .sum()
}
