//! Customer tiering by lifetime spend.

use tally_core::money::Money;

use crate::config::SegmentThresholds;
use crate::types::CustomerTier;

/// Gold above `gold_cents`, Silver above `silver_cents`, otherwise Bronze.
///
/// Monotonic: more spend never yields a lower tier.
pub fn tier_for_spend(spend: Money, thresholds: &SegmentThresholds) -> CustomerTier {
    let cents = spend.cents();
    if cents > thresholds.gold_cents {
        CustomerTier::Gold
    } else if cents > thresholds.silver_cents {
        CustomerTier::Silver
    } else {
        CustomerTier::Bronze
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_exclusive() {
        let t = SegmentThresholds::default();

        assert_eq!(tier_for_spend(Money::from_cents(t.silver_cents), &t), CustomerTier::Bronze);
        assert_eq!(tier_for_spend(Money::from_cents(t.silver_cents + 1), &t), CustomerTier::Silver);
        assert_eq!(tier_for_spend(Money::from_cents(t.gold_cents), &t), CustomerTier::Silver);
        assert_eq!(tier_for_spend(Money::from_cents(t.gold_cents + 1), &t), CustomerTier::Gold);
        assert_eq!(tier_for_spend(Money::zero(), &t), CustomerTier::Bronze);
        assert_eq!(tier_for_spend(Money::from_cents(-500), &t), CustomerTier::Bronze);
    }

    #[test]
    fn test_tier_is_monotonic_in_spend() {
        let t = SegmentThresholds::default();
        let mut previous = CustomerTier::Bronze;

        for cents in (-10_000..600_000).step_by(2_500) {
            let tier = tier_for_spend(Money::from_cents(cents), &t);
            assert!(tier >= previous, "tier dropped at {cents}");
            previous = tier;
        }
        assert_eq!(previous, CustomerTier::Gold);
    }
}
