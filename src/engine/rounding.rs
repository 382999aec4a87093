//! Contract total rounding
//!
//! Automatic policies always round down to a clean figure, never up. A manual
//! policy takes the caller's total and reports the difference as the
//! adjustment, which may go either way.

use serde::Serialize;

use crate::models::{Money, RoundingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoundingOutcome {
    /// `final_total - raw_total`
    pub adjustment: Money,
    pub final_total: Money,
}

/// Turn the raw estimate total into the final contract amount.
///
/// Under [`RoundingPolicy::Manual`] a missing manual total counts as zero.
pub fn apply_rounding(
    raw_total: Money,
    policy: RoundingPolicy,
    manual_total: Option<Money>,
) -> RoundingOutcome {
    let final_total = match policy.unit() {
        Some(unit) => raw_total.floor_to(unit),
        None => manual_total.unwrap_or_default(),
    };

    RoundingOutcome {
        adjustment: final_total - raw_total,
        final_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_thousand() {
        let outcome = apply_rounding(Money::from_major(90_960), RoundingPolicy::TenThousand, None);
        assert_eq!(outcome.final_total, Money::from_major(90_000));
        assert_eq!(outcome.adjustment, Money::from_major(-960));
    }

    #[test]
    fn test_hundred_thousand() {
        let outcome = apply_rounding(
            Money::from_minor(123_456_789),
            RoundingPolicy::HundredThousand,
            None,
        );
        assert_eq!(outcome.final_total, Money::from_major(1_200_000));
        assert_eq!(outcome.adjustment, Money::from_minor(-3_456_789));
    }

    #[test]
    fn test_automatic_never_rounds_up() {
        for policy in [RoundingPolicy::TenThousand, RoundingPolicy::HundredThousand] {
            let unit = policy.unit().unwrap();
            for raw in [0, 1, 999_999, 1_000_000, 123_456_789, -1, -10_000_001] {
                let raw = Money::from_minor(raw);
                let outcome = apply_rounding(raw, policy, None);
                assert!(outcome.final_total <= raw);
                assert!(outcome.adjustment <= Money::zero());
                assert_eq!(outcome.final_total.minor() % unit.minor(), 0);
                assert_eq!(outcome.final_total, raw + outcome.adjustment);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for policy in [RoundingPolicy::TenThousand, RoundingPolicy::HundredThousand] {
            let first = apply_rounding(Money::from_minor(987_654_321), policy, None);
            let second = apply_rounding(first.final_total, policy, None);
            assert_eq!(second.adjustment, Money::zero());
            assert_eq!(second.final_total, first.final_total);
        }
    }

    #[test]
    fn test_manual_can_go_either_way() {
        let raw = Money::from_major(90_960);

        let up = apply_rounding(raw, RoundingPolicy::Manual, Some(Money::from_major(95_000)));
        assert_eq!(up.final_total, Money::from_major(95_000));
        assert_eq!(up.adjustment, Money::from_major(4_040));

        let down = apply_rounding(raw, RoundingPolicy::Manual, Some(Money::from_major(85_000)));
        assert_eq!(down.adjustment, Money::from_major(-5_960));
    }

    #[test]
    fn test_manual_without_total_is_zero() {
        let outcome = apply_rounding(Money::from_major(500), RoundingPolicy::Manual, None);
        assert_eq!(outcome.final_total, Money::zero());
        assert_eq!(outcome.adjustment, Money::from_major(-500));
    }
}
