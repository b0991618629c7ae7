//! Meal entitlement rules.
//!
//! [`assess_claim`] decides whether a student may take a meal and what it
//! costs. It is evaluated inside the claim transaction after the user row is
//! locked, so the inputs reflect the state the debit will be applied to.

use serde::Serialize;

use crate::error::CoreError;
use crate::meals::{MealType, SubscriptionPlan};
use crate::types::{Day, Money};

/// Everything the claim rules look at, loaded by the caller.
#[derive(Debug, Clone)]
pub struct ClaimInput<'a> {
    pub meal: MealType,
    pub date: Day,
    /// An attendance row already exists for (user, date, meal).
    pub already_claimed: bool,
    /// Prices of the dishes resolved for the meal slot, or `None` when no
    /// menu is published for `date`.
    pub dish_prices: Option<&'a [Money]>,
    /// Plan of the user's active subscription on `date`, if any.
    pub subscription: Option<SubscriptionPlan>,
    pub balance: Money,
}

/// Outcome of a successful assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimDecision {
    /// Sum of the slot's dish prices.
    pub total_price: Money,
    /// Amount to debit from the balance (zero when covered).
    pub charge: Money,
    pub covered_by_subscription: bool,
}

/// Apply the entitlement rules in order: duplicate claim, published menu,
/// subscription coverage, balance.
pub fn assess_claim(input: &ClaimInput<'_>) -> Result<ClaimDecision, CoreError> {
    if input.already_claimed {
        return Err(CoreError::AlreadyClaimed {
            meal: input.meal,
            date: input.date,
        });
    }

    let prices = input
        .dish_prices
        .ok_or(CoreError::NoMenuPublished { date: input.date })?;
    let total_price: Money = prices.iter().sum();

    let covered = input
        .subscription
        .is_some_and(|plan| plan.covers(input.meal));
    if covered {
        return Ok(ClaimDecision {
            total_price,
            charge: 0,
            covered_by_subscription: true,
        });
    }

    if input.balance < total_price {
        return Err(CoreError::InsufficientBalance {
            required: total_price,
            available: input.balance,
        });
    }

    Ok(ClaimDecision {
        total_price,
        charge: total_price,
        covered_by_subscription: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn day() -> Day {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn input(prices: Option<&[Money]>, balance: Money) -> ClaimInput<'_> {
        ClaimInput {
            meal: MealType::Breakfast,
            date: day(),
            already_claimed: false,
            dish_prices: prices,
            subscription: None,
            balance,
        }
    }

    #[test]
    fn test_pays_from_balance() {
        let decision = assess_claim(&input(Some(&[30, 20]), 60)).unwrap();
        assert_eq!(decision.total_price, 50);
        assert_eq!(decision.charge, 50);
        assert!(!decision.covered_by_subscription);
    }

    #[test]
    fn test_insufficient_balance() {
        let err = assess_claim(&input(Some(&[30, 20]), 40)).unwrap_err();
        assert_matches!(
            err,
            CoreError::InsufficientBalance {
                required: 50,
                available: 40
            }
        );
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let decision = assess_claim(&input(Some(&[30, 20]), 50)).unwrap();
        assert_eq!(decision.charge, 50);
    }

    #[test]
    fn test_already_claimed_wins_over_everything() {
        let mut i = input(None, 0);
        i.already_claimed = true;
        assert_matches!(assess_claim(&i), Err(CoreError::AlreadyClaimed { .. }));
    }

    #[test]
    fn test_no_menu() {
        assert_matches!(
            assess_claim(&input(None, 1000)),
            Err(CoreError::NoMenuPublished { .. })
        );
    }

    #[test]
    fn test_covering_subscription_is_free() {
        let mut i = input(Some(&[30, 20]), 0);
        i.subscription = Some(SubscriptionPlan::Both);
        let decision = assess_claim(&i).unwrap();
        assert_eq!(decision.charge, 0);
        assert_eq!(decision.total_price, 50);
        assert!(decision.covered_by_subscription);
    }

    #[test]
    fn test_non_covering_subscription_still_charges() {
        let mut i = input(Some(&[30, 20]), 10);
        i.subscription = Some(SubscriptionPlan::Lunch);
        assert_matches!(
            assess_claim(&i),
            Err(CoreError::InsufficientBalance { .. })
        );
    }

    #[test]
    fn test_empty_slot_is_free() {
        let decision = assess_claim(&input(Some(&[]), 0)).unwrap();
        assert_eq!(decision.charge, 0);
        assert!(!decision.covered_by_subscription);
    }
}
