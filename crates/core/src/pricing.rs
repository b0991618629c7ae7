//! Subscription price table.

use serde::Serialize;

use crate::meals::SubscriptionPlan;
use crate::types::{Day, Money};

/// Subscription lengths on offer, in days.
pub const VALID_DURATIONS: &[i32] = &[7, 14, 30];

/// One row of the public price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEntry {
    pub duration_days: i32,
    pub meal_type: SubscriptionPlan,
    pub price: Money,
}

/// Price of a subscription, or `None` for a duration that is not sold.
pub fn subscription_price(duration_days: i32, plan: SubscriptionPlan) -> Option<Money> {
    use SubscriptionPlan::{Both, Breakfast, Lunch};

    let price = match (duration_days, plan) {
        (7, Breakfast) => 700,
        (7, Lunch) => 1000,
        (7, Both) => 1500,
        (14, Breakfast) => 1300,
        (14, Lunch) => 1900,
        (14, Both) => 2800,
        (30, Breakfast) => 2500,
        (30, Lunch) => 3800,
        (30, Both) => 5500,
        _ => return None,
    };
    Some(price)
}

/// The full price list, ordered by duration then plan.
pub fn price_table() -> Vec<PriceEntry> {
    VALID_DURATIONS
        .iter()
        .flat_map(|&duration_days| {
            SubscriptionPlan::ALL.into_iter().filter_map(move |meal_type| {
                subscription_price(duration_days, meal_type).map(|price| PriceEntry {
                    duration_days,
                    meal_type,
                    price,
                })
            })
        })
        .collect()
}

/// Last day (inclusive) a subscription bought on `start` is active.
pub fn subscription_end_date(start: Day, duration_days: i32) -> Day {
    start + chrono::Duration::days(i64::from(duration_days))
}

/// Validate that a duration is one of the sold lengths.
pub fn validate_duration(duration_days: i32) -> Result<(), String> {
    if VALID_DURATIONS.contains(&duration_days) {
        Ok(())
    } else {
        Err(format!(
            "Invalid subscription duration {duration_days}. Must be one of: 7, 14, 30"
        ))
    }
}
