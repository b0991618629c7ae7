//! Meal slots and subscription plans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A meal slot served on a menu day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
}

impl MealType {
    pub const ALL: [MealType; 2] = [MealType::Breakfast, MealType::Lunch];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            other => Err(format!(
                "Invalid meal type '{other}'. Must be one of: breakfast, lunch"
            )),
        }
    }
}

/// Which meals a subscription pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Breakfast,
    Lunch,
    Both,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 3] = [
        SubscriptionPlan::Breakfast,
        SubscriptionPlan::Lunch,
        SubscriptionPlan::Both,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionPlan::Breakfast => "breakfast",
            SubscriptionPlan::Lunch => "lunch",
            SubscriptionPlan::Both => "both",
        }
    }

    /// `true` if a holder of this plan eats `meal` without paying.
    pub fn covers(self, meal: MealType) -> bool {
        match self {
            SubscriptionPlan::Both => true,
            SubscriptionPlan::Breakfast => meal == MealType::Breakfast,
            SubscriptionPlan::Lunch => meal == MealType::Lunch,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(SubscriptionPlan::Breakfast),
            "lunch" => Ok(SubscriptionPlan::Lunch),
            "both" => Ok(SubscriptionPlan::Both),
            other => Err(format!(
                "Invalid subscription meal type '{other}'. Must be one of: breakfast, lunch, both"
            )),
        }
    }
}
