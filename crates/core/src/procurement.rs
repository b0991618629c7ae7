//! Procurement application lifecycle.
//!
//! An application is created `pending` and decided exactly once, becoming
//! either `approved` (stock is credited) or `rejected`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{parse_amount, ID_SEPARATOR};
use crate::error::CoreError;
use crate::types::{DbId, Money};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status names, in lookup-table order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Decision an admin takes on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationAction {
    Approve,
    Reject,
}

impl ApplicationAction {
    /// Status name the application moves to.
    pub fn target_status(self) -> &'static str {
        match self {
            ApplicationAction::Approve => STATUS_APPROVED,
            ApplicationAction::Reject => STATUS_REJECTED,
        }
    }

    /// Parse a route segment. Unknown actions yield `None`, which callers
    /// treat as a no-op.
    pub fn from_route(action: &str) -> Option<Self> {
        action.parse().ok()
    }
}

impl FromStr for ApplicationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ApplicationAction::Approve),
            "reject" => Ok(ApplicationAction::Reject),
            other => Err(format!("Unknown application action '{other}'")),
        }
    }
}

/// Guard the one-way `pending -> {approved, rejected}` transition.
pub fn validate_transition(
    application_id: DbId,
    current_status: &str,
    action: ApplicationAction,
) -> Result<&'static str, CoreError> {
    if current_status != STATUS_PENDING {
        return Err(CoreError::Conflict(format!(
            "Application {application_id} is already {current_status}"
        )));
    }
    Ok(action.target_status())
}

/// Validate a new application before it is stored.
///
/// Blank amount positions are allowed (that product is simply not
/// credited); every other amount must be a non-negative integer that fits
/// the stock column, so an accepted application can always be approved.
pub fn validate_submission(
    product_ids: &[DbId],
    amounts: &str,
    price: Money,
) -> Result<(), String> {
    if product_ids.is_empty() {
        return Err("Application must list at least one product".to_string());
    }
    if price < 0 {
        return Err("Application price must not be negative".to_string());
    }
    if let Some(bad) = amounts
        .split(ID_SEPARATOR)
        .map(str::trim)
        .find(|token| !token.is_empty() && parse_amount(token).is_none())
    {
        return Err(format!(
            "Amount '{bad}' must be a whole number between 0 and {}",
            i32::MAX
        ));
    }
    Ok(())
}
