//! Input limits shared by the DB and API layers.

/// Smallest accepted balance top-up.
pub const MIN_TOP_UP: i64 = 1;

/// Review ratings run from 1 to 5 stars.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Default minimum password length for self-registration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Number of payments shown in a student's history.
pub const PAYMENT_HISTORY_LIMIT: i64 = 10;

/// Number of menus shown on the cook's menu list.
pub const MENU_LIST_LIMIT: i64 = 14;

/// Validate a review rating.
pub fn validate_rating(rating: i16) -> Result<(), String> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        ))
    }
}

/// Validate a top-up amount.
pub fn validate_top_up(amount: i64) -> Result<(), String> {
    if amount < MIN_TOP_UP {
        return Err(format!("Top-up amount must be at least {MIN_TOP_UP}"));
    }
    Ok(())
}
