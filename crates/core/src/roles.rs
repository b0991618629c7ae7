//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20240101000001_create_users_table.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_COOK: &str = "cook";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_COOK, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
