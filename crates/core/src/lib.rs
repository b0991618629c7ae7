//! Canteen domain logic.
//!
//! Pure business rules with no database dependencies. The repository layer
//! in `canteen_db` loads rows, calls into these functions, and persists the
//! result.

pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod meals;
pub mod pricing;
pub mod procurement;
pub mod reporting;
pub mod roles;
pub mod types;
pub mod validation;
